//! # Utility Commands
//!
//! Definitions for /ping, /version, and /uptime.

use serenity::builder::CreateApplicationCommand;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        simple_command("ping", "Check that the bot is responsive"),
        simple_command("version", "Show the running bot version"),
        simple_command("uptime", "Show how long the bot has been up"),
    ]
}

fn simple_command(name: &str, description: &str) -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command.name(name).description(description);
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_utility_commands() {
        let commands = create_commands();
        assert_eq!(commands.len(), 3);
    }
}
