//! Console input: one command per stdin line.

use deepspace_core::commands::CommandArg;

use crate::state::GameLoopCommand;

/// What a console line asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleInput {
    /// Forward to the game loop.
    Loop(GameLoopCommand),
    /// Print the latest status line.
    Status,
    Quit,
}

/// Parse a console line. Blank lines yield `None`.
///
/// App commands (`quit`, `status`, `autosim`, `simrate [value] [relative]`)
/// are handled here; everything else goes to the simulation's command surface.
pub fn parse_line(line: &str) -> Option<ConsoleInput> {
    let (name, args) = CommandArg::tokenize(line)?;
    let input = match name.as_str() {
        "quit" | "exit" => ConsoleInput::Quit,
        "status" => ConsoleInput::Status,
        "autosim" => ConsoleInput::Loop(GameLoopCommand::ToggleAutoSim),
        "simrate" => ConsoleInput::Loop(GameLoopCommand::SimRate {
            value: args.first().and_then(CommandArg::as_f64),
            relative: args.get(1).and_then(CommandArg::as_f64).unwrap_or(0.0) != 0.0,
        }),
        _ => ConsoleInput::Loop(GameLoopCommand::Dispatch { name, args }),
    };
    Some(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line() {
        assert_eq!(parse_line("   "), None);
    }

    #[test]
    fn test_app_commands() {
        assert_eq!(parse_line("quit"), Some(ConsoleInput::Quit));
        assert_eq!(parse_line("status"), Some(ConsoleInput::Status));
        assert_eq!(
            parse_line("autosim"),
            Some(ConsoleInput::Loop(GameLoopCommand::ToggleAutoSim))
        );
        assert_eq!(
            parse_line("simrate +10 1"),
            Some(ConsoleInput::Loop(GameLoopCommand::SimRate {
                value: Some(10.0),
                relative: true
            }))
        );
        assert_eq!(
            parse_line("simrate"),
            Some(ConsoleInput::Loop(GameLoopCommand::SimRate {
                value: None,
                relative: false
            }))
        );
    }

    #[test]
    fn test_simulation_command_is_dispatched() {
        assert_eq!(
            parse_line("ship.fly 12 2.5"),
            Some(ConsoleInput::Loop(GameLoopCommand::Dispatch {
                name: "ship.fly".into(),
                args: vec![CommandArg::Int(12), CommandArg::Float(2.5)],
            }))
        );
    }
}
