//! Top-level menu
//!
//! Lets the user pick interactive or script mode, runs it, and offers to
//! run another until declined.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use buffer_core::EditorSession;
use tracing::debug;

use crate::console::Console;
use crate::error::ConsoleError;
use crate::interactive::run_interactive;
use crate::prompt::select_capacity;
use crate::script::run_script;
use crate::settings::ConsoleSettings;

const MENU: &str = "Select an option:\n\
                    1. Interactive Mode\n\
                    2. Test Mode(using input file)\n\
                    Enter your choice (1-2): ";

/// Menu choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Interactive,
    Script,
}

impl MenuChoice {
    pub fn parse(answer: &str) -> Option<Self> {
        match answer {
            "1" => Some(MenuChoice::Interactive),
            "2" => Some(MenuChoice::Script),
            _ => None,
        }
    }
}

/// Run the menu loop until the user declines another run or input ends
pub fn run_menu<R: BufRead, W: Write>(
    settings: &ConsoleSettings,
    console: &mut Console<R, W>,
) -> Result<(), ConsoleError> {
    console.say("Text Editor Program\n")?;

    loop {
        let Some(answer) = console.ask(MENU)? else {
            break;
        };

        match MenuChoice::parse(&answer) {
            Some(MenuChoice::Interactive) => {
                let capacity = if settings.capacity_overridden {
                    settings.capacity
                } else {
                    select_capacity(console)?
                };
                let mut session = EditorSession::with_capacity(capacity)?;
                run_interactive(&mut session, console)?;
            }
            Some(MenuChoice::Script) => {
                let path = console
                    .ask("Enter the input file name or path: ")?
                    .unwrap_or_default();
                run_script(&PathBuf::from(path.trim()), settings, console)?;
            }
            None => {
                debug!(answer = %answer, "invalid menu choice");
                console.say("Invalid choice.")?;
            }
        }

        let again = console.ask("Do you want to run another option? (yes/no): ")?;
        if !again.is_some_and(|answer| answer.trim().eq_ignore_ascii_case("yes")) {
            break;
        }
    }

    console.say("Exiting...")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(input: &str) -> String {
        let settings = ConsoleSettings::default();
        let mut console = Console::new(input.as_bytes(), Vec::new());
        run_menu(&settings, &mut console).unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Interactive));
        assert_eq!(MenuChoice::parse("2"), Some(MenuChoice::Script));
        assert_eq!(MenuChoice::parse("3"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn test_invalid_choice_then_decline() {
        let output = menu("9\nno\n");
        assert!(output.starts_with("Text Editor Program\n"));
        assert!(output.contains("Invalid choice.\n"));
        assert!(output.ends_with("Exiting...\n"));
    }

    #[test]
    fn test_interactive_run_from_menu() {
        let output = menu("1\nno\nAddText hi\nPrintText\nExit\nno\n");
        assert!(output.contains("Using the default capacity of 40.\n"));
        assert!(output.contains("hi\n"));
        assert!(output.ends_with("Exiting...\n"));
    }

    #[test]
    fn test_undecodable_line_does_not_end_menu() {
        let settings = ConsoleSettings::default();
        let input = &b"1\nno\nAddText hi\n\xff\nPrintText\nExit\nno\n"[..];
        let mut console = Console::new(input, Vec::new());
        run_menu(&settings, &mut console).unwrap();

        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains("Error: Line is not valid UTF-8.\nhi\n"));
        assert!(output.ends_with("Exiting...\n"));
    }

    #[test]
    fn test_run_again() {
        let output = menu("7\nyes\n8\nNO\n");
        assert_eq!(output.matches("Invalid choice.").count(), 2);
        assert_eq!(output.matches("Select an option:").count(), 2);
    }

    #[test]
    fn test_missing_script_from_menu() {
        let output = menu("2\n/definitely/not/here.txt\nno\n");
        assert!(output.contains("Error: File name or path does not exist.\n"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let output = menu("");
        assert!(output.ends_with("Exiting...\n"));
    }
}
