//! # Buffer Console
//!
//! Line-oriented driver for `buffer_core`.
//! It only reads commands, prints what the session reports, and writes
//! transcripts; all editing semantics live in the core.
//!
//! ## Modes
//!
//! - **Interactive**: commands from stdin until `Exit` or end of input
//! - **Script**: commands from a file, transcript written to `output.txt`
//!   (or the configured path)
//! - **Menu**: pick one of the above, repeatedly

pub mod console;
pub mod error;
pub mod interactive;
pub mod menu;
pub mod prompt;
pub mod script;
pub mod settings;

pub use console::{read_raw_line, Console, INVALID_UTF8};
pub use error::{ConsoleError, SettingsError};
pub use interactive::run_interactive;
pub use menu::{run_menu, MenuChoice};
pub use prompt::{is_yes, parse_capacity, select_capacity};
pub use script::{process_script, run_script, write_transcript, ScriptReport, MISSING_SCRIPT};
pub use settings::{ConsoleSettings, SettingsFile, DEFAULT_TRANSCRIPT_PATH};
