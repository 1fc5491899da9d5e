//! # Buffer Core
//!
//! Cursor-addressed text buffer with a fixed capacity, driven by a small
//! command language.
//!
//! ## Philosophy
//!
//! - **Typed at the boundary**: command arguments are parsed once; the buffer
//!   only takes validated counts
//! - **Nothing is fatal**: rejected commands report a diagnostic and leave
//!   the buffer untouched
//! - **No ambient output**: rendered text is returned and recorded in an
//!   owned transcript, never printed
//! - **Deterministic**: same command trace => same buffer state
//!
//! ## Design
//!
//! The core provides:
//! - CellChain: arena of linked character cells
//! - CursorBuffer: insert/delete/move/render/reset over the chain
//! - Command: parsed command language
//! - EditorSession: dispatcher returning SessionOutcome
//! - BufferSnapshot: observable state for comparisons
//!
//! ```
//! use buffer_core::{EditorSession, SessionOutcome};
//!
//! let mut session = EditorSession::default();
//! session.apply_line("AddText abc");
//! session.apply_line("MoveLeft 1");
//! session.apply_line("AddText X");
//! assert_eq!(
//!     session.apply_line("PrintText"),
//!     SessionOutcome::Rendered("abXc".into())
//! );
//! ```

pub mod buffer;
pub mod chain;
pub mod command;
pub mod error;
pub mod session;
pub mod snapshot;
pub mod transcript;

pub use buffer::{CursorBuffer, DEFAULT_CAPACITY};
pub use chain::{CellChain, CellId, ChainError};
pub use command::{parse_command, parse_count, split_line, Command, CommandError};
pub use error::BufferError;
pub use session::{Diagnostic, DiagnosticKind, EditorSession, SessionOutcome, SessionStats};
pub use snapshot::BufferSnapshot;
pub use transcript::Transcript;
