//! REPL Module
//!
//! Interactive command loop: input cleaning, command parsing, session state,
//! execution against the API client and output rendering.

pub mod command;
pub mod input;
pub mod render;
pub mod runner;
pub mod session;
pub mod stdin;

pub use command::{Command, COMMANDS};
pub use input::clean_input;
pub use runner::{catch_probability, Outcome, Repl, PROMPT};
pub use session::Session;
pub use stdin::spawn_line_reader;
