//! # microBASIC
//!
//! A dialect of the BASIC programming language: a tokenizer, a
//! statement/expression parser, and an execution engine for stored,
//! line-numbered programs.
//!
//! Open a terminal and run the executable for a classic REPL:
//! ```text
//! microBASIC
//! READY.
//! ```
//!
//! Programs can be typed in directly, `LOAD`ed from a file or an
//! http(s) URL, and `RUN`. The library crate exposes the machine
//! through [`mach::Runtime`] for embedding and testing.

pub mod lang;
pub mod mach;
pub mod term;
