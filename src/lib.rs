//! Keystroke-driven calculator engine.
//!
//! [`Engine`] keeps a partially typed expression well-formed, evaluates it
//! with a recursive-descent parser and reports classified errors.

pub mod calculator;
pub mod config;

pub use calculator::{DisplayError, Engine, EngineOptions, EngineState, ErrorKind, Token};
pub use config::Config;
