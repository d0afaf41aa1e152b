//! UartLink — serial command link library.
//!
//! Turns a raw UART byte stream into newline-delimited frames, matches them
//! against a small command vocabulary and forwards recognised commands to a
//! downstream consumer.  Diagnostic text from any number of tasks shares the
//! same line through the serialized [`console::Console`].
//!
//! All platform access goes through the port traits in [`app::ports`], so
//! everything here runs on the host for testing.

#![deny(unused_must_use)]

pub mod console;

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod framer;
pub mod heartbeat;
pub mod queue;
pub mod tasks;

pub use error::{Error, Result};
