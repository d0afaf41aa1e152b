//! Application core — command vocabulary and matching, zero I/O.
//!
//! All interaction with the UART and the downstream consumer happens
//! through the **port traits** defined in [`ports`], keeping this layer
//! fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod matcher;
pub mod ports;
