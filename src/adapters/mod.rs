//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter        | Implements | Connects to                    |
//! |----------------|------------|--------------------------------|
//! | `console_sink` | EventSink  | Serialized console text        |
//! | `delay`        | DelayNs    | `std::thread::sleep` (yield)   |

pub mod console_sink;
pub mod delay;
