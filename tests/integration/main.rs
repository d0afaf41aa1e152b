//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock serial adapters.  All tests run on the host (x86_64) with
//! no real UART required.

mod link_tests;
mod mock_uart;
