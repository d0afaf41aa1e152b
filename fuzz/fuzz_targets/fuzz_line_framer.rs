//! Fuzz target: `LineFramer::feed`
//!
//! Drives arbitrary byte sequences through the line framer and the command
//! matcher and asserts that frames are never empty, never exceed the line
//! limit and never contain a terminator, and that a reset leaves the framer
//! able to accept the same input again.
//!
//! cargo fuzz run fuzz_line_framer

#![no_main]

use libfuzzer_sys::fuzz_target;
use uartlink::app::matcher::match_frame;
use uartlink::config::{LINE_CAPACITY, LinkConfig};
use uartlink::framer::{Feed, LineFramer};

fuzz_target!(|data: &[u8]| {
    let mut framer: LineFramer = LineFramer::new(&LinkConfig::default());

    let mut first = 0usize;
    for &b in data {
        if let Feed::Frame(frame) = framer.feed(b) {
            let bytes = frame.as_bytes();
            assert!(!bytes.is_empty(), "framer must not yield empty frames");
            assert!(bytes.len() < LINE_CAPACITY, "frame exceeds line limit");
            assert!(!bytes.contains(&b'\r') && !bytes.contains(&b'\n'));
            let _ = match_frame(frame);
            first += 1;
        }
    }

    // After a reset the framer must produce the same frames again.
    framer.reset();
    let mut second = 0usize;
    for &b in data {
        if let Feed::Frame(_) = framer.feed(b) {
            second += 1;
        }
    }
    assert_eq!(first, second);
});
