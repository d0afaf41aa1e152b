//! End-to-end receive path: bytes → framer → matcher → queue + console.

use uartlink::adapters::console_sink::ConsoleEventSink;
use uartlink::app::commands::Command;
use uartlink::config::{LINE_CAPACITY, LinkConfig};
use uartlink::console::Console;
use uartlink::framer::{LineFramer, Poll};
use uartlink::queue::Mailbox;
use uartlink::tasks::command_startup;

use super::mock_uart::{NoDelay, Recorded, RecordingSink, ScriptedRx, SharedWire};

fn drive<E: uartlink::app::ports::EventSink>(
    input: &[u8],
    outbox: &Mailbox<Command, 4>,
    events: &mut E,
) -> Vec<Poll> {
    let mut framer: LineFramer = LineFramer::new(&LinkConfig::default());
    let mut rx = ScriptedRx::new(input);
    let mut delay = NoDelay::default();
    let mut polls = Vec::new();
    while !rx.is_drained() {
        polls.push(framer.poll_once(&mut rx, &mut delay, outbox, events));
    }
    polls
}

#[test]
fn console_transcript_matches_input() {
    let wire = SharedWire::new();
    let console: Console<SharedWire> = Console::new(wire.clone(), 100);
    let outbox: Mailbox<Command, 4> = Mailbox::new("cmd");
    let mut sink = ConsoleEventSink::new(&console);

    let mut input = b"hello\r\ntoggle\r\n".to_vec();
    input.extend_from_slice(&[b'a'; LINE_CAPACITY + 4]);
    input.push(b'\n');
    drive(&input, &outbox, &mut sink);

    assert_eq!(
        wire.text(),
        "[CMD] Recv Frame: [hello]\r\n\
         [CMD] Unknown Cmd.\r\n\
         [CMD] Recv Frame: [toggle]\r\n\
         [CMD] Action: LED TOGGLE\r\n\
         [CMD] Buffer Overflow, Reset.\r\n\
         [CMD] Recv Frame: [aaaa]\r\n\
         [CMD] Unknown Cmd.\r\n"
    );
    assert_eq!(outbox.try_take(), Some(Command::Toggle));
    assert_eq!(outbox.try_take(), None);
}

#[test]
fn near_misses_are_unrecognised() {
    let outbox: Mailbox<Command, 4> = Mailbox::new("cmd");
    let mut sink = RecordingSink::default();

    drive(b"Toggle\ntoggle \nTOGGLE\n", &outbox, &mut sink);

    assert_eq!(
        sink.events,
        vec![
            Recorded::Frame(b"Toggle".to_vec()),
            Recorded::Unknown,
            Recorded::Frame(b"toggle ".to_vec()),
            Recorded::Unknown,
            Recorded::Frame(b"TOGGLE".to_vec()),
            Recorded::Unknown,
        ]
    );
    assert!(outbox.is_empty());
}

#[test]
fn saturated_queue_drops_without_stalling() {
    let outbox: Mailbox<Command, 4> = Mailbox::new("cmd");
    let mut sink = RecordingSink::default();

    let polls = drive(&b"toggle\n".repeat(6), &outbox, &mut sink);

    // Every line was still matched and the framer kept going.
    let dispatched = polls
        .iter()
        .filter(|p| **p == Poll::Dispatched(Command::Toggle))
        .count();
    assert_eq!(dispatched, 6);
    assert_eq!(outbox.len(), 4);
    assert_eq!(outbox.dropped(), 2);

    let acks = sink
        .events
        .iter()
        .filter(|e| **e == Recorded::Posted(Command::Toggle))
        .count();
    assert_eq!(acks, 4);
}

#[test]
fn dropped_command_adds_no_console_line() {
    let wire = SharedWire::new();
    let console: Console<SharedWire> = Console::new(wire.clone(), 100);
    let outbox: Mailbox<Command, 4> = Mailbox::new("cmd");
    let mut sink = ConsoleEventSink::new(&console);

    drive(&b"toggle\n".repeat(6), &outbox, &mut sink);

    let text = wire.text();
    let lines: Vec<&str> = text.split_inclusive("\r\n").collect();
    let echoes = lines
        .iter()
        .filter(|l| **l == "[CMD] Recv Frame: [toggle]\r\n")
        .count();
    let actions = lines
        .iter()
        .filter(|l| **l == "[CMD] Action: LED TOGGLE\r\n")
        .count();

    assert_eq!(outbox.dropped(), 2);
    assert_eq!(echoes, 6);
    assert_eq!(actions, 4);
    assert_eq!(lines.len(), echoes + actions, "unexpected lines: {lines:?}");
    assert!(text.ends_with("[CMD] Recv Frame: [toggle]\r\n[CMD] Recv Frame: [toggle]\r\n"));
}

#[test]
fn idle_line_clears_overrun_each_cycle() {
    let config = LinkConfig::default();
    let mut framer: LineFramer = LineFramer::new(&config);
    let mut rx = ScriptedRx::new(b"");
    let mut delay = NoDelay::default();
    let outbox: Mailbox<Command, 4> = Mailbox::new("cmd");
    let mut sink = RecordingSink::default();

    for _ in 0..3 {
        rx.overrun = true;
        assert_eq!(
            framer.poll_once(&mut rx, &mut delay, &outbox, &mut sink),
            Poll::Idle
        );
    }

    assert_eq!(rx.overrun_clears, 3);
    assert_eq!(framer.stats().overruns, 3);
    assert_eq!(delay.slept_ms, vec![config.idle_yield_ms; 3]);
    assert!(sink.events.is_empty(), "overruns are never reported as events");
}

#[test]
fn startup_clears_overrun_waits_and_announces() {
    let config = LinkConfig {
        startup_delay_ms: 250,
        ..LinkConfig::default()
    };
    let mut rx = ScriptedRx::new(b"");
    rx.overrun = true;
    let mut delay = NoDelay::default();
    let mut sink = RecordingSink::default();

    command_startup(&mut rx, &mut delay, &mut sink, &config);

    assert!(!rx.overrun);
    assert_eq!(delay.slept_ms, vec![250]);
    assert_eq!(sink.events, vec![Recorded::Ready]);
}

#[test]
fn errors_funnel_into_crate_error() -> uartlink::Result<()> {
    let wire = SharedWire::new();
    let console: Console<SharedWire> = Console::new(wire.clone(), 100);

    let sent = uartlink::console_print!(console, "up\r\n")?;
    assert_eq!(sent, 4);

    let config = LinkConfig::from_bytes(&LinkConfig::default().to_bytes()?)?;
    assert_eq!(config, LinkConfig::default());

    wire.set_jammed(true);
    let err: uartlink::Error = uartlink::console_print!(console, "lost\r\n")
        .unwrap_err()
        .into();
    assert_eq!(err.to_string(), "output: transmit timed out");
    Ok(())
}
