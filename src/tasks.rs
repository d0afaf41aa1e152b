//! Task wiring — spawns the command and heartbeat loops on named threads.
//!
//! On an RTOS-backed std, `std::thread` maps onto native tasks, so each
//! loop below is one independently scheduled task.  Both loops run for the
//! lifetime of the process and only suspend at bounded waits.
//!
//! ```text
//!  ┌──────────────┐   Command   ┌────────────────┐
//!  │ command task │────────────▶│ COMMAND_QUEUE  │──▶ consumer
//!  │ (LineFramer) │             └────────────────┘
//!  └──────┬───────┘
//!         │ diagnostics        ┌────────────────┐
//!         ├───────────────────▶│    Console     │──▶ UART TX
//!  ┌──────┴───────┐            └────────────────┘
//!  │ heartbeat    │───▶ HEARTBEAT_QUEUE
//!  └──────────────┘
//! ```

use std::thread::JoinHandle;

use anyhow::Context as _;
use embedded_hal::delay::DelayNs;
use log::info;

use crate::adapters::console_sink::ConsoleEventSink;
use crate::adapters::delay::ThreadDelay;
use crate::app::commands::Command;
use crate::app::events::LinkEvent;
use crate::app::ports::{EventSink, Outbox, SerialRx, SerialTx};
use crate::config::{LINE_CAPACITY, LinkConfig};
use crate::console::Console;
use crate::framer::LineFramer;
use crate::heartbeat::Heartbeat;

/// Stack for the command task.  Frames are tiny; the console renders into
/// its own buffer.
pub const COMMAND_TASK_STACK_KB: usize = 8;

/// Stack for the heartbeat task.
pub const HEARTBEAT_TASK_STACK_KB: usize = 4;

/// Spawn a named thread with an explicit stack size.
pub fn spawn_task(
    name: &'static str,
    stack_kb: usize,
    f: impl FnOnce() + Send + 'static,
) -> anyhow::Result<JoinHandle<()>> {
    info!("Spawning '{}' (stack={}KB)", name, stack_kb);

    std::thread::Builder::new()
        .name(name.into())
        .stack_size(stack_kb * 1024)
        .spawn(f)
        .with_context(|| format!("failed to spawn task '{name}'"))
}

/// Bring the receive side to a known state and announce readiness.
///
/// Clears any overrun latched before the task started, waits for the
/// line to settle, then emits [`LinkEvent::Ready`].
pub fn command_startup<R, D, E>(rx: &mut R, delay: &mut D, events: &mut E, config: &LinkConfig)
where
    R: SerialRx + ?Sized,
    D: DelayNs + ?Sized,
    E: EventSink + ?Sized,
{
    rx.clear_overrun();
    delay.delay_ms(config.startup_delay_ms);
    events.emit(&LinkEvent::Ready);
}

/// Command task body: startup sequence, then the framer loop.
pub fn run_command_task<R, D, O, E>(
    rx: &mut R,
    delay: &mut D,
    outbox: &O,
    events: &mut E,
    config: &LinkConfig,
) -> !
where
    R: SerialRx + ?Sized,
    D: DelayNs + ?Sized,
    O: Outbox<Command> + ?Sized,
    E: EventSink + ?Sized,
{
    let mut framer: LineFramer<LINE_CAPACITY> = LineFramer::new(config);
    command_startup(rx, delay, events, config);
    framer.run(rx, delay, outbox, events)
}

/// Spawn the command task, reporting on `console` and posting to `outbox`.
pub fn spawn_command_task<R, T, O, const N: usize>(
    mut rx: R,
    console: &'static Console<T, N>,
    outbox: &'static O,
    config: LinkConfig,
) -> anyhow::Result<JoinHandle<()>>
where
    R: SerialRx + Send + 'static,
    T: SerialTx + Send + 'static,
    O: Outbox<Command> + Sync + ?Sized,
{
    config.validate().context("command task config")?;
    spawn_task("cmd", COMMAND_TASK_STACK_KB, move || {
        let mut delay = ThreadDelay::new();
        let mut events = ConsoleEventSink::new(console);
        run_command_task(&mut rx, &mut delay, outbox, &mut events, &config);
    })
}

/// Spawn the heartbeat task, reporting on `console` and posting to `outbox`.
pub fn spawn_heartbeat_task<T, O, const N: usize>(
    console: &'static Console<T, N>,
    outbox: &'static O,
    config: LinkConfig,
) -> anyhow::Result<JoinHandle<()>>
where
    T: SerialTx + Send + 'static,
    O: Outbox<u32> + Sync + ?Sized,
{
    config.validate().context("heartbeat task config")?;
    spawn_task("heartbeat", HEARTBEAT_TASK_STACK_KB, move || {
        let mut delay = ThreadDelay::new();
        Heartbeat::new().run(console, outbox, &mut delay, config.heartbeat_interval_ms);
    })
}
