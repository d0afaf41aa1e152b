//! Bounded inter-task mailboxes.
//!
//! Uses `embassy-sync` bounded MPMC channels so the framer task, the
//! heartbeat task and their consumers can share static queues without heap
//! allocation.
//!
//! ```text
//! ┌──────────────┐  Command  ┌──────────────┐
//! │ Framer task  │─────────▶│  Consumer     │
//! └──────────────┘           └──────────────┘
//! ┌──────────────┐   u32     ┌──────────────┐
//! │ Heartbeat    │─────────▶│  Consumer     │
//! └──────────────┘           └──────────────┘
//! ```
//!
//! Producers never wait: a post to a full mailbox drops the item and bumps
//! the drop counter.  FIFO order holds for the items that were accepted.

use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::debug;

use crate::app::commands::Command;
use crate::app::ports::Outbox;
use crate::config::{COMMAND_QUEUE_DEPTH, HEARTBEAT_QUEUE_DEPTH};

/// Bounded FIFO with a non-blocking producer side.
pub struct Mailbox<T, const N: usize> {
    name: &'static str,
    channel: Channel<CriticalSectionRawMutex, T, N>,
    dropped: AtomicU32,
}

impl<T, const N: usize> Mailbox<T, N> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            channel: Channel::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Take the oldest item, if any.
    pub fn try_take(&self) -> Option<T> {
        self.channel.try_receive().ok()
    }

    /// Wait for the next item.
    pub async fn take(&self) -> T {
        self.channel.receive().await
    }

    /// Park the calling thread until an item arrives.
    pub fn take_blocking(&self) -> T {
        futures_lite::future::block_on(self.take())
    }

    /// Items dropped because the mailbox was full.
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.channel.is_full()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T, const N: usize> Outbox<T> for Mailbox<T, N> {
    fn try_post(&self, item: T) -> bool {
        if self.channel.try_send(item).is_ok() {
            return true;
        }
        let total = self.dropped.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
        debug!("{}: mailbox full, dropped item ({} total)", self.name, total);
        false
    }
}

pub type CommandQueue = Mailbox<Command, COMMAND_QUEUE_DEPTH>;
pub type HeartbeatQueue = Mailbox<u32, HEARTBEAT_QUEUE_DEPTH>;

/// Framer task → command consumer.
pub static COMMAND_QUEUE: CommandQueue = Mailbox::new("cmd");

/// Heartbeat task → heartbeat consumer.
pub static HEARTBEAT_QUEUE: HeartbeatQueue = Mailbox::new("heartbeat");
