//! Commands recognised on the serial line.
//!
//! These are forwarded to the downstream consumer through the command
//! [`Mailbox`](crate::queue::Mailbox).  The vocabulary is closed: adding a
//! command means adding a variant and a row in [`COMMAND_TABLE`].

/// Command identifiers posted to the outbound queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Command {
    /// No command.  Returned for unrecognised lines; never posted.
    #[default]
    None = 0,
    /// Toggle the indicator LED.
    Toggle = 1,
}

/// Exact, case-sensitive line text for each postable command.
const COMMAND_TABLE: &[(&str, Command)] = &[("toggle", Command::Toggle)];

impl Command {
    /// Look up the command whose text equals `text` exactly.
    pub fn from_text(text: &str) -> Self {
        COMMAND_TABLE
            .iter()
            .find(|(t, _)| *t == text)
            .map_or(Self::None, |&(_, cmd)| cmd)
    }

    /// Line text that selects this command (`None` has none).
    pub fn text(self) -> Option<&'static str> {
        COMMAND_TABLE
            .iter()
            .find(|(_, cmd)| *cmd == self)
            .map(|&(t, _)| t)
    }

    /// Human-readable effect, used in the console acknowledgement.
    pub fn action(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Toggle => "LED TOGGLE",
        }
    }

    pub fn is_none(self) -> bool {
        self == Self::None
    }
}
