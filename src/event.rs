//! The closed catalog of named log events.
//!
//! Handlers report the same situations in many places. Naming them here keeps
//! the message text identical everywhere and gives each one a stable numeric
//! id for classification. Adding an event is a data change: a variant, its
//! id, its message and its level.

use std::fmt;

use tracing::Level;

/// A named, well-known log event.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Event {
    BadInput,
    BadCredentials,
    FunctionError,
}

impl Event {
    /// Every event, in id order.
    pub const ALL: [Event; 3] = [Self::BadInput, Self::BadCredentials, Self::FunctionError];

    /// Stable numeric id, recorded as `event_id`.
    pub fn id(self) -> u16 {
        match self {
            Self::BadInput       => 1,
            Self::BadCredentials => 2,
            Self::FunctionError  => 3,
        }
    }

    /// The fixed log message.
    pub fn message(self) -> &'static str {
        match self {
            Self::BadInput       => "bad input",
            Self::BadCredentials => "bad credentials",
            Self::FunctionError  => "function error",
        }
    }

    /// Severity the event is logged at.
    pub fn level(self) -> Level {
        match self {
            Self::BadInput       => Level::INFO,
            Self::BadCredentials => Level::INFO,
            Self::FunctionError  => Level::ERROR,
        }
    }

    pub fn from_id(id: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.id() == id)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
