use std::collections::VecDeque;

use crate::util::time;

/// Severity of a message shown in the log panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    #[default]
    Output,
    Info,
    Warning,
    Error,
}

impl MessageKind {
    fn log_level(self) -> log::Level {
        match self {
            MessageKind::Output => log::Level::Debug,
            MessageKind::Info => log::Level::Info,
            MessageKind::Warning => log::Level::Warn,
            MessageKind::Error => log::Level::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
    /// Seconds since the UNIX epoch
    pub timestamp: f64,
}

/// User-facing notices, mirrored to the `log` facade
#[derive(Debug, Clone)]
pub struct MessageLog {
    entries: VecDeque<Message>,
    capacity: usize,
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::with_capacity(200)
    }
}

impl MessageLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn add(&mut self, kind: MessageKind, text: impl Into<String>) {
        let text = text.into();
        log::log!(kind.log_level(), "{text}");

        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(Message {
            kind,
            text,
            timestamp: time::current_time_secs(),
        });
    }

    pub fn output(&mut self, text: impl Into<String>) {
        self.add(MessageKind::Output, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.add(MessageKind::Error, text);
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Message> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Move every entry of `other` to the end of this log
    pub fn append(&mut self, other: &mut MessageLog) {
        for message in other.entries.drain(..) {
            if self.entries.len() == self.capacity {
                self.entries.pop_front();
            }
            self.entries.push_back(message);
        }
    }
}
