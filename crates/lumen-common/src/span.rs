use serde::{Deserialize, Serialize};

/// A byte-offset range into the source text a diagnostic is attached to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub len: u32,
}

impl Span {
    pub const fn new(start: u32, len: u32) -> Self {
        Self { start, len }
    }

    pub const fn end(&self) -> u32 {
        self.start + self.len
    }

    pub const fn contains(&self, offset: u32) -> bool {
        offset >= self.start && offset < self.end()
    }
}
