//! Capacity-bounded, cursor-addressed text buffer

use tracing::debug;

use crate::chain::CellChain;
use crate::error::BufferError;
use crate::snapshot::BufferSnapshot;
use crate::transcript::Transcript;

/// Capacity used when none is configured
pub const DEFAULT_CAPACITY: usize = 40;

/// Text buffer with a cursor and a fixed capacity
///
/// The cursor is a character offset in `[0, len]`. `remaining_capacity` is
/// always `capacity - len` once an operation returns.
#[derive(Debug, Clone)]
pub struct CursorBuffer {
    chain: CellChain,
    cursor: usize,
    capacity: usize,
    remaining_capacity: usize,
    transcript: Transcript,
}

impl CursorBuffer {
    /// Create an empty buffer with [`DEFAULT_CAPACITY`]
    pub fn new() -> Self {
        Self::empty(DEFAULT_CAPACITY)
    }

    /// Create an empty buffer holding at most `capacity` characters
    pub fn with_capacity(capacity: usize) -> Result<Self, BufferError> {
        if capacity == 0 {
            return Err(BufferError::ZeroCapacity);
        }
        Ok(Self::empty(capacity))
    }

    fn empty(capacity: usize) -> Self {
        Self {
            chain: CellChain::new(),
            cursor: 0,
            capacity,
            remaining_capacity: capacity,
            transcript: Transcript::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn remaining_capacity(&self) -> usize {
        self.remaining_capacity
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Current contents, without recording anything in the transcript
    pub fn text(&self) -> String {
        self.chain.iter().collect()
    }

    pub fn snapshot(&self) -> BufferSnapshot {
        BufferSnapshot {
            cursor: self.cursor,
            len: self.len(),
            capacity: self.capacity,
            remaining_capacity: self.remaining_capacity,
            text: self.text(),
            transcript_len: self.transcript.len(),
        }
    }

    /// Insert `text` at the cursor and move the cursor past it.
    ///
    /// Rejected when the text is at least as long as the remaining capacity,
    /// so a buffer never becomes completely full. Returns the new cursor.
    pub fn insert(&mut self, text: &str) -> Result<usize, BufferError> {
        if text.is_empty() {
            return Err(BufferError::EmptyText);
        }

        let requested = text.chars().count();
        if requested >= self.remaining_capacity {
            debug!(
                requested,
                remaining = self.remaining_capacity,
                "insert rejected"
            );
            return Err(BufferError::CapacityExceeded {
                requested,
                remaining: self.remaining_capacity,
            });
        }

        // Every character goes in front of the same cell, so the anchor is
        // located once for the whole run.
        let anchor = self.chain.locate(self.cursor);
        for ch in text.chars() {
            self.chain.splice_before(anchor, ch);
            self.cursor += 1;
        }
        self.remaining_capacity -= requested;

        debug!(
            inserted = requested,
            cursor = self.cursor,
            len = self.len(),
            "insert"
        );
        self.debug_check();
        Ok(self.cursor)
    }

    /// Remove one character located `count` positions before the cursor.
    ///
    /// This removes exactly one character whatever `count` is: the cell at
    /// index `cursor - count` (the head when `count >= cursor`) goes away and
    /// the cursor retreats by `min(count, cursor)`. A count of 0 therefore
    /// removes the character right of the cursor. Returns the removed
    /// character.
    pub fn delete(&mut self, count: usize) -> Result<char, BufferError> {
        if self.cursor == 0 {
            return Err(BufferError::NothingToDelete);
        }

        let target = self.cursor.saturating_sub(count);
        let Some(id) = self.chain.locate(target) else {
            // count == 0 with the cursor at the end: nothing right of it
            debug!(cursor = self.cursor, count, "delete past end of buffer");
            return Err(BufferError::NothingToDelete);
        };
        let removed = self.chain.unsplice(id).ok_or_else(|| {
            BufferError::Corrupted(format!("located cell {} is vacant", id.index()))
        })?;

        self.cursor -= count.min(self.cursor);
        self.remaining_capacity += 1;

        debug!(
            index = target,
            cursor = self.cursor,
            len = self.len(),
            "delete"
        );
        self.debug_check();
        Ok(removed)
    }

    /// Move the cursor left by `count`, stopping at 0. Returns the new cursor.
    pub fn move_left(&mut self, count: usize) -> usize {
        if self.cursor != 0 {
            self.cursor = self.cursor.saturating_sub(count);
        }
        self.cursor
    }

    /// Move the cursor right by `count`, stopping at the end. Returns the new
    /// cursor.
    pub fn move_right(&mut self, count: usize) -> usize {
        let len = self.len();
        if self.cursor != len {
            self.cursor = self.cursor.saturating_add(count).min(len);
        }
        self.cursor
    }

    /// Return the full contents and record them in the transcript
    pub fn render(&mut self) -> Result<String, BufferError> {
        if self.chain.is_empty() {
            return Err(BufferError::NothingToPrint);
        }

        let text = self.text();
        self.transcript.push(text.clone());
        Ok(text)
    }

    /// Clear the contents. The transcript is kept.
    pub fn reset(&mut self) {
        self.chain.clear();
        self.cursor = 0;
        self.remaining_capacity = self.capacity;
        debug!(capacity = self.capacity, "reset");
        self.debug_check();
    }

    /// Verify cursor bounds, capacity accounting and chain links
    pub fn check_invariants(&self) -> Result<(), BufferError> {
        let len = self.len();
        if self.cursor > len {
            return Err(BufferError::Corrupted(format!(
                "cursor {} past end {}",
                self.cursor, len
            )));
        }
        if self.remaining_capacity + len != self.capacity {
            return Err(BufferError::Corrupted(format!(
                "remaining capacity {} does not match capacity {} minus length {}",
                self.remaining_capacity, self.capacity, len
            )));
        }
        self.chain.check_links()?;
        Ok(())
    }

    fn debug_check(&self) {
        if cfg!(debug_assertions) {
            if let Err(err) = self.check_invariants() {
                panic!("{}", err);
            }
        }
    }
}

impl Default for CursorBuffer {
    fn default() -> Self {
        Self::new()
    }
}
