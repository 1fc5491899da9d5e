//! Arena-backed cell chain
//!
//! Characters live in cells stored in a growable arena. Each cell records the
//! arena index of its predecessor and successor, so splicing and unsplicing a
//! located cell is O(1) without any pointer lifetime juggling. Vacated slots
//! are threaded on a free list and reused by the next splice.

use thiserror::Error;

/// Arena index of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId(usize);

impl CellId {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One character plus its navigation links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    prev: Option<CellId>,
    next: Option<CellId>,
}

impl Cell {
    pub fn prev(&self) -> Option<CellId> {
        self.prev
    }

    pub fn next(&self) -> Option<CellId> {
        self.next
    }
}

#[derive(Debug, Clone)]
enum Slot {
    Occupied(Cell),
    Vacant { next_free: Option<usize> },
}

/// Link structure violation found by [`CellChain::check_links`]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("chain ends disagree with length {len}: head={head:?}, tail={tail:?}")]
    Ends {
        len: usize,
        head: Option<CellId>,
        tail: Option<CellId>,
    },

    #[error("link points at vacant slot {0}")]
    Dangling(usize),

    #[error("cell {cell} has back link {found:?}, expected {expected:?}")]
    BrokenBackLink {
        cell: usize,
        expected: Option<CellId>,
        found: Option<CellId>,
    },

    #[error("forward walk visited {walked} cells, expected {len}")]
    ForwardLength { walked: usize, len: usize },

    #[error("backward walk visited {walked} cells, expected {len}")]
    BackwardLength { walked: usize, len: usize },
}

/// Doubly linked chain of characters stored in an arena
#[derive(Debug, Clone, Default)]
pub struct CellChain {
    slots: Vec<Slot>,
    free_head: Option<usize>,
    head: Option<CellId>,
    tail: Option<CellId>,
    len: usize,
}

impl CellChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn head(&self) -> Option<CellId> {
        self.head
    }

    pub fn tail(&self) -> Option<CellId> {
        self.tail
    }

    /// Number of arena slots, occupied or vacant
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        match self.slots.get(id.0) {
            Some(Slot::Occupied(cell)) => Some(cell),
            _ => None,
        }
    }

    /// Locate the cell at a logical index.
    ///
    /// Walks from whichever end of the chain is nearer. Returns `None` when
    /// `index >= len`.
    pub fn locate(&self, index: usize) -> Option<CellId> {
        if index >= self.len {
            return None;
        }

        if index <= self.len / 2 {
            let mut current = self.head?;
            for _ in 0..index {
                current = self.occupied(current).next?;
            }
            Some(current)
        } else {
            let mut current = self.tail?;
            for _ in 0..(self.len - 1 - index) {
                current = self.occupied(current).prev?;
            }
            Some(current)
        }
    }

    /// Splice a new cell in before `anchor`, or at the tail when `anchor` is
    /// `None`.
    pub fn splice_before(&mut self, anchor: Option<CellId>, ch: char) -> CellId {
        let prev = match anchor {
            Some(anchor) => self.occupied(anchor).prev,
            None => self.tail,
        };

        let id = self.allocate(Cell {
            ch,
            prev,
            next: anchor,
        });

        match prev {
            Some(prev) => self.occupied_mut(prev).next = Some(id),
            None => self.head = Some(id),
        }
        match anchor {
            Some(anchor) => self.occupied_mut(anchor).prev = Some(id),
            None => self.tail = Some(id),
        }

        self.len += 1;
        id
    }

    /// Remove a cell from the chain, repairing both neighbours.
    ///
    /// Returns `None` if `id` does not refer to a live cell.
    pub fn unsplice(&mut self, id: CellId) -> Option<char> {
        if !matches!(self.slots.get(id.0), Some(Slot::Occupied(_))) {
            return None;
        }
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        let Slot::Occupied(cell) = std::mem::replace(&mut self.slots[id.0], vacant) else {
            return None;
        };
        self.free_head = Some(id.0);

        match cell.prev {
            Some(prev) => self.occupied_mut(prev).next = cell.next,
            None => self.head = cell.next,
        }
        match cell.next {
            Some(next) => self.occupied_mut(next).prev = cell.prev,
            None => self.tail = cell.prev,
        }

        self.len -= 1;
        Some(cell.ch)
    }

    /// Drop every cell and release the arena
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Characters from head to tail
    pub fn iter(&self) -> Chars<'_> {
        Chars {
            chain: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Characters from tail to head
    pub fn iter_rev(&self) -> std::iter::Rev<Chars<'_>> {
        self.iter().rev()
    }

    /// Verify that the chain is acyclic and both walks agree with `len`.
    pub fn check_links(&self) -> Result<(), ChainError> {
        let ends_ok = match (self.head, self.tail) {
            (None, None) => self.len == 0,
            (Some(_), Some(_)) => self.len > 0,
            _ => false,
        };
        if !ends_ok {
            return Err(ChainError::Ends {
                len: self.len,
                head: self.head,
                tail: self.tail,
            });
        }

        // A walk longer than the arena means a cycle.
        let limit = self.slots.len();

        let mut walked = 0;
        let mut expected_prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let cell = self.cell(id).ok_or(ChainError::Dangling(id.0))?;
            if cell.prev != expected_prev {
                return Err(ChainError::BrokenBackLink {
                    cell: id.0,
                    expected: expected_prev,
                    found: cell.prev,
                });
            }
            walked += 1;
            if walked > limit {
                break;
            }
            expected_prev = Some(id);
            current = cell.next;
        }
        if walked != self.len || expected_prev != self.tail {
            return Err(ChainError::ForwardLength {
                walked,
                len: self.len,
            });
        }

        let mut walked = 0;
        let mut last = None;
        let mut current = self.tail;
        while let Some(id) = current {
            let cell = self.cell(id).ok_or(ChainError::Dangling(id.0))?;
            walked += 1;
            if walked > limit {
                break;
            }
            last = Some(id);
            current = cell.prev;
        }
        if walked != self.len || last != self.head {
            return Err(ChainError::BackwardLength {
                walked,
                len: self.len,
            });
        }

        Ok(())
    }

    fn allocate(&mut self, cell: Cell) -> CellId {
        match self.free_head {
            Some(index) => {
                self.free_head = match self.slots[index] {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied(_) => None,
                };
                self.slots[index] = Slot::Occupied(cell);
                CellId(index)
            }
            None => {
                self.slots.push(Slot::Occupied(cell));
                CellId(self.slots.len() - 1)
            }
        }
    }

    // Links only ever point at live cells; anything else is a chain bug.
    fn occupied(&self, id: CellId) -> &Cell {
        match &self.slots[id.0] {
            Slot::Occupied(cell) => cell,
            Slot::Vacant { .. } => panic!("cell chain link to vacant slot {}", id.0),
        }
    }

    fn occupied_mut(&mut self, id: CellId) -> &mut Cell {
        match &mut self.slots[id.0] {
            Slot::Occupied(cell) => cell,
            Slot::Vacant { .. } => panic!("cell chain link to vacant slot {}", id.0),
        }
    }
}

/// Double-ended iterator over the characters of a [`CellChain`]
pub struct Chars<'a> {
    chain: &'a CellChain,
    front: Option<CellId>,
    back: Option<CellId>,
    remaining: usize,
}

impl Iterator for Chars<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        if self.remaining == 0 {
            return None;
        }
        let cell = self.chain.cell(self.front?)?;
        self.front = cell.next;
        self.remaining -= 1;
        Some(cell.ch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Chars<'_> {
    fn next_back(&mut self) -> Option<char> {
        if self.remaining == 0 {
            return None;
        }
        let cell = self.chain.cell(self.back?)?;
        self.back = cell.prev;
        self.remaining -= 1;
        Some(cell.ch)
    }
}

impl ExactSizeIterator for Chars<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_of(text: &str) -> CellChain {
        let mut chain = CellChain::new();
        for ch in text.chars() {
            chain.splice_before(None, ch);
        }
        chain
    }

    fn collect(chain: &CellChain) -> String {
        chain.iter().collect()
    }

    #[test]
    fn test_empty_chain() {
        let chain = CellChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.head(), None);
        assert_eq!(chain.tail(), None);
        assert_eq!(chain.locate(0), None);
        assert_eq!(chain.check_links(), Ok(()));
    }

    #[test]
    fn test_append_and_iterate() {
        let chain = chain_of("abc");
        assert_eq!(chain.len(), 3);
        assert_eq!(collect(&chain), "abc");
        assert_eq!(chain.iter_rev().collect::<String>(), "cba");
        assert_eq!(chain.check_links(), Ok(()));
    }

    #[test]
    fn test_splice_before_head() {
        let mut chain = chain_of("bc");
        let head = chain.head();
        chain.splice_before(head, 'a');
        assert_eq!(collect(&chain), "abc");
        assert_eq!(chain.check_links(), Ok(()));
    }

    #[test]
    fn test_splice_in_middle() {
        let mut chain = chain_of("ac");
        let anchor = chain.locate(1);
        chain.splice_before(anchor, 'b');
        assert_eq!(collect(&chain), "abc");
        assert_eq!(chain.check_links(), Ok(()));
    }

    #[test]
    fn test_locate_from_both_ends() {
        let chain = chain_of("abcdefg");
        for (i, expected) in "abcdefg".chars().enumerate() {
            let id = chain.locate(i).unwrap();
            assert_eq!(chain.cell(id).unwrap().ch, expected);
        }
        assert_eq!(chain.locate(7), None);
    }

    #[test]
    fn test_unsplice_head_middle_tail() {
        let mut chain = chain_of("abcde");

        let head = chain.head().unwrap();
        assert_eq!(chain.unsplice(head), Some('a'));
        assert_eq!(collect(&chain), "bcde");

        let middle = chain.locate(1).unwrap();
        assert_eq!(chain.unsplice(middle), Some('c'));
        assert_eq!(collect(&chain), "bde");

        let tail = chain.tail().unwrap();
        assert_eq!(chain.unsplice(tail), Some('e'));
        assert_eq!(collect(&chain), "bd");

        assert_eq!(chain.check_links(), Ok(()));
    }

    #[test]
    fn test_unsplice_last_cell_empties_chain() {
        let mut chain = chain_of("x");
        let id = chain.head().unwrap();
        assert_eq!(chain.unsplice(id), Some('x'));
        assert!(chain.is_empty());
        assert_eq!(chain.head(), None);
        assert_eq!(chain.tail(), None);
        assert_eq!(chain.check_links(), Ok(()));
    }

    #[test]
    fn test_unsplice_vacant_slot() {
        let mut chain = chain_of("ab");
        let id = chain.head().unwrap();
        chain.unsplice(id);
        assert_eq!(chain.unsplice(id), None);
        assert_eq!(collect(&chain), "b");
    }

    #[test]
    fn test_vacant_slots_are_reused() {
        let mut chain = chain_of("abc");
        let id = chain.locate(1).unwrap();
        chain.unsplice(id);
        assert_eq!(chain.slot_count(), 3);

        let anchor = chain.locate(1);
        let reused = chain.splice_before(anchor, 'B');
        assert_eq!(reused, id);
        assert_eq!(chain.slot_count(), 3);
        assert_eq!(collect(&chain), "aBc");
        assert_eq!(chain.check_links(), Ok(()));
    }

    #[test]
    fn test_clear() {
        let mut chain = chain_of("hello");
        chain.clear();
        assert!(chain.is_empty());
        assert_eq!(chain.slot_count(), 0);
        assert_eq!(collect(&chain), "");
        assert_eq!(chain.check_links(), Ok(()));
    }

    #[test]
    fn test_double_ended_iteration_meets_in_middle() {
        let chain = chain_of("abcd");
        let mut iter = chain.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some('a'));
        assert_eq!(iter.next_back(), Some('d'));
        assert_eq!(iter.next(), Some('b'));
        assert_eq!(iter.next_back(), Some('c'));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn test_check_links_detects_bad_length() {
        let mut chain = chain_of("abc");
        chain.len = 2;
        assert!(matches!(
            chain.check_links(),
            Err(ChainError::ForwardLength { walked: 3, len: 2 })
        ));
    }

    #[test]
    fn test_check_links_detects_bad_back_link() {
        let mut chain = chain_of("abc");
        let tail = chain.tail().unwrap();
        chain.occupied_mut(tail).prev = None;
        assert!(matches!(
            chain.check_links(),
            Err(ChainError::BrokenBackLink { .. })
        ));
    }

    #[test]
    fn test_check_links_detects_missing_ends() {
        let mut chain = chain_of("ab");
        chain.tail = None;
        assert!(matches!(chain.check_links(), Err(ChainError::Ends { .. })));
    }
}
