// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Fixed-capacity double-ended byte queue over caller-owned storage.
//!
//! The queue never allocates. It borrows a byte slice for its entire lifetime and tracks its
//! state with 8-bit counters, so the capacity is limited to [`MAX_CAPACITY`].
//!
//! Index movement at each end:
//!
//! - push back: place, then move forward
//! - push front: move backward, then place
//! - pop back: move backward, then take
//! - pop front: take, then move forward
//!
//! `front == back` holds both when the queue is empty and when it is full. Only `len` tells the
//! two apart.

use thiserror::Error;

/// Counter type for the length and both indices.
type Index = u8;

/// Largest capacity the length counter can represent.
pub const MAX_CAPACITY: usize = Index::MAX as usize;

/// Errors raised while constructing a [`RingBuffer`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("backing store is absent")]
    NullBackingStore,

    #[error("capacity must be non-zero")]
    ZeroCapacity,

    #[error("capacity {capacity} exceeds the maximum of {max}", max = MAX_CAPACITY)]
    CapacityOverflow { capacity: usize },

    #[error("backing store holds {len} bytes but capacity {capacity} was requested")]
    StoreTooSmall { capacity: usize, len: usize },
}

impl ConstructionError {
    /// ASCII code reported on the serial line for this error.
    pub fn code(self) -> u8 {
        match self {
            Self::ZeroCapacity | Self::CapacityOverflow { .. } => b'1',
            Self::NullBackingStore | Self::StoreTooSmall { .. } => b'2',
        }
    }
}

/// Errors raised by push/pop/peek. The queue is left untouched when one is returned.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OperationError {
    #[error("queue is full")]
    Full,

    #[error("queue is empty")]
    Empty,
}

impl OperationError {
    /// ASCII code reported on the serial line for this error.
    pub fn code(self) -> u8 {
        match self {
            Self::Full => b'3',
            Self::Empty => b'4',
        }
    }
}

/// Double-ended queue of bytes backed by a borrowed slice.
#[derive(Debug)]
pub struct RingBuffer<'a> {
    buf: &'a mut [u8],
    cap: Index,
    len: Index,
    /// Slot holding the front element.
    front: Index,
    /// Slot the next `push_back` writes to.
    back: Index,
}

impl<'a> RingBuffer<'a> {
    /// Build a queue over the whole of `store`.
    pub fn new(store: &'a mut [u8]) -> Result<Self, ConstructionError> {
        let capacity = store.len();
        Self::from_parts(Some(store), capacity)
    }

    /// Build a queue over the first `capacity` bytes of `store`.
    ///
    /// Checks run in order: absent store, zero capacity, counter overflow, short store. Nothing
    /// is borrowed past the call when an error is returned.
    pub fn from_parts(
        store: Option<&'a mut [u8]>,
        capacity: usize,
    ) -> Result<Self, ConstructionError> {
        let store = store.ok_or(ConstructionError::NullBackingStore)?;

        if capacity == 0 {
            return Err(ConstructionError::ZeroCapacity);
        }

        let cap = Index::try_from(capacity)
            .map_err(|_| ConstructionError::CapacityOverflow { capacity })?;

        if store.len() < capacity {
            return Err(ConstructionError::StoreTooSmall {
                capacity,
                len: store.len(),
            });
        }

        Ok(Self {
            buf: &mut store[..capacity],
            cap,
            len: 0,
            front: 0,
            back: 0,
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        usize::from(self.cap)
    }

    #[inline]
    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.cap
    }

    /// Append a byte at the back.
    pub fn push_back(&mut self, data: u8) -> Result<(), OperationError> {
        if self.is_full() {
            return Err(OperationError::Full);
        }

        self.buf[usize::from(self.back)] = data;
        self.back = self.advance(self.back);
        self.len += 1;
        Ok(())
    }

    /// Prepend a byte at the front.
    pub fn push_front(&mut self, data: u8) -> Result<(), OperationError> {
        if self.is_full() {
            return Err(OperationError::Full);
        }

        self.front = self.retreat(self.front);
        self.buf[usize::from(self.front)] = data;
        self.len += 1;
        Ok(())
    }

    /// Remove and return the back byte.
    pub fn pop_back(&mut self) -> Result<u8, OperationError> {
        if self.is_empty() {
            return Err(OperationError::Empty);
        }

        self.back = self.retreat(self.back);
        self.len -= 1;
        Ok(self.buf[usize::from(self.back)])
    }

    /// Remove and return the front byte.
    pub fn pop_front(&mut self) -> Result<u8, OperationError> {
        if self.is_empty() {
            return Err(OperationError::Empty);
        }

        let data = self.buf[usize::from(self.front)];
        self.front = self.advance(self.front);
        self.len -= 1;
        Ok(data)
    }

    pub fn peek_front(&self) -> Result<u8, OperationError> {
        if self.is_empty() {
            return Err(OperationError::Empty);
        }
        Ok(self.buf[usize::from(self.front)])
    }

    pub fn peek_back(&self) -> Result<u8, OperationError> {
        if self.is_empty() {
            return Err(OperationError::Empty);
        }
        Ok(self.buf[usize::from(self.retreat(self.back))])
    }

    /// Drop every element. The backing bytes are not scrubbed.
    pub fn clear(&mut self) {
        self.len = 0;
        self.front = 0;
        self.back = 0;
    }

    /// Iterate front to back without consuming anything.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        let cap = self.capacity();
        let front = usize::from(self.front);
        (0..self.len()).map(move |i| self.buf[(front + i) % cap])
    }

    #[inline]
    fn advance(&self, index: Index) -> Index {
        // Result is below `cap`, which fits in `Index`.
        ((usize::from(index) + 1) % self.capacity()) as Index
    }

    #[inline]
    fn retreat(&self, index: Index) -> Index {
        let cap = self.capacity();
        ((usize::from(index) + cap - 1) % cap) as Index
    }
}
