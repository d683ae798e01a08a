// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Ring buffer shared between execution contexts (e.g., the main loop and a USART interrupt).
//!
//! [`RingBuffer`] updates several fields per operation and is not safe to touch from an
//! interrupt while the main loop is mid-update. Every access here runs inside
//! `critical_section::with`, which masks interrupts on the board and takes a global lock on a
//! host. The section is released when the closure returns or unwinds.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::deque::{OperationError, RingBuffer};

pub struct SharedRingBuffer<'a> {
    inner: Mutex<RefCell<RingBuffer<'a>>>,
}

impl<'a> SharedRingBuffer<'a> {
    pub const fn new(buffer: RingBuffer<'a>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(buffer)),
        }
    }

    /// Run `f` with exclusive access to the buffer. Use this for any sequence of operations that
    /// must be seen as one step by the other context.
    ///
    /// `f` must only use the `&mut RingBuffer` it is given: calling back into this
    /// `SharedRingBuffer` from inside `f` panics, since the buffer is already borrowed.
    pub fn with<R>(&self, f: impl FnOnce(&mut RingBuffer<'a>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }

    pub fn push_back(&self, data: u8) -> Result<(), OperationError> {
        self.with(|dq| dq.push_back(data))
    }

    pub fn pop_front(&self) -> Result<u8, OperationError> {
        self.with(|dq| dq.pop_front())
    }

    pub fn len(&self) -> usize {
        self.with(|dq| dq.len())
    }

    pub fn is_empty(&self) -> bool {
        self.with(|dq| dq.is_empty())
    }

    pub fn into_inner(self) -> RingBuffer<'a> {
        self.inner.into_inner().into_inner()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn producer_and_consumer_keep_fifo_order() {
        let mut store = [0u8; 7];
        let shared = SharedRingBuffer::new(RingBuffer::new(&mut store).unwrap());
        const COUNT: usize = 2_000;

        let received = thread::scope(|s| {
            s.spawn(|| {
                for i in 0..COUNT {
                    while shared.push_back(i as u8).is_err() {
                        thread::yield_now();
                    }
                }
            });

            let consumer = s.spawn(|| {
                let mut out = Vec::with_capacity(COUNT);
                while out.len() < COUNT {
                    match shared.pop_front() {
                        Ok(b) => out.push(b),
                        Err(_) => thread::yield_now(),
                    }
                }
                out
            });

            consumer.join().unwrap()
        });

        assert!(received.iter().enumerate().all(|(i, &b)| b == i as u8));
        assert!(shared.is_empty());
    }

    #[test]
    fn with_makes_compound_updates_atomic() {
        let mut store = [0u8; 4];
        let shared = SharedRingBuffer::new(RingBuffer::new(&mut store).unwrap());

        let moved = shared.with(|dq| {
            dq.push_back(1)?;
            dq.push_back(2)?;
            dq.pop_front()
        });

        assert_eq!(moved, Ok(1));
        assert_eq!(shared.len(), 1);
        assert_eq!(shared.into_inner().peek_front(), Ok(2));
    }

    #[test]
    #[should_panic(expected = "already")]
    fn calling_back_in_from_with_panics() {
        let mut store = [0u8; 4];
        let shared = SharedRingBuffer::new(RingBuffer::new(&mut store).unwrap());
        shared.with(|_| shared.len());
    }
}
