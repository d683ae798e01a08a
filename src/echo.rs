// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Echo side of the firmware: drains staged bytes back out to the serial line.

use crate::deque::RingBuffer;
use crate::serial::ByteSink;

/// A received byte as echoed on the terminal: `<#>`.
#[inline]
pub const fn echo_frame(byte: u8) -> [u8; 3] {
    [b'<', byte, b'>']
}

/// Pop every staged byte front to back, echo it framed, then hand it to `on_byte`.
///
/// `on_byte` runs after the frame is written, which is where the board shows the byte on its
/// LEDs and paces the output. Returns the number of bytes echoed.
pub fn echo_staged<K, F>(buffer: &mut RingBuffer<'_>, sink: &mut K, mut on_byte: F) -> usize
where
    K: ByteSink + ?Sized,
    F: FnMut(u8),
{
    let mut echoed = 0;
    while let Ok(byte) = buffer.pop_front() {
        sink.write_all(&echo_frame(byte));
        on_byte(byte);
        echoed += 1;
    }
    echoed
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder(Vec<u8>);

    impl ByteSink for Recorder {
        fn write_byte(&mut self, byte: u8) {
            self.0.push(byte);
        }
    }

    #[test]
    fn frames_each_byte() {
        assert_eq!(echo_frame(b'A'), *b"<A>");
    }

    #[test]
    fn drains_in_arrival_order() {
        let mut store = [0u8; 4];
        let mut buffer = RingBuffer::new(&mut store).unwrap();
        buffer.push_back(b'o').unwrap();
        buffer.push_back(b'k').unwrap();
        buffer.push_front(b'>').unwrap();

        let mut sink = Recorder(Vec::new());
        let mut seen = Vec::new();
        let echoed = echo_staged(&mut buffer, &mut sink, |b| seen.push(b));

        assert_eq!(echoed, 3);
        assert_eq!(sink.0, b"<>><o><k>");
        assert_eq!(seen, b">ok");
        assert!(buffer.is_empty());
    }

    #[test]
    fn empty_buffer_echoes_nothing() {
        let mut store = [0u8; 2];
        let mut buffer = RingBuffer::new(&mut store).unwrap();
        let mut sink = Recorder(Vec::new());

        assert_eq!(echo_staged(&mut buffer, &mut sink, |_| {}), 0);
        assert!(sink.0.is_empty());
    }
}
