// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Byte-level serial interfaces.
//!
//! The receive core never touches a peripheral. It reads through a [`ByteSource`] and writes
//! through a [`ByteSink`], both of which block until one byte has moved. `hw::usart` provides the
//! STM32 implementations; tests provide scripted ones.

use bitflags::bitflags;

use crate::flow::ReceiveFault;

/// Software flow control: invite the peer to transmit.
pub const XON: u8 = 0x11;

/// Software flow control: ask the peer to stop transmitting.
pub const XOFF: u8 = 0x13;

bitflags! {
    /// Fault flags the peripheral reports alongside each received byte.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Diagnostics: u8 {
        const PARITY_ERROR = 1 << 0;
        const FRAME_ERROR = 1 << 1;
        const OVERRUN_ERROR = 1 << 2;
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::empty()
    }
}

impl Diagnostics {
    #[inline]
    pub fn parity_error(self) -> bool {
        self.contains(Self::PARITY_ERROR)
    }

    #[inline]
    pub fn frame_error(self) -> bool {
        self.contains(Self::FRAME_ERROR)
    }

    #[inline]
    pub fn overrun_error(self) -> bool {
        self.contains(Self::OVERRUN_ERROR)
    }

    /// The fault to raise for these flags, if any.
    ///
    /// When several flags are set the first one in peripheral status order wins: parity, then
    /// frame, then overrun.
    pub fn fault(self) -> Option<ReceiveFault> {
        if self.parity_error() {
            Some(ReceiveFault::ParityError)
        } else if self.frame_error() {
            Some(ReceiveFault::FrameError)
        } else if self.overrun_error() {
            Some(ReceiveFault::OverrunError)
        } else {
            None
        }
    }
}

/// Blocking source of received bytes.
pub trait ByteSource {
    /// Wait for one byte. The byte is unspecified when `Diagnostics` reports a fault.
    fn read_byte(&mut self) -> (u8, Diagnostics);
}

/// Blocking sink for transmitted bytes.
pub trait ByteSink {
    /// Wait until the sink accepts one byte.
    fn write_byte(&mut self, byte: u8);

    fn write_all(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_byte(b);
        }
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &mut T {
    #[inline]
    fn read_byte(&mut self) -> (u8, Diagnostics) {
        (**self).read_byte()
    }
}

impl<T: ByteSink + ?Sized> ByteSink for &mut T {
    #[inline]
    fn write_byte(&mut self, byte: u8) {
        (**self).write_byte(byte)
    }
}
