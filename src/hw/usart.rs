// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART abstraction layer.
//!
//! [`Usart`] owns the transmit half and doubles as the [`ByteSink`] for flow-control bytes and
//! echoed frames. [`UsartRx`] owns the receive half and is the [`ByteSource`] for receive
//! sessions. HAL receive errors are translated into [`Diagnostics`] flags.
//!
//! Note: When using `writeln!`, be sure to include `\r` (CR) in the format string to ensure correct
//! line endings on the terminal.
//!
//! To access the terminal on the host machine, connect to the ST-LINK USB port and use
//! ```text
//! $ screen /dev/tty.usbmodem* <baud_rate>
//! ```
//!
//! Typing `Ctrl+Q` / `Ctrl+S` in the terminal sends XON / XOFF by hand.

use core::fmt;
use nb::block;

use stm32f7xx_hal::{
    prelude::*,
    serial::{self, Instance, Pins, Rx, Serial, Tx},
};

use crate::serial::{ByteSink, ByteSource, Diagnostics};

pub struct Usart<U: Instance> {
    tx: Tx<U>,
}

/// Receive half of a split [`Serial`].
pub struct UsartRx<U: Instance> {
    rx: Rx<U>,
}

impl<U: Instance> Usart<U> {
    /// Split a configured serial port into its transmit and receive wrappers.
    pub fn split<PINS: Pins<U>>(serial: Serial<U, PINS>) -> (Self, UsartRx<U>) {
        let (tx, rx) = serial.split();
        (Self { tx }, UsartRx { rx })
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
    }

    /// Block until the hardware TX FIFO/drain is flushed.
    #[inline]
    pub fn flush(&mut self) {
        let _ = block!(self.tx.flush());
    }
}

impl<U: Instance> ByteSink for Usart<U> {
    #[inline]
    fn write_byte(&mut self, byte: u8) {
        Usart::write_byte(self, byte);
    }
}

// Implement `core::fmt::Write` so we can use `write!` / `writeln!` on `Usart`.
impl<U: Instance> fmt::Write for Usart<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Usart::write_str(self, s);
        Ok(())
    }
}

impl<U: Instance> ByteSource for UsartRx<U> {
    /// Busy-wait for one frame. On a receive error the HAL has already discarded the data
    /// register, so the returned byte is 0.
    fn read_byte(&mut self) -> (u8, Diagnostics) {
        match block!(self.rx.read()) {
            Ok(byte) => (byte, Diagnostics::empty()),
            Err(err) => (0, diagnostics_for(err)),
        }
    }
}

fn diagnostics_for(err: serial::Error) -> Diagnostics {
    match err {
        serial::Error::Parity => Diagnostics::PARITY_ERROR,
        serial::Error::Framing => Diagnostics::FRAME_ERROR,
        serial::Error::Overrun => Diagnostics::OVERRUN_ERROR,
        // Line noise corrupts the frame the same way a bad stop bit does.
        _ => Diagnostics::FRAME_ERROR,
    }
}
