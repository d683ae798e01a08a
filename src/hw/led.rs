// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Board LEDs: single indicators and a small bar that shows the low bits of a byte.

use stm32f7xx_hal::gpio::{self, Output, PushPull};

/// Active-high LED on any GPIO pin.
pub struct Led<const P: char, const N: u8> {
    pin: gpio::Pin<P, N, Output<PushPull>>,
}

impl<const P: char, const N: u8> Led<P, N> {
    /// Wrap a pin and switch the LED off.
    pub fn new<MODE>(pin: gpio::Pin<P, N, MODE>) -> Self {
        let mut pin = pin.into_push_pull_output();
        pin.set_low();
        Self { pin }
    }

    /// Drive the LED logically ON (true) or OFF (false).
    pub fn set(&mut self, on: bool) {
        if on {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
    }
}

/// Two LEDs showing bit 0 and bit 1 of the last echoed byte.
pub struct LedBar<const P0: char, const N0: u8, const P1: char, const N1: u8> {
    bit0: Led<P0, N0>,
    bit1: Led<P1, N1>,
}

impl<const P0: char, const N0: u8, const P1: char, const N1: u8> LedBar<P0, N0, P1, N1> {
    pub fn new(bit0: Led<P0, N0>, bit1: Led<P1, N1>) -> Self {
        Self { bit0, bit1 }
    }

    pub fn show(&mut self, byte: u8) {
        self.bit0.set(byte & 0b01 != 0);
        self.bit1.set(byte & 0b10 != 0);
    }

    pub fn clear(&mut self) {
        self.show(0);
    }
}
