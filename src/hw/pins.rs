// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F767ZI Nucleo devboard.

use stm32f7xx_hal::{
    gpio::{gpiob, gpiod, Alternate, Output, PushPull},
    pac,
    prelude::*,
};

/// All pins used by the echo firmware. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOB, dp.GPIOD);
/// ```
pub struct BoardPins {
    pub leds: Leds,
    pub usart3: Usart3Pins,
}

pub struct Leds {
    pub green: gpiob::PB0<Output<PushPull>>, // LD1, echo bit 0
    pub blue: gpiob::PB7<Output<PushPull>>,  // LD2, echo bit 1
    pub red: gpiob::PB14<Output<PushPull>>,  // LD3, fault
}

/// USART3, wired to the ST-LINK virtual COM port.
pub struct Usart3Pins {
    pub tx: gpiod::PD8<Alternate<7>>,
    pub rx: gpiod::PD9<Alternate<7>>,
}

impl BoardPins {
    pub fn new(gpiob: pac::GPIOB, gpiod: pac::GPIOD) -> Self {
        let gpiob = gpiob.split();
        let gpiod = gpiod.split();

        Self {
            leds: Leds {
                green: gpiob.pb0.into_push_pull_output(),
                blue: gpiob.pb7.into_push_pull_output(),
                red: gpiob.pb14.into_push_pull_output(),
            },

            usart3: Usart3Pins {
                tx: gpiod.pd8.into_alternate::<7>(),
                rx: gpiod.pd9.into_alternate::<7>(),
            },
        }
    }
}
