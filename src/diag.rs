// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Fault reporting for the terminal trap.
//!
//! When the firmware gives up it sends a one-line `error: #` report and then blinks the debug LED
//! forever. The blink pattern is a byte read as four dibits, MSB first. Each dibit is the number
//! of blinks (0–3) in one second of a four-second cycle, so `0xB3` blinks 2, 3, 0 and 3 times.

use crate::flow::ReceiveFault;

/// LED on-time of a single blink, and the gap between blinks of the same second.
pub const BLINK_MS: u32 = 100;

/// Length of one dibit slot.
pub const SLOT_MS: u32 = 1000;

/// The serial report for a fault code.
pub fn fault_report(code: u8) -> [u8; 8] {
    let mut msg = *b"error: #";
    msg[7] = code;
    msg
}

/// Debug LED pattern packed as four 2-bit blink counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkPattern(u8);

impl BlinkPattern {
    pub const fn new(pattern: u8) -> Self {
        Self(pattern)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Pattern shown by the trap for each receive fault.
    pub const fn for_fault(fault: ReceiveFault) -> Self {
        match fault {
            ReceiveFault::ParityError => Self(0b01_00_00_00),
            ReceiveFault::FrameError => Self(0b10_00_00_00),
            ReceiveFault::OverrunError => Self(0b11_00_00_00),
            ReceiveFault::BufferFull => Self(0b11_11_00_00),
        }
    }

    /// Blink count for each second of the cycle.
    pub const fn counts(self) -> [u8; 4] {
        let p = self.0;
        [p >> 6, (p >> 4) & 0x3, (p >> 2) & 0x3, p & 0x3]
    }

    /// LED steps for one four-second cycle.
    pub fn steps(self) -> Steps {
        Steps {
            counts: self.counts(),
            slot: 0,
            step: 0,
        }
    }
}

/// Drive the LED `lit` (or dark) for `duration_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkStep {
    pub lit: bool,
    pub duration_ms: u32,
}

/// Iterator over the steps of one cycle. See [`BlinkPattern::steps`].
#[derive(Debug, Clone)]
pub struct Steps {
    counts: [u8; 4],
    slot: usize,
    step: u8,
}

impl Iterator for Steps {
    type Item = BlinkStep;

    fn next(&mut self) -> Option<BlinkStep> {
        while let Some(&blinks) = self.counts.get(self.slot) {
            // A slot with k blinks is on/off pairs, the last "off" filling out the second.
            let total = if blinks == 0 { 1 } else { 2 * blinks };

            if self.step < total {
                let step = self.step;
                self.step += 1;

                let item = if blinks == 0 {
                    BlinkStep {
                        lit: false,
                        duration_ms: SLOT_MS,
                    }
                } else if step % 2 == 0 {
                    BlinkStep {
                        lit: true,
                        duration_ms: BLINK_MS,
                    }
                } else if step + 1 == total {
                    let used = (2 * u32::from(blinks) - 1) * BLINK_MS;
                    BlinkStep {
                        lit: false,
                        duration_ms: SLOT_MS - used,
                    }
                } else {
                    BlinkStep {
                        lit: false,
                        duration_ms: BLINK_MS,
                    }
                };
                return Some(item);
            }

            self.slot += 1;
            self.step = 0;
        }
        None
    }
}
