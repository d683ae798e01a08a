// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Firmware configuration.

use crate::flow::{FaultPolicy, ReceiverConfig};

/// Debug terminal baud rate.
pub const BAUD_RATE: u32 = 115_200;

/// Receive buffer size in bytes.
pub const RX_CAPACITY: usize = 64;

/// Staged byte count at which a session pauses the sender.
pub const RX_THRESHOLD: usize = 32;

/// End-of-record byte.
pub const RX_DELIMITER: u8 = b'\n';

/// Pause after echoing each byte, so the LEDs can be read.
pub const ECHO_DELAY_MS: u32 = 250;

/// Receiver settings used by the firmware.
pub fn receiver_config() -> ReceiverConfig {
    ReceiverConfig::new(RX_THRESHOLD)
        .with_delimiter(RX_DELIMITER)
        .with_fault_policy(FaultPolicy::Halt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn firmware_config_fits_buffer() {
        assert_eq!(receiver_config().validate(RX_CAPACITY), Ok(()));
        assert!(RX_CAPACITY <= crate::deque::MAX_CAPACITY);
    }
}
