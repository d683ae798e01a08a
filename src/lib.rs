// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # UART Echo Firmware
//!
//! A flow-controlled serial echo for the STM32F767ZI Nucleo, written in Rust.
//!
//! Bytes arrive on the ST-LINK virtual COM port, are staged in a fixed ring buffer until a line
//! ends (or the buffer reaches its fill threshold), and are then echoed back one at a time while
//! the sender is held off with XOFF. Receive faults halt the board with a blinking debug LED.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`deque`] | Fixed-capacity double-ended byte queue over caller-owned storage |
//! | [`flow`] | XON/XOFF flow-controlled, delimiter-terminated receive sessions |
//! | [`serial`] | Byte source/sink traits and receive diagnostics |
//! | [`shared`] | Critical-section wrapper for a buffer shared with an interrupt |
//! | [`echo`] | Draining staged bytes back to the terminal |
//! | [`diag`] | Fault report and debug LED blink patterns |
//! | [`config`] | Firmware constants |
//! | `hw` | MCU-level wrappers around USART, GPIO and LEDs (feature `board`) |
//!
//! ## Getting Started
//!
//! Run the portable tests on the host:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features board --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod deque;
pub mod diag;
pub mod echo;
pub mod flow;
pub mod serial;
pub mod shared;

#[cfg(feature = "board")]
pub mod hw;
