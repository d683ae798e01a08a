// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Flow-controlled, delimiter-terminated receive sessions.
//!
//! A session stages incoming bytes in a [`RingBuffer`] and stops at whichever comes first:
//!
//! - the delimiter byte (end of record), or
//! - the buffer reaching its fill threshold.
//!
//! The peer is invited with a resume byte (XON) when a session opens and held off with a pause
//! byte (XOFF) once it completes, so the consumer can drain the buffer at its own pace. A fault
//! ends the session without a pause byte.
//!
//! ```text
//!  Idle ──resume──▶ Receiving ──delimiter / threshold──pause──▶ Completed
//!                       │
//!                       └──parity / frame / overrun / full──▶ Faulted
//! ```

use log::{debug, trace, warn};
use thiserror::Error;

use crate::deque::RingBuffer;
use crate::serial::{ByteSink, ByteSource, XOFF, XON};

/// Faults that end a receive session.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ReceiveFault {
    #[error("parity error")]
    ParityError,

    #[error("frame error")]
    FrameError,

    #[error("overrun error")]
    OverrunError,

    #[error("receive buffer full")]
    BufferFull,
}

impl ReceiveFault {
    /// ASCII code reported on the serial line for this fault.
    pub fn code(self) -> u8 {
        match self {
            Self::ParityError => b'1',
            Self::FrameError => b'2',
            Self::OverrunError => b'3',
            Self::BufferFull => b'4',
        }
    }
}

/// Error returned by [`FlowControlledReceiver::receive`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ReceiveError {
    /// The session that was just run faulted.
    #[error("receive fault: {0}")]
    Fault(ReceiveFault),

    /// No session was run: an earlier fault is latched under [`FaultPolicy::Halt`].
    #[error("receiver halted after {0}")]
    Halted(ReceiveFault),
}

impl ReceiveError {
    pub fn fault(self) -> ReceiveFault {
        match self {
            Self::Fault(fault) | Self::Halted(fault) => fault,
        }
    }

    #[inline]
    pub fn code(self) -> u8 {
        self.fault().code()
    }
}

/// Invalid receiver configuration.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("threshold must be non-zero")]
    ZeroThreshold,

    #[error("threshold {threshold} exceeds buffer capacity {capacity}")]
    ThresholdExceedsCapacity { threshold: usize, capacity: usize },
}

impl ConfigError {
    /// ASCII code reported on the serial line. Both cases are bounds errors.
    pub fn code(self) -> u8 {
        b'1'
    }
}

/// What a receiver does when asked to start a session after a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaultPolicy {
    /// Keep the fault latched and refuse every further session.
    #[default]
    Halt,
    /// Discard the staged bytes and start a fresh session.
    ResetAndResume,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Receiving,
    Completed,
    Faulted(ReceiveFault),
}

/// Why a session completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Delimiter,
    Threshold,
}

/// Summary of a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub reason: StopReason,
    /// Bytes read from the source during this session.
    pub received: usize,
    /// Bytes staged in the buffer when the session ended.
    pub staged: usize,
}

/// Receiver settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiverConfig {
    threshold: usize,
    delimiter: u8,
    resume: u8,
    pause: u8,
    fault_policy: FaultPolicy,
}

impl ReceiverConfig {
    /// Line-oriented defaults: `\n` delimiter, XON/XOFF control bytes, halt on fault.
    pub const fn new(threshold: usize) -> Self {
        Self {
            threshold,
            delimiter: b'\n',
            resume: XON,
            pause: XOFF,
            fault_policy: FaultPolicy::Halt,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Override the bytes written when a session opens (`resume`) and completes (`pause`).
    pub fn with_control_bytes(mut self, resume: u8, pause: u8) -> Self {
        self.resume = resume;
        self.pause = pause;
        self
    }

    pub fn with_fault_policy(mut self, policy: FaultPolicy) -> Self {
        self.fault_policy = policy;
        self
    }

    #[inline]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    #[inline]
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    #[inline]
    pub fn resume(&self) -> u8 {
        self.resume
    }

    #[inline]
    pub fn pause(&self) -> u8 {
        self.pause
    }

    #[inline]
    pub fn fault_policy(&self) -> FaultPolicy {
        self.fault_policy
    }

    /// Check the settings against a buffer capacity.
    pub fn validate(&self, capacity: usize) -> Result<(), ConfigError> {
        if self.threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }
        if self.threshold > capacity {
            return Err(ConfigError::ThresholdExceedsCapacity {
                threshold: self.threshold,
                capacity,
            });
        }
        Ok(())
    }
}

/// Receive loop that stages bytes into a [`RingBuffer`] under XON/XOFF flow control.
#[derive(Debug)]
pub struct FlowControlledReceiver<'a> {
    buffer: RingBuffer<'a>,
    config: ReceiverConfig,
    state: State,
}

impl<'a> FlowControlledReceiver<'a> {
    pub fn new(buffer: RingBuffer<'a>, config: ReceiverConfig) -> Result<Self, ConfigError> {
        config.validate(buffer.capacity())?;

        Ok(Self {
            buffer,
            config,
            state: State::Idle,
        })
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    #[inline]
    pub fn config(&self) -> &ReceiverConfig {
        &self.config
    }

    #[inline]
    pub fn buffer(&self) -> &RingBuffer<'a> {
        &self.buffer
    }

    /// Access the staged bytes, typically to drain them between sessions.
    #[inline]
    pub fn buffer_mut(&mut self) -> &mut RingBuffer<'a> {
        &mut self.buffer
    }

    pub fn into_buffer(self) -> RingBuffer<'a> {
        self.buffer
    }

    /// Run one receive session to completion or fault.
    ///
    /// Blocks on `source` until the delimiter arrives or the staged length reaches the
    /// threshold. Bytes already in the buffer count toward the threshold, so drain before
    /// calling again.
    pub fn receive<S, K>(
        &mut self,
        source: &mut S,
        sink: &mut K,
    ) -> Result<Completion, ReceiveError>
    where
        S: ByteSource + ?Sized,
        K: ByteSink + ?Sized,
    {
        if let State::Faulted(fault) = self.state {
            match self.config.fault_policy {
                FaultPolicy::Halt => {
                    warn!("session refused, receiver halted after {}", fault);
                    return Err(ReceiveError::Halted(fault));
                }
                FaultPolicy::ResetAndResume => {
                    debug!(
                        "resetting after {}, discarding {} staged bytes",
                        fault,
                        self.buffer.len()
                    );
                    self.buffer.clear();
                }
            }
        }

        self.state = State::Receiving;
        sink.write_byte(self.config.resume);
        debug!("session open, {} bytes already staged", self.buffer.len());

        let mut received = 0;
        loop {
            let (byte, diagnostics) = source.read_byte();
            received += 1;

            if let Some(fault) = diagnostics.fault() {
                return Err(self.fault(fault, received));
            }

            if self.buffer.push_back(byte).is_err() {
                return Err(self.fault(ReceiveFault::BufferFull, received));
            }
            trace!("rx {:#04x}, {} staged", byte, self.buffer.len());

            let reason = if byte == self.config.delimiter {
                StopReason::Delimiter
            } else if self.buffer.len() >= self.config.threshold {
                StopReason::Threshold
            } else {
                continue;
            };

            sink.write_byte(self.config.pause);
            self.state = State::Completed;
            debug!(
                "session complete ({:?}) after {} bytes, {} staged",
                reason,
                received,
                self.buffer.len()
            );

            return Ok(Completion {
                reason,
                received,
                staged: self.buffer.len(),
            });
        }
    }

    fn fault(&mut self, fault: ReceiveFault, received: usize) -> ReceiveError {
        warn!("session faulted on byte {}: {}", received, fault);
        self.state = State::Faulted(fault);
        ReceiveError::Fault(fault)
    }
}
