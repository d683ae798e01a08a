#![allow(dead_code)]

use std::collections::VecDeque;

use uart_echo::serial::{ByteSink, ByteSource, Diagnostics};

/// Serial line stand-in: replays scripted input and records everything written.
#[derive(Default)]
pub struct Loopback {
    input: VecDeque<(u8, Diagnostics)>,
    pub output: Vec<u8>,
    pub reads: usize,
}

impl Loopback {
    pub fn typed(text: &[u8]) -> Self {
        let mut line = Self::default();
        line.type_bytes(text);
        line
    }

    pub fn type_bytes(&mut self, text: &[u8]) {
        self.input
            .extend(text.iter().map(|&b| (b, Diagnostics::empty())));
    }

    pub fn type_faulty(&mut self, byte: u8, flags: Diagnostics) {
        self.input.push_back((byte, flags));
    }

    pub fn pending(&self) -> usize {
        self.input.len()
    }

    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }
}

impl ByteSource for Loopback {
    fn read_byte(&mut self) -> (u8, Diagnostics) {
        self.reads += 1;
        self.input
            .pop_front()
            .expect("read blocked forever: no more scripted input")
    }
}

impl ByteSink for Loopback {
    fn write_byte(&mut self, byte: u8) {
        self.output.push(byte);
    }
}

/// Separate recording sink, for when source and sink must be borrowed at once.
#[derive(Default)]
pub struct Terminal(pub Vec<u8>);

impl ByteSink for Terminal {
    fn write_byte(&mut self, byte: u8) {
        self.0.push(byte);
    }
}
