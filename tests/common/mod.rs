/*
    lgptape

    Copyright 2024 Daniel Balsom

    Permission is hereby granted, free of charge, to any person obtaining a
    copy of this software and associated documentation files (the “Software”),
    to deal in the Software without restriction, including without limitation
    the rights to use, copy, modify, merge, publish, distribute, sublicense,
    and/or sell copies of the Software, and to permit persons to whom the
    Software is furnished to do so, subject to the following conditions:

    The above copyright notice and this permission notice shall be included in
    all copies or substantial portions of the Software.

    THE SOFTWARE IS PROVIDED “AS IS”, WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
    IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
    FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
    AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
    LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
    FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
    DEALINGS IN THE SOFTWARE.

    --------------------------------------------------------------------------

    tests/common/mod.rs

    Common support routines for tests
*/
#![allow(dead_code)]

use std::{collections::VecDeque, path::Path};

use hex::encode;
use lgptape::{CancelSignal, TapeError, TapeReader};
use sha1::{Digest, Sha1};

pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn compute_file_hash<P: AsRef<Path>>(path: P) -> String {
    let file_buf = std::fs::read(path).unwrap();
    compute_slice_hash(&file_buf)
}

pub fn compute_slice_hash(slice: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(slice);
    let result = hasher.finalize();

    encode(result)
}

/// A short tape: leader, "Ab 0" with shifts, a carriage return, trailer.
/// Raw bytes are the preimages of the Flexowriter codes under the unscrambler.
pub const SAMPLE_TAPE: [u8; 12] = [
    0x00, 0x00, // leader
    0x04, // capital shift   (flex 0x08)
    0x3C, // A               (flex 0x39)
    0x02, // lowercase shift (flex 0x04)
    0x22, // b               (flex 0x05)
    0x21, // space           (flex 0x03)
    0x01, // 0               (flex 0x02)
    0x08, // carriage return (flex 0x10)
    0x0E, // unassigned      (flex 0x1C)
    0x00, 0x00, // trailer
];

pub const SAMPLE_TAPE_FLEX: [u8; 12] = [0x00, 0x00, 0x08, 0x39, 0x04, 0x05, 0x03, 0x02, 0x10, 0x1C, 0x00, 0x00];
pub const SAMPLE_TAPE_ASCII: [u8; 9] = [0x00, 0x00, b'A', b'b', b' ', b'0', b'\r', 0x00, 0x00];

/// A scripted tape reader.
///
/// The tape is "inserted" after `polls_before_tape` calls to `bytes_available`, after which the
/// bytes are delivered one at a time. Once the tape is exhausted every read times out.
pub struct MockTapeReader {
    tape: VecDeque<u8>,
    polls_before_tape: usize,
    pub polls: usize,
    pub reads: usize,
    pub ready: bool,
    pub ready_history: Vec<bool>,
}

impl MockTapeReader {
    pub fn new(tape: &[u8]) -> Self {
        MockTapeReader::with_delay(tape, 0)
    }

    pub fn with_delay(tape: &[u8], polls_before_tape: usize) -> Self {
        MockTapeReader {
            tape: tape.iter().copied().collect(),
            polls_before_tape,
            polls: 0,
            reads: 0,
            ready: false,
            ready_history: Vec::new(),
        }
    }

    /// Load another tape into the reader.
    pub fn load(&mut self, tape: &[u8]) {
        self.tape = tape.iter().copied().collect();
        self.polls = 0;
    }
}

impl TapeReader for MockTapeReader {
    fn set_ready(&mut self, ready: bool) -> Result<(), TapeError> {
        self.ready = ready;
        self.ready_history.push(ready);
        Ok(())
    }

    fn bytes_available(&mut self) -> Result<usize, TapeError> {
        self.polls += 1;
        if self.polls > self.polls_before_tape {
            Ok(self.tape.len())
        }
        else {
            Ok(0)
        }
    }

    fn read_byte(&mut self) -> Result<Option<u8>, TapeError> {
        assert!(self.ready, "read from tape reader while not ready");
        self.reads += 1;
        Ok(self.tape.pop_front())
    }
}

/// A tape reader whose reads fail after a number of bytes.
pub struct FailingTapeReader {
    pub inner: MockTapeReader,
    pub fail_after: usize,
}

impl TapeReader for FailingTapeReader {
    fn set_ready(&mut self, ready: bool) -> Result<(), TapeError> {
        self.inner.set_ready(ready)
    }

    fn bytes_available(&mut self) -> Result<usize, TapeError> {
        self.inner.bytes_available()
    }

    fn read_byte(&mut self) -> Result<Option<u8>, TapeError> {
        if self.inner.reads >= self.fail_after {
            return Err(TapeError::PortError("device disconnected".to_string()));
        }
        self.inner.read_byte()
    }
}

/// A cancel signal that fires on the n-th check (counting from 1) and stays set.
pub struct CancelAfter {
    remaining: usize,
    pub checks: usize,
}

impl CancelAfter {
    pub fn new(checks: usize) -> Self {
        CancelAfter { remaining: checks, checks: 0 }
    }
}

impl CancelSignal for CancelAfter {
    fn is_cancelled(&mut self) -> Result<bool, TapeError> {
        self.checks += 1;
        if self.remaining > 0 {
            self.remaining -= 1;
        }
        Ok(self.remaining == 0)
    }
}
