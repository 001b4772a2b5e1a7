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

    src/transcode.rs

    Chains the bit unscrambler and the Flexowriter decoder for one tape.
*/
use crate::{unscramble, FlexCode, FlexowriterDecoder, ShiftState};

/// The result of pushing one raw tape byte through a [TapeTranscoder].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Transcoded {
    pub raw:   u8,
    pub flex:  FlexCode,
    pub ascii: Option<u8>,
}

/// A [TapeTranscoder] carries the decoder state of a single tape.
/// Create a new one (or call [TapeTranscoder::reset]) for every tape.
#[derive(Clone, Debug, Default)]
pub struct TapeTranscoder {
    decoder: FlexowriterDecoder,
}

impl TapeTranscoder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn reset(&mut self) {
        self.decoder.reset();
    }

    pub fn shift_state(&self) -> ShiftState {
        self.decoder.shift_state()
    }

    pub fn push(&mut self, raw: u8) -> Transcoded {
        let flex = unscramble(raw);
        let ascii = self.decoder.decode(flex);
        Transcoded { raw, flex, ascii }
    }
}
