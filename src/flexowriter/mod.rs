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

    src/flexowriter/mod.rs

    Stateful Flexowriter to ASCII decoder.
*/

//! The `flexowriter` module decodes 6-bit Flexowriter codes into ASCII.
//!
//! The Flexowriter is a typewriter with a shift state. Two dedicated codes switch between capitals
//! and lowercase, and every other code is interpreted according to the current shift state.
//! A [FlexowriterDecoder] owns that state for the duration of one tape.

pub mod tables;

use std::fmt::{self, Display, Formatter};

use crate::FlexCode;
use tables::*;

/// The upper/lowercase mode of the Flexowriter.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ShiftState {
    #[default]
    Lower,
    Capital,
}

impl Display for ShiftState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ShiftState::Lower => write!(f, "lowercase"),
            ShiftState::Capital => write!(f, "capitals"),
        }
    }
}

impl ShiftState {
    fn table(&self) -> &'static [u8; 64] {
        match self {
            ShiftState::Lower => &ASCII_LOWER,
            ShiftState::Capital => &ASCII_CAPITAL,
        }
    }
}

/// Translates a stream of [FlexCode]s into ASCII, tracking the Flexowriter shift state.
///
/// Each call to [FlexowriterDecoder::decode] emits at most one byte:
///  - Code 0 is passed through as an ASCII NUL and does not touch the shift state.
///  - Codes 8 and 4 select capitals and lowercase and emit nothing.
///  - Any other code is looked up in the table for the current shift state. Codes that have no
///    character in that state emit nothing.
///
/// Decoding never fails.
#[derive(Clone, Debug, Default)]
pub struct FlexowriterDecoder {
    shift: ShiftState,
}

impl FlexowriterDecoder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Return the decoder to lowercase, as at the start of a new tape.
    pub fn reset(&mut self) {
        self.shift = ShiftState::Lower;
    }

    pub fn shift_state(&self) -> ShiftState {
        self.shift
    }

    pub fn decode(&mut self, code: FlexCode) -> Option<u8> {
        match code.value() {
            // Zeros from the tape are preserved in the ASCII output. This mirrors what existing
            // converted tapes contain; it is not known to be desirable.
            0 => Some(0),
            FLEX_SHIFT_CAPITAL => {
                self.shift = ShiftState::Capital;
                None
            }
            FLEX_SHIFT_LOWER => {
                self.shift = ShiftState::Lower;
                None
            }
            _ => match self.shift.table()[code.as_index()] {
                0 => {
                    log::trace!("decode(): code {} has no character in {}", code, self.shift);
                    None
                }
                ascii => Some(ascii),
            },
        }
    }

    /// Decode a slice of codes, collecting the emitted ASCII bytes.
    pub fn decode_slice(&mut self, codes: &[FlexCode]) -> Vec<u8> {
        codes.iter().filter_map(|&code| self.decode(code)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(value: u8) -> FlexCode {
        FlexCode::new(value)
    }

    #[test]
    fn test_initial_state_is_lower() {
        let decoder = FlexowriterDecoder::new();
        assert_eq!(decoder.shift_state(), ShiftState::Lower);
    }

    #[test]
    fn test_shift_persistence() {
        let mut decoder = FlexowriterDecoder::new();

        assert_eq!(decoder.decode(code(FLEX_SHIFT_CAPITAL)), None);
        assert_eq!(decoder.shift_state(), ShiftState::Capital);
        // Capital table stays selected for every following code.
        assert_eq!(decoder.decode(code(0x39)), Some(b'A'));
        assert_eq!(decoder.decode(code(0x01)), Some(b'Z'));
        assert_eq!(decoder.decode(code(0x03)), Some(b' '));
        assert_eq!(decoder.decode(code(0x15)), Some(b'D'));

        assert_eq!(decoder.decode(code(FLEX_SHIFT_LOWER)), None);
        assert_eq!(decoder.shift_state(), ShiftState::Lower);
        assert_eq!(decoder.decode(code(0x39)), Some(b'a'));
        assert_eq!(decoder.decode(code(0x01)), Some(b'z'));
        assert_eq!(decoder.decode(code(0x15)), Some(b'd'));
    }

    #[test]
    fn test_repeated_shift_codes() {
        let mut decoder = FlexowriterDecoder::new();
        assert_eq!(decoder.decode(code(FLEX_SHIFT_CAPITAL)), None);
        assert_eq!(decoder.decode(code(FLEX_SHIFT_CAPITAL)), None);
        assert_eq!(decoder.shift_state(), ShiftState::Capital);
        assert_eq!(decoder.decode(code(FLEX_SHIFT_LOWER)), None);
        assert_eq!(decoder.decode(code(FLEX_SHIFT_LOWER)), None);
        assert_eq!(decoder.shift_state(), ShiftState::Lower);
    }

    #[test]
    fn test_zero_passthrough() {
        let mut decoder = FlexowriterDecoder::new();
        assert_eq!(decoder.decode(code(0)), Some(0));
        assert_eq!(decoder.shift_state(), ShiftState::Lower);

        decoder.decode(code(FLEX_SHIFT_CAPITAL));
        assert_eq!(decoder.decode(code(0)), Some(0));
        assert_eq!(decoder.shift_state(), ShiftState::Capital);
    }

    #[test]
    fn test_unassigned_codes_are_suppressed() {
        let unassigned = [0x1C, 0x24, 0x28, 0x2B, 0x2C, 0x2F, 0x30, 0x33, 0x34, 0x37, 0x38, 0x3B, 0x3C];

        let mut decoder = FlexowriterDecoder::new();
        for &c in &unassigned {
            assert_eq!(decoder.decode(code(c)), None, "lowercase code {:02X}", c);
        }

        decoder.decode(code(FLEX_SHIFT_CAPITAL));
        for &c in &unassigned {
            assert_eq!(decoder.decode(code(c)), None, "capital code {:02X}", c);
        }
    }

    #[test]
    fn test_special_characters() {
        let mut decoder = FlexowriterDecoder::new();
        decoder.decode(code(FLEX_SHIFT_CAPITAL));

        assert_eq!(decoder.decode(code(FLEX_DELTA)), Some(b'^'));
        assert_eq!(decoder.decode(code(FLEX_PI)), Some(b'#'));
        assert_eq!(decoder.decode(code(FLEX_SIGMA)), Some(b'&'));
        assert_eq!(decoder.decode(code(FLEX_COLOR_SHIFT)), Some(0x0F));
        assert_eq!(decoder.decode(code(FLEX_DELETE)), Some(0x7F));

        decoder.decode(code(FLEX_SHIFT_LOWER));
        assert_eq!(decoder.decode(code(FLEX_COLOR_SHIFT)), Some(0x0F));
        assert_eq!(decoder.decode(code(FLEX_DELETE)), Some(0x7F));
    }

    #[test]
    fn test_control_characters() {
        let mut decoder = FlexowriterDecoder::new();
        // Carriage return, backspace and tab are the same in both shift states.
        for shift in [FLEX_SHIFT_LOWER, FLEX_SHIFT_CAPITAL] {
            decoder.decode(code(shift));
            assert_eq!(decoder.decode(code(0x10)), Some(b'\r'));
            assert_eq!(decoder.decode(code(0x14)), Some(0x08));
            assert_eq!(decoder.decode(code(0x18)), Some(b'\t'));
        }
    }

    #[test]
    fn test_every_code_emits_at_most_one_byte() {
        for shift in [ShiftState::Lower, ShiftState::Capital] {
            for c in 0..64u8 {
                let mut decoder = FlexowriterDecoder { shift };
                let out = decoder.decode(code(c));
                if let Some(b) = out {
                    assert!(b == 0 || (8..=127).contains(&b));
                }
            }
        }
    }

    #[test]
    fn test_reset() {
        let mut decoder = FlexowriterDecoder::new();
        decoder.decode(code(FLEX_SHIFT_CAPITAL));
        decoder.reset();
        assert_eq!(decoder.shift_state(), ShiftState::Lower);
        assert_eq!(decoder.decode(code(0x39)), Some(b'a'));
    }

    #[test]
    fn test_decode_slice() {
        let mut decoder = FlexowriterDecoder::new();
        let codes = [0x08, 0x39, 0x04, 0x39, 0x1C, 0x00].map(code);
        assert_eq!(decoder.decode_slice(&codes), vec![b'A', b'a', 0]);
    }
}
