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

    src/unscramble.rs

    Reorders the bits of a raw paper tape frame into Flexowriter code order.

    Raw bit order on the tape is 76543/210, where 0 denotes the LSB and '/'
    marks the sprocket (transport) holes.
    Flexowriter bit order on the tape is ..612/345, where '.' denotes unused
    holes and 6 is the LSB. Unscrambled codes have their bits in the order
    123456.
*/
use std::fmt::{self, Display, Formatter};

const FLEX_CODE_MASK: u8 = 0b0011_1111;
const FLEX_WRAP_BIT: u8 = 0b0100_0000;

/// A 6-bit Flexowriter code in canonical `123456` bit order, where bit 6 is the LSB.
#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct FlexCode(u8);

impl FlexCode {
    /// Create a [FlexCode] from an already unscrambled value. Bits above the low 6 are discarded.
    pub const fn new(value: u8) -> Self {
        FlexCode(value & FLEX_CODE_MASK)
    }

    #[inline]
    pub const fn value(&self) -> u8 {
        self.0
    }

    #[inline]
    pub fn as_index(&self) -> usize {
        self.0 as usize
    }
}

impl From<FlexCode> for u8 {
    fn from(code: FlexCode) -> Self {
        code.0
    }
}

impl Display for FlexCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}", self.0)
    }
}

/// Unscramble a raw tape byte into a [FlexCode].
///
/// The raw byte is shifted left by one. Bit 5 of the raw byte lands on bit 6 of the shifted value
/// and wraps around to bit 0, and everything above bit 5 is then cleared.
/// Every raw byte maps to exactly one code.
pub fn unscramble(raw: u8) -> FlexCode {
    let mut c = raw << 1;
    if c & FLEX_WRAP_BIT != 0 {
        c |= 0b0000_0001;
    }
    FlexCode::new(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unscramble_known_vectors() {
        // (raw, expected flex code)
        let test_cases = [
            (0x00, 0x00),
            (0x01, 0x02),
            (0x02, 0x04),
            (0x04, 0x08),
            (0x08, 0x10),
            (0x1F, 0x3E),
            (0x20, 0x01),
            (0x2A, 0x15),
            (0x3C, 0x39),
            (0x3F, 0x3F),
            (0x40, 0x00),
            (0x80, 0x00),
            (0xFF, 0x3F),
        ];

        for (raw, expected) in test_cases {
            assert_eq!(unscramble(raw).value(), expected, "raw byte {:02X}", raw);
        }
    }

    #[test]
    fn test_unscramble_is_total() {
        for raw in 0..=255u8 {
            let code = unscramble(raw);
            assert!(code.value() <= 63);
            assert_eq!(code, unscramble(raw));
        }
    }

    #[test]
    fn test_unscramble_rotates_low_six_bits() {
        // The unscrambler is a left rotation of raw bits 0-5, ignoring bits 6 and 7.
        for raw in 0..=255u8 {
            let expected = ((raw << 1) & 0x3E) | ((raw >> 5) & 0x01);
            assert_eq!(unscramble(raw).value(), expected);
        }
    }

    #[test]
    fn test_flex_code_new_masks() {
        assert_eq!(FlexCode::new(0xFF).value(), 0x3F);
        assert_eq!(FlexCode::new(0x48).value(), 0x08);
        assert_eq!(u8::from(FlexCode::new(0x12)), 0x12);
        assert_eq!(FlexCode::new(0x0C).to_string(), "0C");
    }
}
