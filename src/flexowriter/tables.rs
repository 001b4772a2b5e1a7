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

    src/flexowriter/tables.rs

    Flexowriter to ASCII code tables, indexed by Flexowriter code.

    These tables follow the Stuttgart LGP-30 utility except for the following
    characters, which have no ASCII equivalent and are mapped as follows:

      Delta         (0x12 upper)    0x5E, caret ^
      Pi            (0x1E upper)    0x23, hash #
      Sigma         (0x22 upper)    0x26, ampersand &
      Color shift   (0x0C)          0x0F, shift in
      Delete        (0x3F)          0x7F, delete

    Existing converted tapes depend on these exact values. Do not change them.

    An entry of 0 means the code has no character in that shift state.
*/

/// Flexowriter code that switches the typewriter to capitals.
pub const FLEX_SHIFT_CAPITAL: u8 = 0x08;
/// Flexowriter code that switches the typewriter to lowercase.
pub const FLEX_SHIFT_LOWER: u8 = 0x04;

pub const FLEX_DELTA: u8 = 0x12;
pub const FLEX_PI: u8 = 0x1E;
pub const FLEX_SIGMA: u8 = 0x22;
pub const FLEX_COLOR_SHIFT: u8 = 0x0C;
pub const FLEX_DELETE: u8 = 0x3F;

// Entries 4 and 8 are never looked up; the shift codes are consumed before table lookup.

#[rustfmt::skip]
pub const ASCII_CAPITAL: [u8; 64] = [
      0,  90,  41,  32,   0,  66,  76,  95,
     60,  89,  42,  61,  15,  82,  34,  58,
     13,  73,  94,  63,   8,  68,  37,  93,
      9,  78,  36,  91,   0,  77,  35,  86,
     39,  80,  38,  79,   0,  69,  40,  88,
      0,  85,  70,   0,   0,  84,  71,   0,
      0,  72,  74,   0,   0,  67,  75,   0,
      0,  65,  81,   0,   0,  83,  87, 127,
];

#[rustfmt::skip]
pub const ASCII_LOWER: [u8; 64] = [
      0, 122,  48,  32,   0,  98, 108,  45,
     62, 121,  50,  43,  15, 114,  51,  59,
     13, 105,  52,  47,   8, 100,  53,  46,
      9, 110,  54,  44,   0, 109,  55, 118,
     39, 112,  56, 111,   0, 101,  57, 120,
      0, 117, 102,   0,   0, 116, 103,   0,
      0, 104, 106,   0,   0,  99, 107,   0,
      0,  97, 113,   0,   0, 115, 119, 127,
];
