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

    src/source.rs

    Traits for tape readers and operator cancellation.
*/
use crate::TapeError;

/// A [TapeReader] is a byte stream from a paper tape reader.
///
/// The reader has a ready line to tell the hardware when we are prepared to receive a tape, and
/// a bounded read: [TapeReader::read_byte] must block for no longer than the reader's timeout.
/// A timeout is reported as `Ok(None)` and means the tape has run out.
pub trait TapeReader {
    /// Raise or drop the ready line.
    fn set_ready(&mut self, ready: bool) -> Result<(), TapeError>;

    /// Return the number of bytes that can be read without blocking.
    fn bytes_available(&mut self) -> Result<usize, TapeError>;

    /// Read the next byte, or return `None` if no byte arrived within the read timeout.
    fn read_byte(&mut self) -> Result<Option<u8>, TapeError>;
}

impl<T: TapeReader + ?Sized> TapeReader for &mut T {
    fn set_ready(&mut self, ready: bool) -> Result<(), TapeError> {
        (**self).set_ready(ready)
    }

    fn bytes_available(&mut self) -> Result<usize, TapeError> {
        (**self).bytes_available()
    }

    fn read_byte(&mut self) -> Result<Option<u8>, TapeError> {
        (**self).read_byte()
    }
}

/// A [CancelSignal] reports whether the operator has asked to abandon the current tape.
/// [CancelSignal::is_cancelled] must not block.
pub trait CancelSignal {
    fn is_cancelled(&mut self) -> Result<bool, TapeError>;
}

impl<T: CancelSignal + ?Sized> CancelSignal for &mut T {
    fn is_cancelled(&mut self) -> Result<bool, TapeError> {
        (**self).is_cancelled()
    }
}

/// A [CancelSignal] for unattended reading.
#[derive(Copy, Clone, Debug, Default)]
pub struct NeverCancel;

impl CancelSignal for NeverCancel {
    fn is_cancelled(&mut self) -> Result<bool, TapeError> {
        Ok(false)
    }
}
