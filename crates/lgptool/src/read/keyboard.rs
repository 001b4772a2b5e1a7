/*
    lgptool

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
*/
use std::{io, time::Duration};

use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal,
};
use lgptape::{CancelSignal, TapeError};

/// Cancels a tape session when any key is pressed.
///
/// The terminal is in raw mode for as long as this exists, so that single key presses are seen
/// without waiting for Enter. Output while it exists must end lines with "\r\n".
pub(crate) struct KeyboardCancel {
    _raw_mode: (),
}

impl KeyboardCancel {
    pub(crate) fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(KeyboardCancel { _raw_mode: () })
    }
}

impl Drop for KeyboardCancel {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            log::error!("Failed to restore terminal mode: {}", e);
        }
    }
}

impl CancelSignal for KeyboardCancel {
    fn is_cancelled(&mut self) -> Result<bool, TapeError> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    log::debug!("KeyboardCancel: key {:?} pressed", key.code);
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}
