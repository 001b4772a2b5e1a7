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

    src/serial.rs

    A TapeReader for serial-attached paper tape readers, such as the
    Ghielmetti FER 201 with a USB CDC interface.

    DTR is used as the ready line. The reader only transmits while DTR is set.
*/
use std::{
    io::{ErrorKind, Read},
    time::Duration,
};

use serialport::SerialPort;

use crate::{TapeError, TapeReader, DEFAULT_READ_TIMEOUT_MS};

pub const DEFAULT_BAUD_RATE: u32 = 9600;

#[derive(Copy, Clone, Debug)]
pub struct SerialConfig {
    /// Ignored by USB CDC devices, but required to open the port.
    pub baud_rate:    u32,
    /// A read that receives nothing for this long marks the end of the tape.
    pub read_timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        SerialConfig {
            baud_rate:    DEFAULT_BAUD_RATE,
            read_timeout: Duration::from_millis(DEFAULT_READ_TIMEOUT_MS),
        }
    }
}

impl From<serialport::Error> for TapeError {
    fn from(err: serialport::Error) -> Self {
        TapeError::PortError(err.to_string())
    }
}

pub struct SerialTapeReader {
    port: Box<dyn SerialPort>,
}

impl SerialTapeReader {
    /// Open the named serial port. The ready line is cleared immediately, so the reader will not
    /// start transmitting until a session begins.
    pub fn open(port_name: &str, config: &SerialConfig) -> Result<Self, TapeError> {
        let port = serialport::new(port_name, config.baud_rate)
            .timeout(config.read_timeout)
            .open()?;

        log::debug!(
            "SerialTapeReader::open(): opened {} at {} baud, timeout {:?}",
            port_name,
            config.baud_rate,
            config.read_timeout
        );

        let mut reader = SerialTapeReader { port };
        reader.set_ready(false)?;
        Ok(reader)
    }

    pub fn name(&self) -> Option<String> {
        self.port.name()
    }
}

impl TapeReader for SerialTapeReader {
    fn set_ready(&mut self, ready: bool) -> Result<(), TapeError> {
        log::trace!("SerialTapeReader::set_ready(): DTR {}", ready);
        self.port.write_data_terminal_ready(ready)?;
        Ok(())
    }

    fn bytes_available(&mut self) -> Result<usize, TapeError> {
        Ok(self.port.bytes_to_read()? as usize)
    }

    fn read_byte(&mut self) -> Result<Option<u8>, TapeError> {
        let mut buf = [0u8; 1];
        loop {
            match self.port.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::TimedOut => {
                    log::trace!("SerialTapeReader::read_byte(): timeout, end of tape");
                    return Ok(None);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// List the names of the serial ports present on this system.
pub fn available_ports() -> Result<Vec<String>, TapeError> {
    let ports = serialport::available_ports()?;
    Ok(ports.into_iter().map(|p| p.port_name).collect())
}

/// Turn operator input into a port name. A bare number selects the numbered port of the
/// platform's usual naming scheme (`COMn` on Windows, `/dev/ttyACMn` elsewhere); anything else
/// is used as given.
pub fn port_name_from_input(input: &str) -> String {
    let input = input.trim();
    if !input.is_empty() && input.chars().all(|c| c.is_ascii_digit()) {
        if cfg!(windows) {
            format!("COM{}", input)
        }
        else {
            format!("/dev/ttyACM{}", input)
        }
    }
    else {
        input.to_string()
    }
}
