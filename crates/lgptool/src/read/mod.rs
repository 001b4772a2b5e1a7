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
pub mod args;
mod keyboard;

use std::{
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    args::GlobalOptions,
    prompt::{prompt_stdin, NameSource},
};
use anyhow::{bail, Error};
use keyboard::KeyboardCancel;
use lgptape::{
    serial::{port_name_from_input, SerialConfig, SerialTapeReader},
    ArtifactKind,
    ArtifactSet,
    CancelSignal,
    SessionOutcome,
    SessionState,
    TapeError,
    TapeReader,
    TapeSession,
};

pub(crate) fn run(global: &GlobalOptions, params: &args::ReadParams) -> Result<(), Error> {
    global.loud(|| {
        println!("Read LGP-21 and LGP-30 paper tapes");
        println!("from a tape reader connected via serial or USB interface.");
        println!();
        println!("Press any key during tape reading to cancel.");
        println!("Enter empty port or file name to end.");
        println!();
    });

    let config = SerialConfig {
        baud_rate:    params.baud,
        read_timeout: Duration::from_millis(params.timeout_ms),
    };

    let mut reader = match open_port(global, params.port.as_deref(), &config)? {
        Some(reader) => reader,
        None => return Ok(()),
    };

    let mut names: NameSource<PathBuf> = NameSource::new(params.names.clone(), "Output file name (without suffix): ");
    let mut failed = 0;

    while let Some(base) = names.next_name()? {
        if !read_one(global, &mut reader, &base, || {
            KeyboardCancel::new().map_err(TapeError::from)
        }) {
            failed += 1;
        }
    }

    if failed > 0 && !names.is_interactive() {
        bail!("{} tape(s) could not be read", failed);
    }
    Ok(())
}

/// Open the tape reader's port. With no port given on the command line the operator is prompted
/// until a port opens; an empty answer returns `None`.
fn open_port(
    global: &GlobalOptions,
    port: Option<&str>,
    config: &SerialConfig,
) -> Result<Option<SerialTapeReader>, Error> {
    if let Some(port) = port {
        let name = port_name_from_input(port);
        return match SerialTapeReader::open(&name, config) {
            Ok(reader) => {
                report_open(global, &reader, &name);
                Ok(Some(reader))
            }
            Err(e) => bail!("Cannot open port {}: {}", name, e),
        };
    }

    loop {
        let input = prompt_stdin("Serial port (number or name): ")?;
        if input.is_empty() {
            return Ok(None);
        }

        let name = port_name_from_input(&input);
        match SerialTapeReader::open(&name, config) {
            Ok(reader) => {
                report_open(global, &reader, &name);
                return Ok(Some(reader));
            }
            Err(e) => {
                log::warn!("{}", e);
                eprintln!("Cannot open port {}", name);
            }
        }
    }
}

fn report_open(global: &GlobalOptions, reader: &SerialTapeReader, requested: &str) {
    let name = reader.name().unwrap_or_else(|| requested.to_string());
    global.loud(|| println!("opened port {}", name));
}

/// Read one tape into the file set named `base`, creating the cancel signal with `cancel` once
/// the files exist. Returns false if the tape could not be read. Failures are reported to the
/// operator and leave no files behind; they never end the read loop.
fn read_one<R, C, F>(global: &GlobalOptions, reader: &mut R, base: &Path, cancel: F) -> bool
where
    R: TapeReader,
    C: CancelSignal,
    F: FnOnce() -> Result<C, TapeError>,
{
    let artifacts = match ArtifactSet::create(base, &ArtifactKind::LIVE) {
        Ok(artifacts) => artifacts,
        Err(e) => {
            log::warn!("{}", e);
            eprintln!("Cannot create file.");
            return false;
        }
    };

    global.loud(|| {
        for path in artifacts.paths() {
            println!("writing {}", path.display());
        }
    });

    let cancel = match cancel() {
        Ok(cancel) => cancel,
        Err(e) => {
            log::error!("read_one(): cannot watch for cancel: {}", e);
            if let Err(cleanup_err) = artifacts.rollback() {
                log::warn!("read_one(): cleanup failed: {}", cleanup_err);
            }
            eprintln!("Cannot read tape: {}", e);
            return false;
        }
    };

    let mut session = TapeSession::new(reader, cancel);
    let result = session.run(artifacts, |state| match state {
        SessionState::WaitingForTape => raw_println("insert tape in reader, or press any key to cancel..."),
        SessionState::Reading => raw_println("reading..."),
        _ => {}
    });
    // Leave raw mode before reporting.
    drop(session);

    match result {
        Ok(SessionOutcome::Completed(stats)) => {
            println!("{}", stats);
            true
        }
        Ok(SessionOutcome::Cancelled) => {
            println!("cancelled, removing files.");
            true
        }
        Err(e) => {
            log::error!("read_one(): {}", e);
            eprintln!("Tape read failed, files removed: {}", e);
            false
        }
    }
}

/// Print a line while the terminal is in raw mode.
fn raw_println(message: &str) {
    let mut stdout = std::io::stdout();
    let _ = write!(stdout, "{}\r\n", message);
    let _ = stdout.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use lgptape::NeverCancel;
    use std::collections::VecDeque;

    /// A reader holding one tape that can be unplugged partway through.
    #[derive(Default)]
    struct TestReader {
        tape:         VecDeque<u8>,
        unplug_after: Option<usize>,
        reads:        usize,
    }

    impl TestReader {
        fn load(&mut self, tape: &[u8], unplug_after: Option<usize>) {
            self.tape = tape.iter().copied().collect();
            self.unplug_after = unplug_after;
            self.reads = 0;
        }
    }

    impl TapeReader for TestReader {
        fn set_ready(&mut self, _ready: bool) -> Result<(), TapeError> {
            Ok(())
        }

        fn bytes_available(&mut self) -> Result<usize, TapeError> {
            Ok(self.tape.len())
        }

        fn read_byte(&mut self) -> Result<Option<u8>, TapeError> {
            if self.unplug_after == Some(self.reads) {
                return Err(TapeError::PortError("device disconnected".to_string()));
            }
            self.reads += 1;
            Ok(self.tape.pop_front())
        }
    }

    fn quiet() -> GlobalOptions {
        GlobalOptions { silent: true }
    }

    #[test]
    fn test_read_error_does_not_end_read_loop() {
        let dir = tempfile::tempdir().unwrap();
        let mut reader = TestReader::default();

        let first = dir.path().join("first");
        reader.load(&[0x04, 0x3C, 0x22, 0x3C], Some(2));
        assert!(!read_one(&quiet(), &mut reader, &first, || Ok(NeverCancel)));
        for kind in ArtifactKind::LIVE {
            assert!(!kind.path_for(&first).exists(), "{} was not removed", kind);
        }

        // The same reader goes on to read the next tape.
        let second = dir.path().join("second");
        reader.load(&[0x04, 0x3C], None);
        assert!(read_one(&quiet(), &mut reader, &second, || Ok(NeverCancel)));
        assert_eq!(std::fs::read(dir.path().join("second.asc")).unwrap(), b"A".to_vec());
    }

    #[test]
    fn test_cancel_setup_failure_removes_files() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("tape");
        let mut reader = TestReader::default();
        reader.load(&[0x04, 0x3C], None);

        let ok = read_one(&quiet(), &mut reader, &base, || {
            Err::<NeverCancel, _>(TapeError::IoError("not a terminal".to_string()))
        });
        assert!(!ok);
        assert_eq!(reader.reads, 0);
        for kind in ArtifactKind::LIVE {
            assert!(!kind.path_for(&base).exists(), "{} was not removed", kind);
        }
    }

    #[test]
    fn test_create_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("missing_dir").join("tape");
        let mut reader = TestReader::default();

        assert!(!read_one(&quiet(), &mut reader, &base, || Ok(NeverCancel)));
    }
}
