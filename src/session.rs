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

    src/session.rs

    Reads one tape from a tape reader into .raw, .flx and .asc files.
*/

//! A [TapeSession] drives a [TapeReader] through the reading of a single tape.
//!
//! The session moves through the following states:
//!
//! ```text
//! AwaitingFilename -> WaitingForTape -> Reading -> Completed
//!                           |              |
//!                           +--------------+-----> Cancelled
//! ```
//!
//! `AwaitingFilename` is owned by the caller, which creates the [ArtifactSet] for the tape.
//! `WaitingForTape` has no timeout since the operator may take as long as they like to insert the
//! tape. `Reading` ends when the reader times out, which is the normal end of a tape.
//! The cancel signal is checked once per loop iteration in both states; a cancelled session
//! deletes its output files.

use std::{
    fmt::{self, Display, Formatter},
    time::{Duration, Instant},
};

use crate::{ArtifactKind, ArtifactSet, CancelSignal, TapeError, TapeReader, TapeTranscoder};

/// Delay between polls for the first byte of a tape.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 10;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SessionState {
    AwaitingFilename,
    WaitingForTape,
    Reading,
    Completed,
    Cancelled,
}

impl Display for SessionState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::AwaitingFilename => write!(f, "Awaiting file name"),
            SessionState::WaitingForTape => write!(f, "Waiting for tape"),
            SessionState::Reading => write!(f, "Reading"),
            SessionState::Completed => write!(f, "Completed"),
            SessionState::Cancelled => write!(f, "Cancelled"),
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct SessionConfig {
    /// How long to sleep between polls while waiting for the tape to start.
    pub poll_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

/// Statistics for a completed tape.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ReadStats {
    pub bytes:       u64,
    pub ascii_bytes: u64,
    /// Time from the first available byte to the end-of-tape timeout.
    pub elapsed:     Duration,
}

impl ReadStats {
    /// Throughput in bytes per second, rounded to the nearest integer.
    pub fn bytes_per_second(&self) -> u64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            (self.bytes as f64 / secs).round() as u64
        }
        else {
            0
        }
    }
}

impl Display for ReadStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "read {} bytes, {} byte/s.", self.bytes, self.bytes_per_second())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionOutcome {
    Completed(ReadStats),
    Cancelled,
}

pub struct TapeSession<R: TapeReader, C: CancelSignal> {
    reader: R,
    cancel: C,
    config: SessionConfig,
    state:  SessionState,
}

impl<R: TapeReader, C: CancelSignal> TapeSession<R, C> {
    pub fn new(reader: R, cancel: C) -> Self {
        TapeSession::with_config(reader, cancel, SessionConfig::default())
    }

    pub fn with_config(reader: R, cancel: C, config: SessionConfig) -> Self {
        TapeSession {
            reader,
            cancel,
            config,
            state: SessionState::AwaitingFilename,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Read one tape into `artifacts`, which must contain the raw, Flexowriter and ASCII kinds.
    ///
    /// `observer` is called on every state change. On completion the files are committed and the
    /// read statistics returned. On cancellation, or if an error occurs while reading or while
    /// writing the files, the files are removed.
    /// The ready line is dropped again on every exit path.
    pub fn run<F>(&mut self, mut artifacts: ArtifactSet, mut observer: F) -> Result<SessionOutcome, TapeError>
    where
        F: FnMut(SessionState),
    {
        for kind in ArtifactKind::LIVE {
            if artifacts.path(kind).is_none() {
                if let Err(cleanup_err) = artifacts.rollback() {
                    log::warn!("TapeSession::run(): cleanup failed: {}", cleanup_err);
                }
                return Err(TapeError::ArtifactNotOpen(kind));
            }
        }

        let result = self.read_tape(&mut artifacts, &mut observer);

        if let Err(e) = self.reader.set_ready(false) {
            log::warn!("TapeSession::run(): failed to clear ready line: {}", e);
        }

        match result {
            Ok(Some(stats)) => {
                // A failed commit has already removed the files.
                if let Err(e) = artifacts.commit() {
                    log::error!("TapeSession::run(): could not finish writing files: {}", e);
                    return Err(e);
                }
                log::info!("TapeSession::run(): {}", stats);
                self.transition(SessionState::Completed, &mut observer);
                Ok(SessionOutcome::Completed(stats))
            }
            Ok(None) => {
                artifacts.rollback()?;
                self.transition(SessionState::Cancelled, &mut observer);
                Ok(SessionOutcome::Cancelled)
            }
            Err(e) => {
                log::error!("TapeSession::run(): read failed: {}", e);
                if let Err(cleanup_err) = artifacts.rollback() {
                    log::warn!("TapeSession::run(): cleanup failed: {}", cleanup_err);
                }
                Err(e)
            }
        }
    }

    fn transition<F: FnMut(SessionState)>(&mut self, state: SessionState, observer: &mut F) {
        log::debug!("TapeSession: {} -> {}", self.state, state);
        self.state = state;
        observer(state);
    }

    /// Returns `None` if the operator cancelled.
    fn read_tape<F: FnMut(SessionState)>(
        &mut self,
        artifacts: &mut ArtifactSet,
        observer: &mut F,
    ) -> Result<Option<ReadStats>, TapeError> {
        self.reader.set_ready(true)?;
        self.transition(SessionState::WaitingForTape, observer);

        loop {
            if self.cancel.is_cancelled()? {
                log::debug!("TapeSession: cancelled while waiting for tape");
                return Ok(None);
            }
            if self.reader.bytes_available()? > 0 {
                break;
            }
            std::thread::sleep(self.config.poll_interval);
        }

        self.transition(SessionState::Reading, observer);

        // Each tape starts in lowercase.
        let mut transcoder = TapeTranscoder::new();
        let mut stats = ReadStats::default();
        let start_time = Instant::now();

        loop {
            if self.cancel.is_cancelled()? {
                log::debug!("TapeSession: cancelled after {} bytes", stats.bytes);
                return Ok(None);
            }

            let byte = match self.reader.read_byte()? {
                Some(byte) => byte,
                None => break,
            };
            stats.bytes += 1;

            let t = transcoder.push(byte);
            artifacts.write(ArtifactKind::Raw, &[t.raw])?;
            artifacts.write(ArtifactKind::Flex, &[t.flex.value()])?;
            if let Some(ascii) = t.ascii {
                artifacts.write(ArtifactKind::Ascii, &[ascii])?;
                stats.ascii_bytes += 1;
            }
        }

        stats.elapsed = start_time.elapsed();
        Ok(Some(stats))
    }
}
