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
*/

//! lgptape converts punched paper tape data for the LGP-21 and LGP-30 between
//! raw 8-bit tape bytes, 6-bit Flexowriter code and 8-bit ASCII.
//!
//! The core of the crate is the [unscramble] function, which reorders the
//! physical hole pattern of a tape frame into canonical Flexowriter bit order,
//! and the [FlexowriterDecoder], which tracks the Flexowriter shift state and
//! translates codes into ASCII.
//!
//! Around that core sit two drivers:
//!  - [convert], which converts a previously captured `.raw` tape image into
//!    `.flx2` and `.asc2` files.
//!  - [session], which reads a tape live from a [TapeReader] into `.raw`, `.flx`
//!    and `.asc` files, with operator cancellation.

pub mod artifact;
pub mod convert;
pub mod flexowriter;
#[cfg(feature = "serial")]
pub mod serial;
pub mod session;
pub mod source;
pub mod transcode;
mod unscramble;

use std::path::PathBuf;

use thiserror::Error;

/// The read timeout used to detect the end of a tape, in milliseconds.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1000;

#[derive(Debug, Error)]
pub enum TapeError {
    #[error("An IO error occurred reading or writing tape data: {0}")]
    IoError(String),
    #[error("The input tape image could not be found: {0}")]
    InputNotFound(PathBuf),
    #[error("Could not create output file {path}: {reason}")]
    ArtifactCreateError { path: PathBuf, reason: String },
    #[error("No output file is open for artifact kind {0}")]
    ArtifactNotOpen(artifact::ArtifactKind),
    #[error("The serial port reported an error: {0}")]
    PortError(String),
}

impl From<std::io::Error> for TapeError {
    fn from(err: std::io::Error) -> Self {
        TapeError::IoError(err.to_string())
    }
}

pub use crate::{
    artifact::{ArtifactKind, ArtifactSet},
    convert::{convert_image, convert_stream, ConvertStats},
    flexowriter::{FlexowriterDecoder, ShiftState},
    session::{ReadStats, SessionConfig, SessionOutcome, SessionState, TapeSession},
    source::{CancelSignal, NeverCancel, TapeReader},
    transcode::{TapeTranscoder, Transcoded},
    unscramble::{unscramble, FlexCode},
};

pub mod prelude {
    pub use crate::{
        artifact::{ArtifactKind, ArtifactSet},
        convert::{convert_image, convert_stream, ConvertStats},
        flexowriter::{FlexowriterDecoder, ShiftState},
        session::{ReadStats, SessionConfig, SessionOutcome, SessionState, TapeSession},
        source::{CancelSignal, NeverCancel, TapeReader},
        transcode::{TapeTranscoder, Transcoded},
        unscramble::{unscramble, FlexCode},
        TapeError,
    };
}
