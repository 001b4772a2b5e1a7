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

    src/convert.rs

    Offline conversion of captured raw tape images.

    A raw image (.raw) is read to the end and converted into Flexowriter code
    (.flx2) and ASCII (.asc2). Every input byte produces one Flexowriter code
    byte and zero or one ASCII byte.
*/
use std::{
    fmt::{self, Display, Formatter},
    fs::File,
    io::{BufReader, BufWriter, ErrorKind, Read, Write},
    path::Path,
};

use crate::{ArtifactKind, ArtifactSet, TapeError, TapeTranscoder, Transcoded};

/// Byte counts for a converted tape.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ConvertStats {
    pub raw_bytes:   u64,
    pub flex_bytes:  u64,
    pub ascii_bytes: u64,
}

impl Display for ConvertStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} raw bytes, {} Flexowriter codes, {} ASCII bytes",
            self.raw_bytes, self.flex_bytes, self.ascii_bytes
        )
    }
}

fn transcode_stream<R, F>(reader: R, mut sink: F) -> Result<ConvertStats, TapeError>
where
    R: Read,
    F: FnMut(&Transcoded) -> Result<(), TapeError>,
{
    // Each image is its own tape and starts in lowercase.
    let mut transcoder = TapeTranscoder::new();
    let mut stats = ConvertStats::default();

    for byte in BufReader::new(reader).bytes() {
        let t = transcoder.push(byte?);
        sink(&t)?;

        stats.raw_bytes += 1;
        stats.flex_bytes += 1;
        if t.ascii.is_some() {
            stats.ascii_bytes += 1;
        }
    }

    log::debug!("transcode_stream(): {}", stats);
    Ok(stats)
}

/// Convert a raw tape byte stream, writing Flexowriter codes to `flex_out` and ASCII to `ascii_out`.
/// The stream is read until exhausted.
pub fn convert_stream<R: Read, W1: Write, W2: Write>(
    reader: R,
    flex_out: W1,
    ascii_out: W2,
) -> Result<ConvertStats, TapeError> {
    let mut flex_out = BufWriter::new(flex_out);
    let mut ascii_out = BufWriter::new(ascii_out);

    let stats = transcode_stream(reader, |t| {
        flex_out.write_all(&[t.flex.value()])?;
        if let Some(ascii) = t.ascii {
            ascii_out.write_all(&[ascii])?;
        }
        Ok(())
    })?;

    flex_out.flush()?;
    ascii_out.flush()?;
    Ok(stats)
}

/// Convert the raw tape image `base.raw` into `base.flx2` and `base.asc2`.
///
/// `base` is the file name without suffix. If the conversion or the final flush of the outputs
/// fails after the output files have been created, they are removed again.
pub fn convert_image(base: &Path) -> Result<ConvertStats, TapeError> {
    let raw_path = ArtifactKind::Raw.path_for(base);
    let raw_file = match File::open(&raw_path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(TapeError::InputNotFound(raw_path)),
        Err(e) => return Err(e.into()),
    };

    let mut artifacts = ArtifactSet::create(base, &ArtifactKind::CONVERTED)?;

    let result = transcode_stream(raw_file, |t| {
        artifacts.write(ArtifactKind::FlexConverted, &[t.flex.value()])?;
        if let Some(ascii) = t.ascii {
            artifacts.write(ArtifactKind::AsciiConverted, &[ascii])?;
        }
        Ok(())
    });

    match result {
        Ok(stats) => {
            // A failed commit has already removed the outputs.
            if let Err(e) = artifacts.commit() {
                log::error!("convert_image(): could not finish writing {}: {}", raw_path.display(), e);
                return Err(e);
            }
            log::info!("convert_image(): converted {}: {}", raw_path.display(), stats);
            Ok(stats)
        }
        Err(e) => {
            log::error!("convert_image(): conversion of {} failed: {}", raw_path.display(), e);
            if let Err(cleanup_err) = artifacts.rollback() {
                log::warn!("convert_image(): cleanup failed: {}", cleanup_err);
            }
            Err(e)
        }
    }
}
