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

use crate::{args::GlobalOptions, prompt::NameSource};
use anyhow::{bail, Error};
use lgptape::{convert_image, ArtifactKind, TapeError};
use std::path::PathBuf;

pub(crate) fn run(global: &GlobalOptions, params: &args::ConvertParams) -> Result<(), Error> {
    global.loud(|| {
        println!("Convert LGP-21 and LGP-30 paper tape images");
        println!("from raw 8-bit to Flexowriter 6-bit and ASCII 8-bit code.");
    });

    let mut names: NameSource<PathBuf> = NameSource::new(params.names.clone(), "File name (without suffix): ");
    if names.is_interactive() {
        println!();
        println!("Enter empty file name to end.");
    }

    let mut failed = 0;
    let mut converted = 0;

    while let Some(base) = names.next_name()? {
        global.loud(|| {
            println!("reading {}", ArtifactKind::Raw.path_for(&base).display());
            println!("writing {}", ArtifactKind::FlexConverted.path_for(&base).display());
            println!("writing {}", ArtifactKind::AsciiConverted.path_for(&base).display());
        });

        match convert_image(&base) {
            Ok(stats) => {
                converted += 1;
                log::debug!("converted {}: {}", base.display(), stats);
                global.loud(|| println!("done. {}", stats));
            }
            Err(e @ (TapeError::InputNotFound(_) | TapeError::ArtifactCreateError { .. })) => {
                failed += 1;
                log::warn!("{}", e);
                eprintln!("Cannot find or create file.");
            }
            Err(e) => {
                failed += 1;
                eprintln!("Error converting {}: {}", base.display(), e);
            }
        }
    }

    // Failures while prompting are recovered by prompting again, so only batch runs report them.
    if failed > 0 && !names.is_interactive() {
        bail!("{} of {} tape images could not be converted", failed, failed + converted);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_convert() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("tape");
        std::fs::write(ArtifactKind::Raw.path_for(&base), [0x04u8, 0x3C, 0x02, 0x3C]).unwrap();

        let global = GlobalOptions { silent: true };
        let params = args::ConvertParams {
            names: vec![base.clone()],
        };
        run(&global, &params).unwrap();

        assert_eq!(
            std::fs::read(ArtifactKind::FlexConverted.path_for(&base)).unwrap(),
            vec![0x08, 0x39, 0x04, 0x39]
        );
        assert_eq!(
            std::fs::read(ArtifactKind::AsciiConverted.path_for(&base)).unwrap(),
            b"Aa".to_vec()
        );
    }

    #[test]
    fn test_batch_convert_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("present");
        std::fs::write(ArtifactKind::Raw.path_for(&present), [0x3Cu8]).unwrap();

        let global = GlobalOptions { silent: true };
        let params = args::ConvertParams {
            names: vec![dir.path().join("missing"), present.clone()],
        };

        // The missing tape fails the run, but the remaining tapes are still converted.
        assert!(run(&global, &params).is_err());
        assert_eq!(
            std::fs::read(ArtifactKind::AsciiConverted.path_for(&present)).unwrap(),
            b"a".to_vec()
        );
    }
}
