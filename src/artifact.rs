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

    src/artifact.rs

    Output files produced by a tape session, written as a unit.
*/

//! An [ArtifactSet] is the group of output files belonging to one tape.
//!
//! All files of a set are created together. A set is finished with exactly one of
//! [ArtifactSet::commit], which flushes and keeps the files, or [ArtifactSet::rollback], which
//! closes and deletes them. Rollback is used when the operator cancels a tape. A commit that
//! cannot flush every file rolls the set back instead.

use std::{
    fmt::{self, Display, Formatter},
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::TapeError;

/// The kinds of file written for a tape. All outputs are headerless byte dumps.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ArtifactKind {
    /// Raw tape bytes, exactly as received from the reader.
    Raw,
    /// Unscrambled Flexowriter codes, one per raw byte.
    Flex,
    /// Decoded ASCII.
    Ascii,
    /// Unscrambled Flexowriter codes produced by converting a raw image.
    FlexConverted,
    /// Decoded ASCII produced by converting a raw image.
    AsciiConverted,
}

impl ArtifactKind {
    /// Output kinds written while reading a tape from a reader.
    pub const LIVE: [ArtifactKind; 3] = [ArtifactKind::Raw, ArtifactKind::Flex, ArtifactKind::Ascii];
    /// Output kinds written when converting a raw tape image.
    pub const CONVERTED: [ArtifactKind; 2] = [ArtifactKind::FlexConverted, ArtifactKind::AsciiConverted];

    pub fn ext(&self) -> &'static str {
        match self {
            ArtifactKind::Raw => "raw",
            ArtifactKind::Flex => "flx",
            ArtifactKind::Ascii => "asc",
            ArtifactKind::FlexConverted => "flx2",
            ArtifactKind::AsciiConverted => "asc2",
        }
    }

    /// Build the file name for this kind from a base name given without suffix.
    /// The suffix is appended, so a base name containing dots is kept intact.
    pub fn path_for(&self, base: &Path) -> PathBuf {
        let mut name = base.as_os_str().to_owned();
        name.push(".");
        name.push(self.ext());
        PathBuf::from(name)
    }
}

impl Display for ArtifactKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Raw => write!(f, "Raw tape data"),
            ArtifactKind::Flex => write!(f, "Flexowriter code"),
            ArtifactKind::Ascii => write!(f, "ASCII"),
            ArtifactKind::FlexConverted => write!(f, "Flexowriter code (converted)"),
            ArtifactKind::AsciiConverted => write!(f, "ASCII (converted)"),
        }
    }
}

struct Artifact {
    kind:   ArtifactKind,
    path:   PathBuf,
    writer: Box<dyn Write>,
}

pub struct ArtifactSet {
    artifacts: Vec<Artifact>,
}

impl ArtifactSet {
    /// Create one output file per kind from `base`. Existing files are truncated.
    ///
    /// If any file cannot be created, the files already created by this call are removed again
    /// before the error is returned.
    pub fn create(base: &Path, kinds: &[ArtifactKind]) -> Result<Self, TapeError> {
        let mut artifacts: Vec<Artifact> = Vec::with_capacity(kinds.len());

        for &kind in kinds {
            let path = kind.path_for(base);
            match File::create(&path) {
                Ok(file) => {
                    log::debug!("ArtifactSet::create(): created {}", path.display());
                    artifacts.push(Artifact {
                        kind,
                        path,
                        writer: Box::new(BufWriter::new(file)),
                    });
                }
                Err(e) => {
                    log::warn!("ArtifactSet::create(): could not create {}: {}", path.display(), e);
                    // Don't leave half a set behind.
                    if let Err(cleanup_err) = (ArtifactSet { artifacts }).rollback() {
                        log::warn!("ArtifactSet::create(): cleanup failed: {}", cleanup_err);
                    }
                    return Err(TapeError::ArtifactCreateError {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(ArtifactSet { artifacts })
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.artifacts.iter().map(|a| a.path.clone()).collect()
    }

    pub fn path(&self, kind: ArtifactKind) -> Option<&Path> {
        self.artifacts.iter().find(|a| a.kind == kind).map(|a| a.path.as_path())
    }

    /// Write `bytes` to the file of the specified output kind.
    pub fn write(&mut self, kind: ArtifactKind, bytes: &[u8]) -> Result<(), TapeError> {
        let artifact = self
            .artifacts
            .iter_mut()
            .find(|a| a.kind == kind)
            .ok_or(TapeError::ArtifactNotOpen(kind))?;
        artifact.writer.write_all(bytes)?;
        Ok(())
    }

    /// Flush and close every file, keeping them on disk. Returns the paths written.
    ///
    /// Every file is flushed before any is kept. If a flush fails, the whole set is removed and
    /// the error returned.
    pub fn commit(mut self) -> Result<Vec<PathBuf>, TapeError> {
        let mut flush_error = None;
        for artifact in self.artifacts.iter_mut() {
            if let Err(e) = artifact.writer.flush() {
                log::error!("ArtifactSet::commit(): could not write {}: {}", artifact.path.display(), e);
                flush_error = Some(e);
                break;
            }
        }

        if let Some(e) = flush_error {
            if let Err(cleanup_err) = self.rollback() {
                log::warn!("ArtifactSet::commit(): cleanup failed: {}", cleanup_err);
            }
            return Err(e.into());
        }

        Ok(self
            .artifacts
            .into_iter()
            .map(|artifact| {
                log::debug!("ArtifactSet::commit(): wrote {}", artifact.path.display());
                artifact.path
            })
            .collect())
    }

    /// Close and delete every file in the set.
    ///
    /// Every file is attempted even if an earlier removal fails; the first failure is returned.
    pub fn rollback(self) -> Result<(), TapeError> {
        let mut result = Ok(());
        for artifact in self.artifacts {
            let Artifact { path, writer, .. } = artifact;
            // Windows won't remove a file that is still open.
            drop(writer);
            match std::fs::remove_file(&path) {
                Ok(_) => log::debug!("ArtifactSet::rollback(): removed {}", path.display()),
                Err(e) => {
                    log::warn!("ArtifactSet::rollback(): could not remove {}: {}", path.display(), e);
                    if result.is_ok() {
                        result = Err(TapeError::from(e));
                    }
                }
            }
        }
        result
    }
}
