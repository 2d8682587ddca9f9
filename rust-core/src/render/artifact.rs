//! Encoded outputs handed back to the caller

use crate::error::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Png,
    Wav,
}

impl ArtifactKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactKind::Png => "png",
            ArtifactKind::Wav => "wav",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ArtifactKind::Png => "image/png",
            ArtifactKind::Wav => "audio/wav",
        }
    }
}

/// Encoded plot image or audio file, held in memory
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedArtifact {
    /// Base name without extension, e.g. `filtered_signal`
    pub name: String,
    pub kind: ArtifactKind,
    pub bytes: Vec<u8>,
}

impl RenderedArtifact {
    pub fn new(name: impl Into<String>, kind: ArtifactKind, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            kind,
            bytes,
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.kind.extension())
    }

    /// Write into `dir`, replacing a file of the same name
    pub fn write_to<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let path = dir.as_ref().join(self.file_name());
        std::fs::write(&path, &self.bytes)?;
        log::debug!("Wrote {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}
