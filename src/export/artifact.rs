//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Zi Export.
//! The Zi Export project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::errors::{Result, ZiError};
use crate::export::options::ZiExportFormat;

/// Named output blob produced by one export call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZiArtifact {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ZiArtifact {
    pub fn new(filename: impl Into<String>, format: ZiExportFormat, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: format.mime_type(),
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Borrows the content as UTF-8 text. Fails for binary workbooks.
    pub fn as_text(&self) -> Result<&str> {
        std::str::from_utf8(&self.bytes).map_err(|err| {
            ZiError::validation(format!("artifact '{}' is not text: {}", self.filename, err))
        })
    }

    /// Writes the artifact into `dir` and returns the final path.
    ///
    /// Content goes to a hidden temporary file first and is renamed into
    /// place, so readers never observe a partial file. An existing file with
    /// the same name is replaced.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let target = dir.join(&self.filename);
        let temp = dir.join(format!(".{}.tmp", self.filename));

        let write_result = (|| -> Result<()> {
            let mut writer = BufWriter::new(File::create(&temp)?);
            writer.write_all(&self.bytes)?;
            writer.flush()?;
            Ok(())
        })();

        if let Err(err) = write_result {
            let _ = std::fs::remove_file(&temp);
            return Err(err);
        }

        std::fs::rename(&temp, &target)?;
        log::debug!("wrote {} bytes to {}", self.bytes.len(), target.display());
        Ok(target)
    }
}
