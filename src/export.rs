use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

// ---------------------------------------------------------------------------
// Cleaned sample download
// ---------------------------------------------------------------------------

/// A pre-existing cleaned sample file that can be offered for download.
///
/// Bytes are copied verbatim; nothing is transformed.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleFile {
    path: PathBuf,
    size: u64,
}

impl SampleFile {
    /// `Some` only when `path` is an existing regular file.
    pub fn locate(path: &Path) -> Option<Self> {
        let meta = std::fs::metadata(path).ok()?;
        meta.is_file().then(|| SampleFile {
            path: path.to_path_buf(),
            size: meta.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// File name suggested in the save dialog.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sample.csv".to_string())
    }

    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        std::fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))
    }

    /// Write the sample's bytes to `dest`.  Returns the number of bytes written.
    pub fn export_to(&self, dest: &Path) -> Result<usize> {
        let bytes = self.read_bytes()?;
        std::fs::write(dest, &bytes).with_context(|| format!("writing {}", dest.display()))?;
        log::info!(
            "Exported {} ({} bytes) to {}",
            self.path.display(),
            bytes.len(),
            dest.display()
        );
        Ok(bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn absent_file_offers_nothing() {
        let dir = tempdir().unwrap();
        assert!(SampleFile::locate(&dir.path().join("vehicles_clean_sample.csv")).is_none());
        assert!(SampleFile::locate(dir.path()).is_none());
    }

    #[test]
    fn export_copies_bytes_verbatim() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("vehicles_clean_sample.csv");
        let content = b"price,odometer\r\n9400,145000\r\n\xef\xbb\xbf5500,\n";
        std::fs::write(&src, content).unwrap();

        let sample = SampleFile::locate(&src).unwrap();
        assert_eq!(sample.size(), content.len() as u64);
        assert_eq!(sample.file_name(), "vehicles_clean_sample.csv");
        assert_eq!(sample.read_bytes().unwrap(), content);

        let dest = dir.path().join("download.csv");
        assert_eq!(sample.export_to(&dest).unwrap(), content.len());
        assert_eq!(std::fs::read(&dest).unwrap(), std::fs::read(&src).unwrap());
    }
}
