use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::loader::{self, LoadError};
use super::model::ListingTable;

// ---------------------------------------------------------------------------
// Table sources
// ---------------------------------------------------------------------------

/// Anything that can produce a [`ListingTable`] from a path.
pub trait TableSource {
    fn load(&self, path: &Path) -> Result<ListingTable, LoadError>;
}

/// Reads tables from disk via [`loader::load_table`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSource;

impl TableSource for FileSource {
    fn load(&self, path: &Path) -> Result<ListingTable, LoadError> {
        loader::load_table(path)
    }
}

// ---------------------------------------------------------------------------
// Memoizing cache
// ---------------------------------------------------------------------------

/// Memoizes loaded tables per distinct path.
///
/// Entries live as long as the cache (one per session, so until the process
/// exits) unless dropped with [`invalidate`](Self::invalidate).  Failed
/// loads are never cached, so a file that appears later is picked up on the
/// next request.
pub struct TableCache<S = FileSource> {
    source: S,
    entries: HashMap<PathBuf, Arc<ListingTable>>,
    reads: usize,
}

impl Default for TableCache<FileSource> {
    fn default() -> Self {
        Self::with_source(FileSource)
    }
}

impl<S: TableSource> TableCache<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            entries: HashMap::new(),
            reads: 0,
        }
    }

    /// Return the cached table for `path`, loading it on first use.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<ListingTable>, LoadError> {
        if let Some(table) = self.entries.get(path) {
            log::debug!("cache hit for {}", path.display());
            return Ok(Arc::clone(table));
        }

        self.reads += 1;
        let table = Arc::new(self.source.load(path)?);
        log::info!(
            "Loaded {} listings with columns {:?} from {}",
            table.len(),
            table.columns(),
            path.display()
        );
        self.entries.insert(path.to_path_buf(), Arc::clone(&table));
        Ok(table)
    }

    /// Drop the entry for `path`.  Returns whether one was cached.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// How many times the underlying source has been asked to load.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::Builder;

    fn csv_file() -> tempfile::NamedTempFile {
        let mut tmp = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(tmp, "price,odometer").unwrap();
        writeln!(tmp, "9400,145000").unwrap();
        tmp
    }

    #[test]
    fn second_load_is_served_from_cache() {
        let tmp = csv_file();
        let mut cache = TableCache::default();

        let first = cache.get_or_load(tmp.path()).unwrap();
        let second = cache.get_or_load(tmp.path()).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.reads(), 1);
        assert_eq!(cache.entry_count(), 1);
    }

    #[test]
    fn cached_table_survives_file_removal() {
        let tmp = csv_file();
        let path = tmp.path().to_path_buf();
        let mut cache = TableCache::default();

        cache.get_or_load(&path).unwrap();
        drop(tmp);
        assert!(!path.exists());

        let table = cache.get_or_load(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(cache.reads(), 1);
    }

    #[test]
    fn invalidate_forces_reload() {
        let tmp = csv_file();
        let mut cache = TableCache::default();

        let first = cache.get_or_load(tmp.path()).unwrap();
        assert!(cache.invalidate(tmp.path()));
        assert!(!cache.invalidate(tmp.path()));
        let second = cache.get_or_load(tmp.path()).unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(cache.reads(), 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vehicles_us.csv");
        let mut cache = TableCache::default();

        assert!(cache.get_or_load(&path).is_err());
        assert_eq!(cache.entry_count(), 0);

        std::fs::write(&path, "price\n1\n").unwrap();
        assert_eq!(cache.get_or_load(&path).unwrap().len(), 1);
        assert_eq!(cache.reads(), 2);
    }
}
