//! Compromised password list sources
//!
//! A source hands out the literal passwords known to have leaked. Lookups
//! are exact and case-sensitive. A source that cannot reach its backing
//! resource reports an empty list instead of failing: an unavailable list
//! weakens the policy silently, it never blocks an evaluation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Provider of known-compromised password literals.
pub trait CompromisedListSource: Send + Sync {
    /// Returns every known-compromised password, in no particular order.
    fn fetch(&self) -> Vec<String>;

    /// Returns `true` if `password` is an exact entry of the list.
    fn contains(&self, password: &str) -> bool {
        self.fetch().iter().any(|entry| entry == password)
    }
}

/// Source with no entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyListSource;

impl CompromisedListSource for EmptyListSource {
    fn fetch(&self) -> Vec<String> {
        Vec::new()
    }

    fn contains(&self, _password: &str) -> bool {
        false
    }
}

/// In-memory list, e.g. a dataset embedded with `include_str!`.
#[derive(Debug, Clone, Default)]
pub struct StaticListSource {
    entries: HashSet<String>,
}

impl StaticListSource {
    pub fn new<I, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a list from newline separated text.
    pub fn from_lines(text: &str) -> Self {
        Self::new(parse_lines(text))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CompromisedListSource for StaticListSource {
    fn fetch(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    fn contains(&self, password: &str) -> bool {
        self.entries.contains(password)
    }
}

impl CompromisedListSource for Vec<String> {
    fn fetch(&self) -> Vec<String> {
        self.clone()
    }
}

/// List backed by a local file, re-read on every call.
#[derive(Debug, Clone)]
pub struct FileListSource {
    path: PathBuf,
}

impl FileListSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CompromisedListSource for FileListSource {
    fn fetch(&self) -> Vec<String> {
        match std::fs::read(&self.path) {
            Ok(bytes) => {
                let entries: Vec<String> = parse_lines(&String::from_utf8_lossy(&bytes)).collect();

                #[cfg(feature = "tracing")]
                tracing::trace!("Compromised list read: {} entries from {:?}", entries.len(), self.path);

                entries
            }
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    "Compromised list unavailable at {:?}, treating as empty: {}",
                    self.path,
                    _e
                );
                Vec::new()
            }
        }
    }
}

/// Caches the entries of another source as an immutable snapshot.
///
/// The snapshot is loaded on first lookup and then served as-is: changes to
/// the backing resource stay invisible until [`refresh`](Self::refresh) or
/// [`invalidate`](Self::invalidate) is called. A refresh swaps in a complete
/// new snapshot, so concurrent readers see either the old or the new list,
/// never a partial one.
#[derive(Debug)]
pub struct CachedListSource<S> {
    inner: S,
    snapshot: RwLock<Option<Arc<HashSet<String>>>>,
}

impl<S: CompromisedListSource> CachedListSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            snapshot: RwLock::new(None),
        }
    }

    /// Returns the current snapshot, loading it if none is cached.
    pub fn snapshot(&self) -> Arc<HashSet<String>> {
        {
            let guard = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(snapshot) = guard.as_ref() {
                return Arc::clone(snapshot);
            }
        }

        let mut guard = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        // Another reader may have loaded it while we waited for the write lock.
        if let Some(snapshot) = guard.as_ref() {
            return Arc::clone(snapshot);
        }
        let snapshot = self.load();
        *guard = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Reloads the backing source now and returns the number of entries.
    pub fn refresh(&self) -> usize {
        let snapshot = self.load();
        let count = snapshot.len();
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = Some(snapshot);
        count
    }

    /// Drops the cached snapshot; the next lookup reloads the source.
    pub fn invalidate(&self) {
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn load(&self) -> Arc<HashSet<String>> {
        let set: HashSet<String> = self.inner.fetch().into_iter().collect();

        #[cfg(feature = "tracing")]
        tracing::info!("Compromised list cached: {} passwords", set.len());

        Arc::new(set)
    }
}

impl<S: CompromisedListSource> CompromisedListSource for CachedListSource<S> {
    fn fetch(&self) -> Vec<String> {
        self.snapshot().iter().cloned().collect()
    }

    fn contains(&self, password: &str) -> bool {
        self.snapshot().contains(password)
    }
}

fn parse_lines(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn setup_with_tempfile(passwords: &[&str]) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        for pwd in passwords {
            writeln!(temp_file, "{}", pwd).expect("Failed to write");
        }
        temp_file
    }

    fn rewrite(temp_file: &NamedTempFile, passwords: &[&str]) {
        std::fs::write(temp_file.path(), passwords.join("\n")).expect("Failed to rewrite");
    }

    #[test]
    fn test_empty_source() {
        assert!(EmptyListSource.fetch().is_empty());
        assert!(!EmptyListSource.contains(""));
        assert!(!EmptyListSource.contains("password1"));
    }

    #[test]
    fn test_static_source_exact_match() {
        let source = StaticListSource::new(["Password1", "qwerty"]);
        assert_eq!(source.len(), 2);
        assert!(source.contains("Password1"));
        assert!(!source.contains("password1")); // case sensitive
        assert!(!source.contains("Password")); // no substring match
        assert!(!source.contains("Password1 "));
    }

    #[test]
    fn test_static_source_from_lines() {
        let source = StaticListSource::from_lines("password1\r\n123456\n\nqwerty\n");
        assert_eq!(source.len(), 3);
        assert!(source.contains("password1"));
        assert!(source.contains("qwerty"));
        assert!(!source.contains(""));
    }

    #[test]
    fn test_vec_source_uses_default_lookup() {
        let source = vec!["Password1".to_string()];
        assert!(source.contains("Password1"));
        assert!(!source.contains("Password2"));
    }

    #[test]
    fn test_file_source_reads_entries() {
        let temp_file = setup_with_tempfile(&["password1", "Summer2024"]);
        let source = FileListSource::new(temp_file.path());

        let mut entries = source.fetch();
        entries.sort();
        assert_eq!(entries, vec!["Summer2024".to_string(), "password1".to_string()]);
        assert!(source.contains("Summer2024"));
        assert!(!source.contains("summer2024"));
    }

    #[test]
    fn test_file_source_keeps_surrounding_whitespace() {
        let temp_file = setup_with_tempfile(&[" padded "]);
        let source = FileListSource::new(temp_file.path());
        assert!(source.contains(" padded "));
        assert!(!source.contains("padded"));
    }

    #[test]
    fn test_file_source_missing_file_is_empty() {
        let source = FileListSource::new("/nonexistent/path/blacklist.txt");
        assert!(source.fetch().is_empty());
        assert!(!source.contains("password1"));
    }

    #[test]
    fn test_file_source_is_read_on_every_call() {
        let temp_file = setup_with_tempfile(&["first"]);
        let source = FileListSource::new(temp_file.path());
        assert!(source.contains("first"));

        rewrite(&temp_file, &["second"]);
        assert!(!source.contains("first"));
        assert!(source.contains("second"));
    }

    #[test]
    fn test_file_source_tolerates_invalid_utf8() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        temp_file.write_all(b"\xff\xfe\nletmein\n").expect("Failed to write");
        let source = FileListSource::new(temp_file.path());
        assert!(source.contains("letmein"));
    }

    #[test]
    fn test_cached_source_is_stale_until_refresh() {
        let temp_file = setup_with_tempfile(&["first"]);
        let source = CachedListSource::new(FileListSource::new(temp_file.path()));
        assert!(source.contains("first"));

        rewrite(&temp_file, &["second"]);
        assert!(source.contains("first"));
        assert!(!source.contains("second"));

        assert_eq!(source.refresh(), 1);
        assert!(!source.contains("first"));
        assert!(source.contains("second"));
    }

    #[test]
    fn test_cached_source_invalidate_reloads_lazily() {
        let temp_file = setup_with_tempfile(&["first"]);
        let source = CachedListSource::new(FileListSource::new(temp_file.path()));
        assert!(source.contains("first"));

        rewrite(&temp_file, &["second", "third"]);
        source.invalidate();
        assert!(source.contains("third"));
        assert_eq!(source.snapshot().len(), 2);
    }

    #[test]
    fn test_cached_source_missing_file_is_empty() {
        let source = CachedListSource::new(FileListSource::new("/nonexistent/path/blacklist.txt"));
        assert!(source.fetch().is_empty());
        assert_eq!(source.refresh(), 0);
    }

    #[test]
    fn test_cached_snapshot_survives_refresh() {
        let source = CachedListSource::new(StaticListSource::new(["a1B2c3D4"]));
        let before = source.snapshot();
        source.refresh();
        assert!(before.contains("a1B2c3D4"));
        assert!(!Arc::ptr_eq(&before, &source.snapshot()));
    }

    #[test]
    fn test_cached_source_concurrent_readers() {
        let source = Arc::new(CachedListSource::new(StaticListSource::new(["Password1"])));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let source = Arc::clone(&source);
                std::thread::spawn(move || {
                    if i % 2 == 0 {
                        source.refresh();
                    }
                    source.contains("Password1")
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().expect("Reader thread panicked"));
        }
    }
}
