use std::path::{Path, PathBuf};
use serde::Serialize;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::error::{PreprocessError, Result};
use super::chunk::{parse_chunk, TupleRecord, TypeRecord};

/// Counters collected while walking a chunk directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WalkStats {
    pub files_seen: usize,
    pub files_failed: usize,
    pub tuples_kept: usize,
}

/// Visits every chunk file below a root directory and feeds its tuples to a processor
pub struct ChunkWalker {
    root: PathBuf,
}

impl ChunkWalker {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(PreprocessError::Config(format!(
                "input directory {} does not exist", root.display()
            )));
        }

        Ok(Self { root: root.to_path_buf() })
    }

    /// Walk all files, calling `process` on every tuple accepted by `keep`.
    ///
    /// A file that fails to decode or walk is logged and skipped; whatever it
    /// contributed before the failure stays in `storage`.
    pub fn walk<S, K, P>(&self, storage: &mut S, mut keep: K, mut process: P) -> WalkStats
    where
        K: FnMut(&TupleRecord<'_>) -> bool,
        P: FnMut(&mut S, &TupleRecord<'_>) -> Result<()>,
    {
        let mut stats = WalkStats::default();

        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            stats.files_seen += 1;
            let file_name = entry.file_name().to_string_lossy();
            info!("Elaborating: {} -- {}", stats.files_seen, file_name);

            match walk_file(entry.path(), storage, &mut keep, &mut process) {
                Ok(kept) => {
                    debug!("{} tuples kept from {}", kept, entry.path().display());
                    stats.tuples_kept += kept;
                }
                Err(e) => {
                    stats.files_failed += 1;
                    error!("Error reading file: {} -- {}: {}", stats.files_seen, entry.path().display(), e);
                }
            }
        }

        stats
    }
}

fn walk_file<S, K, P>(path: &Path, storage: &mut S, keep: &mut K, process: &mut P) -> Result<usize>
where
    K: FnMut(&TupleRecord<'_>) -> bool,
    P: FnMut(&mut S, &TupleRecord<'_>) -> Result<()>,
{
    let bytes = std::fs::read(path)?;
    let types = parse_chunk(&bytes, path)?;
    let mut kept = 0;

    for raw_type in &types {
        let type_record = TypeRecord::new(raw_type)?;
        if !type_record.is_class() {
            continue;
        }

        for method in type_record.methods()? {
            for tuple in method.tuples()? {
                if keep(&tuple) {
                    kept += 1;
                    process(storage, &tuple)?;
                }
            }
        }
    }

    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    const CHUNK: &str = r#"[
        {"class": "A", "methods": [
            {"name": "m", "tuples": [
                {"type": "call", "values": [{"type": "string", "value": "x"}]},
                {"type": "field", "values": []}
            ]}
        ]},
        {"interface": "B"}
    ]"#;

    #[test]
    fn test_missing_root_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ChunkWalker::new(dir.path().join("nope"));
        assert!(matches!(result, Err(PreprocessError::Config(_))));
    }

    #[test]
    fn test_walks_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.json", CHUNK);
        write(dir.path(), "nested/deeper/b.json", CHUNK);

        let walker = ChunkWalker::new(dir.path()).unwrap();
        let mut seen = Vec::new();
        let stats = walker.walk(&mut seen, |_| true, |seen: &mut Vec<String>, t| {
            seen.push(t.kind().unwrap_or_default().to_string());
            Ok(())
        });

        assert_eq!(stats.files_seen, 2);
        assert_eq!(stats.files_failed, 0);
        assert_eq!(stats.tuples_kept, 4);
        assert_eq!(seen, vec!["call", "field", "call", "field"]);
    }

    #[test]
    fn test_bad_file_does_not_stop_walk() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "1.json", "{ not json");
        write(dir.path(), "2.json", CHUNK);

        let walker = ChunkWalker::new(dir.path()).unwrap();
        let mut count = 0usize;
        let stats = walker.walk(&mut count, |t| t.is_call(), |count: &mut usize, _| {
            *count += 1;
            Ok(())
        });

        assert_eq!(stats.files_seen, 2);
        assert_eq!(stats.files_failed, 1);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_partial_contributions_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "partial.json", r#"[
            {"class": "A", "methods": [
                {"name": "ok", "tuples": [{"type": "call", "values": []}]},
                {"name": "broken"}
            ]}
        ]"#);

        let walker = ChunkWalker::new(dir.path()).unwrap();
        let mut count = 0usize;
        let stats = walker.walk(&mut count, |_| true, |count: &mut usize, _| {
            *count += 1;
            Ok(())
        });

        assert_eq!(stats.files_failed, 1);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_skipped_tuples_are_never_decoded() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "sparse.json", r#"[
            {"class": "A", "methods": [
                {"name": "m", "tuples": [
                    {"type": "field"},
                    {"type": "field", "values": [{"value": 1}]},
                    {"type": "call", "values": [{"type": "string", "value": "x"}]}
                ]}
            ]}
        ]"#);

        let walker = ChunkWalker::new(dir.path()).unwrap();
        let mut count = 0usize;
        let stats = walker.walk(&mut count, |t| t.is_call(), |count: &mut usize, _| {
            *count += 1;
            Ok(())
        });

        assert_eq!(stats.files_failed, 0);
        assert_eq!(stats.tuples_kept, 1);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_processor_error_fails_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.json", CHUNK);

        let walker = ChunkWalker::new(dir.path()).unwrap();
        let stats = walker.walk(&mut (), |t| t.is_call(), |_: &mut (), _| {
            Err(PreprocessError::Structure("boom".to_string()))
        });

        assert_eq!(stats.files_failed, 1);
    }
}
