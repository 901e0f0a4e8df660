//! Batch orchestration.
//!
//! Discovers input documents, dispatches each to a bounded worker pool,
//! and tallies per-document outcomes. Documents are processed and
//! serialized independently; the pool is the only synchronization point.
//! If the pool itself cannot be constructed, the whole batch falls back
//! to sequential processing of the same input list.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::extract::extract_file;

/// Hard cap on worker count; bounds aggregate memory given that each
/// worker may hold a full document's decoded span data in flight.
pub const MAX_WORKERS: usize = 4;

/// Default bounded wait per worker task.
pub const DEFAULT_TASK_TIMEOUT: Duration = Duration::from_secs(300);

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Worker count override; defaults to `min(4, available_parallelism)`
    pub max_workers: Option<usize>,
    /// Maximum wait for any single worker task; expiry counts as failure
    pub task_timeout: Duration,
}

impl BatchOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the worker count cap.
    pub fn with_max_workers(mut self, workers: usize) -> Self {
        self.max_workers = Some(workers);
        self
    }

    /// Set the per-task timeout.
    pub fn with_task_timeout(mut self, timeout: Duration) -> Self {
        self.task_timeout = timeout;
        self
    }

    fn worker_count(&self) -> usize {
        self.max_workers
            .unwrap_or_else(|| {
                let available = std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1);
                MAX_WORKERS.min(available)
            })
            .max(1)
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_workers: None,
            task_timeout: DEFAULT_TASK_TIMEOUT,
        }
    }
}

/// Outcome tally of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Number of discovered input documents
    pub total: usize,
    /// Number of documents whose artifact was written
    pub succeeded: usize,
}

impl BatchSummary {
    /// Number of failed documents.
    pub fn failed(&self) -> usize {
        self.total - self.succeeded
    }

    /// Whether every discovered document produced an artifact.
    pub fn all_succeeded(&self) -> bool {
        self.succeeded == self.total
    }
}

/// Discover PDF inputs in a directory, sorted for deterministic order.
pub fn discover_inputs(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                    .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Extract one document and write its artifact to `<stem>.json`.
///
/// Returns whether the artifact was written. Extraction itself never
/// fails; only serialization or the write can, and the artifact is only
/// written after the full result has been assembled.
pub fn process_single(path: &Path, output_dir: &Path) -> bool {
    let result = extract_file(path);

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    let artifact = output_dir.join(format!("{}.json", stem));

    let write = result
        .to_json()
        .and_then(|json| fs::write(&artifact, json).map_err(Error::from));

    match write {
        Ok(()) => {
            log::info!("Generated {}", artifact.display());
            true
        }
        Err(e) => {
            log::error!("Failed to write artifact for {}: {}", path.display(), e);
            false
        }
    }
}

/// Process all PDF documents in `input_dir`, writing one artifact per
/// input under `output_dir`.
///
/// Every discovered input yields exactly one artifact or one logged
/// failure. An empty input directory is a clean no-op.
pub fn run_batch(input_dir: &Path, output_dir: &Path, options: &BatchOptions) -> Result<BatchSummary> {
    let files = discover_inputs(input_dir)?;

    if files.is_empty() {
        log::warn!("No PDF files found in {}", input_dir.display());
        return Ok(BatchSummary::default());
    }

    fs::create_dir_all(output_dir)?;
    log::info!("Found {} PDF files to process", files.len());

    let summary = if files.len() == 1 {
        // Single file: process directly, no pooling
        let succeeded = usize::from(process_single(&files[0], output_dir));
        BatchSummary {
            total: 1,
            succeeded,
        }
    } else {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(options.worker_count())
            .build()
        {
            Ok(pool) => process_pooled(&pool, &files, output_dir, options.task_timeout),
            Err(e) => {
                log::error!("Worker pool failed, falling back to sequential: {}", e);
                process_sequential(&files, output_dir)
            }
        }
    };

    log::info!(
        "Processing complete: {}/{} files successful",
        summary.succeeded,
        summary.total
    );
    Ok(summary)
}

/// Sequential fallback path: same inputs, same per-document handling.
fn process_sequential(files: &[PathBuf], output_dir: &Path) -> BatchSummary {
    let succeeded = files
        .iter()
        .filter(|path| process_single(path, output_dir))
        .count();
    BatchSummary {
        total: files.len(),
        succeeded,
    }
}

/// Pooled path: one task per document, outcomes collected over a channel
/// with a bounded wait so a hung worker cannot stall the batch forever.
fn process_pooled(
    pool: &rayon::ThreadPool,
    files: &[PathBuf],
    output_dir: &Path,
    task_timeout: Duration,
) -> BatchSummary {
    let (tx, rx) = crossbeam_channel::unbounded::<bool>();

    for path in files {
        let tx = tx.clone();
        let path = path.clone();
        let output_dir = output_dir.to_path_buf();
        pool.spawn(move || {
            let ok = process_single(&path, &output_dir);
            // The receiver may have given up after a timeout
            let _ = tx.send(ok);
        });
    }
    drop(tx);

    collect_outcomes(&rx, files.len(), task_timeout)
}

/// Drain task outcomes with a bounded wait per receive. A timeout (or a
/// lost sender) stops the drain; tasks that never reported count as
/// failures in the tally.
fn collect_outcomes(
    rx: &crossbeam_channel::Receiver<bool>,
    expected: usize,
    task_timeout: Duration,
) -> BatchSummary {
    let mut succeeded = 0;
    for completed in 0..expected {
        match rx.recv_timeout(task_timeout) {
            Ok(true) => succeeded += 1,
            Ok(false) => {}
            Err(_) => {
                log::error!(
                    "Timed out waiting for worker tasks ({}/{} completed)",
                    completed,
                    expected
                );
                break;
            }
        }
    }

    BatchSummary {
        total: expected,
        succeeded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_input_dir_is_clean_noop() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();

        let summary =
            run_batch(input.path(), output.path(), &BatchOptions::default()).unwrap();
        assert_eq!(summary, BatchSummary::default());
        assert!(summary.all_succeeded());
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let input = tempdir().unwrap();
        fs::write(input.path().join("b.pdf"), b"x").unwrap();
        fs::write(input.path().join("a.PDF"), b"x").unwrap();
        fs::write(input.path().join("notes.txt"), b"x").unwrap();

        let files = discover_inputs(input.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf"]);
    }

    #[test]
    fn test_corrupt_input_still_yields_artifact() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        fs::write(input.path().join("broken.pdf"), b"not a pdf at all").unwrap();

        let summary =
            run_batch(input.path(), output.path(), &BatchOptions::default()).unwrap();
        assert_eq!(summary.total, 1);
        assert_eq!(summary.succeeded, 1);

        // The artifact carries the minimal valid result with the error
        let json = fs::read_to_string(output.path().join("broken.json")).unwrap();
        let result: crate::model::DocumentResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result.filename, "broken.pdf");
        assert_eq!(result.metadata.page_count, 0);
        assert!(result.processing_info.error.is_some());
    }

    #[test]
    fn test_every_input_yields_exactly_one_outcome() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        for name in ["one.pdf", "two.pdf", "three.pdf"] {
            fs::write(input.path().join(name), b"garbage").unwrap();
        }

        let summary =
            run_batch(input.path(), output.path(), &BatchOptions::default()).unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 3);

        let artifacts = fs::read_dir(output.path()).unwrap().count();
        assert_eq!(artifacts, 3);
    }

    #[test]
    fn test_sequential_matches_pooled_tally() {
        let input = tempdir().unwrap();
        for name in ["one.pdf", "two.pdf"] {
            fs::write(input.path().join(name), b"garbage").unwrap();
        }
        let files = discover_inputs(input.path()).unwrap();

        let seq_out = tempdir().unwrap();
        let seq = process_sequential(&files, seq_out.path());

        let pool = rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap();
        let pool_out = tempdir().unwrap();
        let pooled = process_pooled(&pool, &files, pool_out.path(), DEFAULT_TASK_TIMEOUT);

        assert_eq!(seq, pooled);
    }

    #[test]
    fn test_hung_worker_counts_as_failure() {
        let (tx, rx) = crossbeam_channel::unbounded::<bool>();
        tx.send(true).unwrap();
        // The second task never reports; tx stays alive so the collector
        // must give up on the timeout rather than a disconnect
        let summary = collect_outcomes(&rx, 2, Duration::from_millis(50));
        assert_eq!(summary.total, 2);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed(), 1);
        drop(tx);
    }

    #[test]
    fn test_worker_count_bounds() {
        let options = BatchOptions::default();
        let workers = options.worker_count();
        assert!(workers >= 1 && workers <= MAX_WORKERS);

        let options = BatchOptions::new().with_max_workers(16);
        assert_eq!(options.worker_count(), 16);

        let options = BatchOptions::new().with_max_workers(0);
        assert_eq!(options.worker_count(), 1);
    }
}
