//! Persistent storage for the series cache.
//!
//! [`SeriesStore`] is the seam between the pipeline and its persistence so a
//! deployment can swap the flat file for a transactional store. [`CsvStore`]
//! is the stock implementation: one human-readable CSV per deployment,
//! rewritten in full on every merge, with merges serialized internally.

use crate::series::error::SeriesError;
use crate::series::frame::{cache_schema, empty_frame};
use crate::series::merge::merge_frames;
use crate::types::metric::MetricProfile;
use log::{debug, info, warn};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tokio::{fs, task};

/// Storage abstraction for the persisted series dataset.
#[allow(async_fn_in_trait)]
pub trait SeriesStore {
    /// Loads the full persisted dataset, creating empty storage if absent.
    async fn load(&self) -> Result<DataFrame, SeriesError>;

    /// Merges `incoming` into the persisted dataset (keep-last dedup on the
    /// natural key, sorted by date) and returns the full updated dataset.
    async fn merge_and_save(&self, incoming: DataFrame) -> Result<DataFrame, SeriesError>;
}

/// Flat-file store backing the cache with a single CSV.
pub struct CsvStore {
    path: PathBuf,
    profile: MetricProfile,
    merge_lock: Mutex<()>,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>, profile: MetricProfile) -> Self {
        Self {
            path: path.into(),
            profile,
            merge_lock: Mutex::new(()),
        }
    }

    /// Location of the backing CSV file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_frame(&self) -> Result<DataFrame, SeriesError> {
        if fs::metadata(&self.path).await.is_err() {
            warn!(
                "Cache file {} not found, initializing empty cache",
                self.path.display()
            );
            let empty = empty_frame(&self.profile)?;
            // Header-only file on first run so the deployment always has an
            // inspectable artifact on disk.
            self.write_frame(empty.clone()).await?;
            return Ok(empty);
        }

        debug!("Cache hit for {}", self.path.display());
        let path = self.path.clone();
        let schema = Arc::new(cache_schema(&self.profile));
        task::spawn_blocking(move || {
            CsvReadOptions::default()
                .with_has_header(true)
                .with_schema_overwrite(Some(schema))
                .try_into_reader_with_file_path(Some(path.clone()))
                .map_err(|e| SeriesError::CacheReadPolars(path.clone(), e))?
                .finish()
                .map_err(|e| SeriesError::CacheReadPolars(path, e))
        })
        .await?
    }

    async fn write_frame(&self, mut frame: DataFrame) -> Result<(), SeriesError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| SeriesError::CacheDirCreation(parent.to_path_buf(), e))?;
            }
        }

        let path = self.path.clone();
        task::spawn_blocking(move || {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
            // Write to a temp file in the same directory, then persist, so a
            // crashed rewrite never leaves a truncated cache behind.
            let mut tmp = NamedTempFile::new_in(&dir)
                .map_err(|e| SeriesError::CacheWriteIo(path.clone(), e))?;
            CsvWriter::new(&mut tmp)
                .include_header(true)
                .finish(&mut frame)
                .map_err(|e| SeriesError::CacheWritePolars(path.clone(), e))?;
            tmp.persist(&path)
                .map_err(|e| SeriesError::CacheWriteIo(path.clone(), e.error))?;
            Ok::<(), SeriesError>(())
        })
        .await??;
        Ok(())
    }
}

impl SeriesStore for CsvStore {
    async fn load(&self) -> Result<DataFrame, SeriesError> {
        self.read_frame().await
    }

    async fn merge_and_save(&self, incoming: DataFrame) -> Result<DataFrame, SeriesError> {
        // One merge at a time; concurrent requests serialize here instead of
        // interleaving read-modify-write cycles on the shared file.
        let _guard = self.merge_lock.lock().await;

        let existing = self.read_frame().await?;
        let merged = merge_frames(&existing, &incoming)?;
        self.write_frame(merged.clone()).await?;
        info!(
            "Persisted {} records to {}",
            merged.height(),
            self.path.display()
        );
        Ok(merged)
    }
}
