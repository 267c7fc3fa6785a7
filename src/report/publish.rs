//! Artifact sinks: where published results end up
//!
//! The pipeline only talks to [`ArtifactSink`]. Which implementation is used
//! is decided once at startup by [`select_sink`].

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use polars::prelude::*;
use serde_json::{json, Value};

use super::artifacts::ArtifactId;

/// File name of the enriched dataset
pub const PREPARED_CSV_NAME: &str = "cars_prepared.csv";

/// File name of the zip bundle written by [`DirectorySink`]
pub const BUNDLE_NAME: &str = "eda_bundle.zip";

/// Destination of published artifacts.
///
/// Every call overwrites what was published before under the same id.
pub trait ArtifactSink {
    /// Short label for status output
    fn name(&self) -> &'static str;

    /// Upsert one JSON artifact
    fn publish(&mut self, id: ArtifactId, value: &Value) -> Result<()>;

    /// Upsert the enriched dataset as CSV
    fn publish_csv(&mut self, dataset: &DataFrame) -> Result<()>;

    /// Called once after everything of a run is published
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Serialize a dataset as CSV with a header row
pub fn dataset_to_csv(dataset: &DataFrame) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut df = dataset.clone();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .finish(&mut df)
        .context("Failed to serialize dataset as CSV")?;
    Ok(buffer)
}

/// Keeps the latest artifacts in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    artifacts: Vec<(ArtifactId, Value)>,
    csv: Option<Vec<u8>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ArtifactId) -> Option<&Value> {
        self.artifacts.iter().find(|(k, _)| *k == id).map(|(_, v)| v)
    }

    pub fn ids(&self) -> Vec<ArtifactId> {
        self.artifacts.iter().map(|(k, _)| *k).collect()
    }

    pub fn csv(&self) -> Option<&[u8]> {
        self.csv.as_deref()
    }
}

impl ArtifactSink for MemorySink {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn publish(&mut self, id: ArtifactId, value: &Value) -> Result<()> {
        match self.artifacts.iter_mut().find(|(k, _)| *k == id) {
            Some(entry) => entry.1 = value.clone(),
            None => self.artifacts.push((id, value.clone())),
        }
        Ok(())
    }

    fn publish_csv(&mut self, dataset: &DataFrame) -> Result<()> {
        self.csv = Some(dataset_to_csv(dataset)?);
        Ok(())
    }
}

/// Writes `<id>.json` files and the prepared CSV into a directory
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    bundle: bool,
    published: Vec<ArtifactId>,
    csv_written: bool,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>, bundle: bool) -> Self {
        Self {
            dir: dir.into(),
            bundle,
            published: Vec::new(),
            csv_written: false,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn artifact_path(&self, id: ArtifactId) -> PathBuf {
        self.dir.join(format!("{}.json", id.as_str()))
    }

    pub fn csv_path(&self) -> PathBuf {
        self.dir.join(PREPARED_CSV_NAME)
    }

    pub fn bundle_path(&self) -> PathBuf {
        self.dir.join(BUNDLE_NAME)
    }

    fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create output directory: {}", self.dir.display()))
    }

    /// Package every published file plus a manifest into a zip archive
    fn write_bundle(&self) -> Result<()> {
        use ::zip::write::SimpleFileOptions;
        use ::zip::ZipWriter;

        let zip_path = self.bundle_path();
        let zip_file = std::fs::File::create(&zip_path)
            .with_context(|| format!("Failed to create zip file: {}", zip_path.display()))?;

        let mut zip = ZipWriter::new(zip_file);
        let options = SimpleFileOptions::default()
            .compression_method(::zip::CompressionMethod::Deflated)
            .unix_permissions(0o644);

        let mut add_file_to_zip = |path: &Path| -> Result<()> {
            let filename = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("artifact");
            let content = std::fs::read(path)
                .with_context(|| format!("Failed to open file: {}", path.display()))?;
            zip.start_file(filename, options)
                .with_context(|| format!("Failed to add {} to zip", filename))?;
            zip.write_all(&content)?;
            Ok(())
        };

        for id in &self.published {
            add_file_to_zip(&self.artifact_path(*id))?;
        }
        if self.csv_written {
            add_file_to_zip(&self.csv_path())?;
        }

        let manifest = json!({
            "generated_at": Utc::now().to_rfc3339(),
            "autoeda_version": env!("CARGO_PKG_VERSION"),
            "artifacts": self.published.iter().map(|id| id.as_str()).collect::<Vec<_>>(),
            "prepared_csv": self.csv_written.then_some(PREPARED_CSV_NAME),
        });
        zip.start_file("manifest.json", options)
            .context("Failed to add manifest.json to zip")?;
        zip.write_all(&serde_json::to_vec_pretty(&manifest)?)?;

        zip.finish().context("Failed to finalize zip file")?;
        Ok(())
    }
}

impl ArtifactSink for DirectorySink {
    fn name(&self) -> &'static str {
        "directory"
    }

    fn publish(&mut self, id: ArtifactId, value: &Value) -> Result<()> {
        self.ensure_dir()?;
        let path = self.artifact_path(id);
        std::fs::write(&path, serde_json::to_vec_pretty(value)?)
            .with_context(|| format!("Failed to write artifact: {}", path.display()))?;
        if !self.published.contains(&id) {
            self.published.push(id);
        }
        Ok(())
    }

    fn publish_csv(&mut self, dataset: &DataFrame) -> Result<()> {
        self.ensure_dir()?;
        let path = self.csv_path();
        std::fs::write(&path, dataset_to_csv(dataset)?)
            .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        self.csv_written = true;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.bundle {
            self.write_bundle()?;
        }
        Ok(())
    }
}

/// Accepts and discards everything, for hosts without an output surface
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ArtifactSink for NullSink {
    fn name(&self) -> &'static str {
        "none"
    }

    fn publish(&mut self, id: ArtifactId, _value: &Value) -> Result<()> {
        tracing::trace!(artifact = %id, "discarded");
        Ok(())
    }

    fn publish_csv(&mut self, _dataset: &DataFrame) -> Result<()> {
        Ok(())
    }
}

/// Which sink implementation to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SinkKind {
    /// Directory when it can be created, memory otherwise
    Auto,
    Directory,
    Memory,
    None,
}

/// Whether artifacts can be written under `dir`
pub fn directory_writable(dir: &Path) -> bool {
    if std::fs::create_dir_all(dir).is_err() {
        return false;
    }
    std::fs::metadata(dir)
        .map(|m| m.is_dir() && !m.permissions().readonly())
        .unwrap_or(false)
}

/// Pick the sink for this process
pub fn select_sink(kind: SinkKind, out_dir: &Path, bundle: bool) -> Box<dyn ArtifactSink> {
    match kind {
        SinkKind::Directory => Box::new(DirectorySink::new(out_dir, bundle)),
        SinkKind::Memory => Box::new(MemorySink::new()),
        SinkKind::None => Box::new(NullSink),
        SinkKind::Auto => {
            if directory_writable(out_dir) {
                Box::new(DirectorySink::new(out_dir, bundle))
            } else {
                tracing::warn!(
                    dir = %out_dir.display(),
                    "output directory not writable, keeping artifacts in memory"
                );
                Box::new(MemorySink::new())
            }
        }
    }
}
