//! Writes rendered charts as JSON files.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::router::NamedChart;

/// Writes each chart to `<dir>/<key>.json`, replacing older renders of the
/// same key.
#[derive(Debug, Clone)]
pub struct ChartWriter {
    dir: PathBuf,
}

impl ChartWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write one chart, creating the directory if needed. Returns the path.
    pub async fn write(&self, chart: &NamedChart) -> anyhow::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("creating chart dir {}", self.dir.display()))?;
        let path = self.dir.join(format!("{}.json", chart.key));
        let json = chart.chart.to_json()?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!(path = %path.display(), kind = ?chart.chart.kind, "chart written");
        Ok(path)
    }

    pub async fn write_all(&self, charts: &[NamedChart]) -> anyhow::Result<Vec<PathBuf>> {
        let mut paths = Vec::with_capacity(charts.len());
        for chart in charts {
            paths.push(self.write(chart).await?);
        }
        Ok(paths)
    }
}
