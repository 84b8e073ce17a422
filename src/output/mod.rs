use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod html;
pub mod reporter;

pub use reporter::Reporter;

use crate::chart::{ChartBuild, ChartViewModel, RejectedEntry, Repository};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Json,
    Html,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "html" => OutputFormat::Html,
            _ => OutputFormat::Html,
        }
    }
}

pub fn add_file_extension(path: &str, format: &OutputFormat) -> String {
    let extension = match format {
        OutputFormat::Html => ".html",
        OutputFormat::Json => ".json",
    };

    if path.ends_with(extension) {
        path.to_string()
    } else {
        format!("{}{}", path, extension)
    }
}

/// What gets written for one rendering pass. `chart` is `None` when the host
/// had no repository or no statistics to show.
#[derive(Debug, Clone, Serialize)]
pub struct ChartReport {
    pub repository: Option<Repository>,
    pub generated: DateTime<Utc>,
    pub chart: Option<ChartViewModel>,
    pub rejected: Vec<RejectedEntry>,
    pub duplicates: Vec<String>,
}

impl ChartReport {
    pub fn new(repository: Option<Repository>, build: Option<ChartBuild>) -> Self {
        let (chart, rejected, duplicates) = match build {
            Some(build) => (Some(build.chart), build.rejected, build.duplicates),
            None => (None, Vec::new(), Vec::new()),
        };

        Self {
            repository,
            generated: Utc::now(),
            chart,
            rejected,
            duplicates,
        }
    }

    pub fn title(&self) -> String {
        match self.repository.as_ref().and_then(|r| r.display_name()) {
            Some(name) => format!("Commits by author: {}", name),
            None => "Commits by author".to_string(),
        }
    }
}

pub trait OutputGenerator {
    async fn generate(&mut self, report: &ChartReport) -> Result<String>;
}
