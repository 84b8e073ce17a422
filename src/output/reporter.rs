use super::*;
use anyhow::{Context, Result};
use std::fs;
use tracing::info;

use super::html::HtmlGenerator;

pub struct Reporter {
    format: OutputFormat,
    output_path: String,
}

impl Reporter {
    pub fn new(format: &str, output_path: &str) -> Result<Self> {
        let format = OutputFormat::from(format);
        let output_path = super::add_file_extension(output_path, &format);

        Ok(Self {
            format,
            output_path,
        })
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn output_path(&self) -> &str {
        &self.output_path
    }

    pub async fn generate_report(&mut self, report: &ChartReport) -> Result<()> {
        let content = match self.format {
            OutputFormat::Html => {
                let mut generator = HtmlGenerator::new()?;
                generator.generate(report).await?
            }
            OutputFormat::Json => serde_json::to_string_pretty(report)?,
        };

        fs::write(&self.output_path, content)
            .with_context(|| format!("Failed to write report to {}", self.output_path))?;
        info!("Report saved to {}", self.output_path);
        Ok(())
    }
}
