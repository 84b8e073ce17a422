use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use super::ChartInput;

/// Read a `{ "repository": ..., "commitsByAuthor": ... }` envelope from a
/// file, or from stdin when the path is `-`.
pub fn load_payload(path: &Path) -> Result<ChartInput> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read payload from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read payload file {}", path.display()))?
    };

    let input = parse_payload(&content)
        .with_context(|| format!("Invalid commit statistics payload in {}", path.display()))?;

    info!(
        "Loaded payload: repository {}, {} author entries",
        if input.repository.is_some() { "present" } else { "absent" },
        input
            .commits_by_author
            .as_ref()
            .map(|c| c.len())
            .unwrap_or(0)
    );

    Ok(input)
}

pub fn parse_payload(content: &str) -> Result<ChartInput> {
    let input: ChartInput = serde_json::from_str(content)?;
    debug!("Parsed payload envelope");
    Ok(input)
}
