use serde::{Deserialize, Serialize};

use crate::chart::{CommitsByAuthor, Repository};

pub mod git;
pub mod payload;

pub use git::GitCommitSource;
pub use payload::load_payload;

/// Everything the host hands to the chart adapter for one refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartInput {
    #[serde(default)]
    pub repository: Option<Repository>,
    #[serde(default)]
    pub commits_by_author: Option<CommitsByAuthor>,
}
