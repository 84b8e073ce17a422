use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::validate::{validate_entries, RejectedEntry};
use super::{ChartViewModel, CommitsByAuthor, Repository};

/// How repeated author identities in one payload are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// The later count replaces the earlier one.
    #[default]
    Overwrite,
    /// Counts are summed.
    Accumulate,
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overwrite" => Ok(DuplicatePolicy::Overwrite),
            "accumulate" => Ok(DuplicatePolicy::Accumulate),
            other => Err(anyhow::anyhow!(
                "Unknown duplicate policy '{}' (expected overwrite or accumulate)",
                other
            )),
        }
    }
}

/// A view model together with what was dropped or merged to produce it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBuild {
    pub chart: ChartViewModel,
    pub rejected: Vec<RejectedEntry>,
    /// Author identities that appeared more than once, in first-seen order.
    pub duplicates: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ChartDataAdapter {
    policy: DuplicatePolicy,
}

impl ChartDataAdapter {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Returns `None` when either input is missing; that is the no-render
    /// state, not a failure.
    pub fn build(
        &self,
        repository: Option<&Repository>,
        commits_by_author: Option<&CommitsByAuthor>,
    ) -> Option<ChartBuild> {
        let repository = repository.filter(|r| r.is_present());
        let (Some(_), Some(payload)) = (repository, commits_by_author) else {
            debug!("Repository or commit statistics missing, nothing to render");
            return None;
        };

        let (entries, rejected) = validate_entries(payload);
        for rejection in &rejected {
            warn!(
                "Skipping commit entry #{}: {} ({})",
                rejection.index, rejection.defect, rejection.entry
            );
        }

        let mut counts: IndexMap<String, u64> = IndexMap::with_capacity(entries.len());
        let mut duplicates: Vec<String> = Vec::new();

        for entry in entries {
            match counts.entry(entry.author) {
                Entry::Vacant(slot) => {
                    slot.insert(entry.count);
                }
                Entry::Occupied(mut slot) => {
                    debug!(
                        "Duplicate author '{}' ({:?}): {} then {}",
                        slot.key(),
                        self.policy,
                        slot.get(),
                        entry.count
                    );
                    if !duplicates.contains(slot.key()) {
                        duplicates.push(slot.key().clone());
                    }
                    let merged = match self.policy {
                        DuplicatePolicy::Overwrite => entry.count,
                        DuplicatePolicy::Accumulate => slot.get().saturating_add(entry.count),
                    };
                    slot.insert(merged);
                }
            }
        }

        let chart = ChartViewModel::from_pairs(counts);
        debug!(
            "Built chart with {} authors ({} skipped, {} duplicated)",
            chart.len(),
            rejected.len(),
            duplicates.len()
        );

        Some(ChartBuild {
            chart,
            rejected,
            duplicates,
        })
    }

    pub fn build_chart(
        &self,
        repository: Option<&Repository>,
        commits_by_author: Option<&CommitsByAuthor>,
    ) -> Option<ChartViewModel> {
        self.build(repository, commits_by_author)
            .map(|build| build.chart)
    }
}

/// Build a chart with the default duplicate policy.
pub fn build_chart(
    repository: Option<&Repository>,
    commits_by_author: Option<&CommitsByAuthor>,
) -> Option<ChartViewModel> {
    ChartDataAdapter::default().build_chart(repository, commits_by_author)
}
