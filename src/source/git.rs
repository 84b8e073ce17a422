use anyhow::{Context, Result};
use git2::Sort;
use indexmap::IndexMap;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::ChartInput;
use crate::chart::{CommitCountEntry, CommitsByAuthor, Repository};
use crate::config::AuthorIdentity;

/// Counts commits per author in a local git repository.
pub struct GitCommitSource {
    path: PathBuf,
    max_commits: Option<usize>,
    identity: AuthorIdentity,
}

impl GitCommitSource {
    pub fn new(path: &Path, max_commits: Option<usize>, identity: AuthorIdentity) -> Self {
        Self {
            path: path.to_path_buf(),
            max_commits,
            identity,
        }
    }

    pub async fn collect(&self) -> Result<ChartInput> {
        let path = self.path.clone();
        let max_commits = self.max_commits;
        let identity = self.identity;

        // git2 work is blocking
        tokio::task::spawn_blocking(move || collect_blocking(&path, max_commits, identity))
            .await
            .context("Git statistics task failed")?
    }
}

fn collect_blocking(
    path: &Path,
    max_commits: Option<usize>,
    identity: AuthorIdentity,
) -> Result<ChartInput> {
    let repo = git2::Repository::open(path).with_context(|| {
        format!(
            "Failed to open repository at {}\n Is it really a git repo?",
            path.display()
        )
    })?;
    info!("Opened Git repository at {}", path.display());

    let head = repo
        .head()
        .ok()
        .and_then(|head| head.shorthand().map(str::to_string));

    let counts = match head {
        Some(_) => count_commits(&repo, max_commits, identity)?,
        None => {
            info!("Repository has no commits yet");
            IndexMap::new()
        }
    };

    info!("Counted commits for {} authors", counts.len());

    let descriptor = json!({
        "name": repository_name(path),
        "path": path.display().to_string(),
        "head": head,
        "remote": detect_remote_url(&repo),
    });

    let commits = CommitsByAuthor::from_entries(
        counts
            .into_iter()
            .map(|(author, count)| CommitCountEntry { author, count }),
    );

    Ok(ChartInput {
        repository: Some(Repository::new(descriptor)),
        commits_by_author: Some(commits),
    })
}

fn count_commits(
    repo: &git2::Repository,
    max_commits: Option<usize>,
    identity: AuthorIdentity,
) -> Result<IndexMap<String, u64>> {
    let mut revwalk = repo.revwalk()?;
    revwalk.push_head()?;
    revwalk.set_sorting(Sort::TIME)?;

    let mut commit_oids = Vec::new();
    for oid in revwalk {
        commit_oids.push(oid?);
    }
    info!("Found {} commits to count", commit_oids.len());

    if let Some(limit) = max_commits {
        if commit_oids.len() > limit {
            info!("Large repository detected, counting the {} most recent commits", limit);
            commit_oids.truncate(limit);
        }
    }

    let pb = ProgressBar::new(commit_oids.len() as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} commits ({eta})",
        )?
        .progress_chars("#>-"),
    );

    let mut counts: IndexMap<String, u64> = IndexMap::new();
    for oid in commit_oids {
        let commit = repo.find_commit(oid)?;
        let key = author_key(&commit.author(), identity);
        *counts.entry(key).or_insert(0) += 1;
        pb.inc(1);
    }

    pb.finish_and_clear();
    debug!("Author order: {:?}", counts.keys().collect::<Vec<_>>());

    Ok(counts)
}

fn author_key(signature: &git2::Signature<'_>, identity: AuthorIdentity) -> String {
    let name = String::from_utf8_lossy(signature.name_bytes()).trim().to_string();
    let name = if name.is_empty() {
        "Unknown".to_string()
    } else {
        name
    };

    match identity {
        AuthorIdentity::Name => name,
        AuthorIdentity::NameEmail => format!(
            "{} <{}>",
            name,
            String::from_utf8_lossy(signature.email_bytes())
        ),
    }
}

fn repository_name(path: &Path) -> String {
    let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn detect_remote_url(repo: &git2::Repository) -> Value {
    if let Ok(remote) = repo.find_remote("origin") {
        if let Some(url) = remote.url() {
            return Value::String(url.to_string());
        }
    }

    if let Ok(remotes) = repo.remotes() {
        for remote_name in remotes.iter().flatten() {
            if let Ok(remote) = repo.find_remote(remote_name) {
                if let Some(url) = remote.url() {
                    return Value::String(url.to_string());
                }
            }
        }
    }

    Value::Null
}
