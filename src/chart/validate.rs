use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::{CommitCountEntry, CommitsByAuthor};

/// Why a raw commits-by-author entry was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryDefect {
    #[error("entry is not an object")]
    NotAnObject,
    #[error("entry has no author value")]
    MissingAuthor,
    #[error("author value is not a non-blank string")]
    InvalidAuthor,
    #[error("entry has no commit count")]
    MissingCount,
    #[error("commit count is not a non-negative integer")]
    InvalidCount,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedEntry {
    /// Position of the entry in the source sequence.
    pub index: usize,
    pub defect: EntryDefect,
    pub entry: Value,
}

pub fn validate_entry(raw: &Value) -> Result<CommitCountEntry, EntryDefect> {
    let object = raw.as_object().ok_or(EntryDefect::NotAnObject)?;

    let author = match object.get("value") {
        None | Some(Value::Null) => return Err(EntryDefect::MissingAuthor),
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(_) => return Err(EntryDefect::InvalidAuthor),
    };

    let count = match object.get("count") {
        None | Some(Value::Null) => return Err(EntryDefect::MissingCount),
        Some(value) => value.as_u64().ok_or(EntryDefect::InvalidCount)?,
    };

    Ok(CommitCountEntry { author, count })
}

/// Split a payload into valid entries and rejections, both in source order.
pub fn validate_entries(payload: &CommitsByAuthor) -> (Vec<CommitCountEntry>, Vec<RejectedEntry>) {
    let mut accepted = Vec::with_capacity(payload.author.len());
    let mut rejected = Vec::new();

    for (index, raw) in payload.author.iter().enumerate() {
        match validate_entry(raw) {
            Ok(entry) => accepted.push(entry),
            Err(defect) => rejected.push(RejectedEntry {
                index,
                defect,
                entry: raw.clone(),
            }),
        }
    }

    (accepted, rejected)
}
