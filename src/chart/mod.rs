use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub mod adapter;
pub mod validate;

pub use adapter::{build_chart, ChartBuild, ChartDataAdapter, DuplicatePolicy};
pub use validate::{EntryDefect, RejectedEntry};

/// Series label every commits-by-author chart carries.
pub const COMMITS_SERIES: &str = "Commits";

/// One author and the number of commits attributed to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitCountEntry {
    #[serde(rename = "value")]
    pub author: String,
    pub count: u64,
}

/// Commit statistics of a single repository, as delivered by the data source.
///
/// Entries stay loosely typed until the adapter validates them, so a single
/// bad record does not prevent the rest of the payload from rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommitsByAuthor {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub author: Vec<Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl CommitsByAuthor {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = CommitCountEntry>,
    {
        let author = entries
            .into_iter()
            .map(|entry| serde_json::json!({ "value": entry.author, "count": entry.count }))
            .collect();
        Self { author }
    }

    pub fn len(&self) -> usize {
        self.author.len()
    }

    pub fn is_empty(&self) -> bool {
        self.author.is_empty()
    }
}

/// Opaque repository descriptor supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Repository(Value);

impl Repository {
    pub fn new(descriptor: Value) -> Self {
        Self(descriptor)
    }

    /// Whether the descriptor names a repository at all. `null`, `false`,
    /// zero and the empty string count as absent; any object or array does not.
    pub fn is_present(&self) -> bool {
        match &self.0 {
            Value::Null => false,
            Value::Bool(flag) => *flag,
            Value::Number(n) => n.as_f64() != Some(0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }

    pub fn descriptor(&self) -> &Value {
        &self.0
    }

    /// Human readable name taken from a `name` or `id` field, if any.
    pub fn display_name(&self) -> Option<String> {
        match &self.0 {
            Value::String(name) => Some(name.clone()),
            Value::Object(map) => ["name", "id"].iter().find_map(|key| match map.get(*key) {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayKind {
    Pie,
}

impl DisplayKind {
    /// CSS class the rendering surface tags the chart canvas with.
    pub fn css_class(&self) -> &'static str {
        match self {
            DisplayKind::Pie => "chart-pie",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendOptions {
    pub display: bool,
    pub position: LegendPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub legend: LegendOptions,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            legend: LegendOptions {
                display: true,
                position: LegendPosition::Bottom,
            },
        }
    }
}

/// Chart-ready view of commits per author.
///
/// `labels[i]` and `data[i]` always describe the same author; the fields are
/// only reachable through accessors so that correspondence cannot be broken
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartViewModel {
    labels: Vec<String>,
    data: Vec<u64>,
    series: Vec<String>,
    display_kind: DisplayKind,
    options: RenderOptions,
}

impl ChartViewModel {
    pub(crate) fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, u64)>,
    {
        let (labels, data): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        Self {
            labels,
            data,
            series: vec![COMMITS_SERIES.to_string()],
            display_kind: DisplayKind::Pie,
            options: RenderOptions::default(),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn data(&self) -> &[u64] {
        &self.data
    }

    pub fn series(&self) -> &[String] {
        &self.series
    }

    pub fn display_kind(&self) -> DisplayKind {
        self.display_kind
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.data.iter().fold(0u64, |acc, n| acc.saturating_add(*n))
    }

    /// Author/count pairs in chart order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.data.iter().copied())
    }
}
