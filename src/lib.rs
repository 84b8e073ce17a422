//! # CommitPie
//!
//! Turns commits-by-author statistics of a repository into a pie chart view
//! model and writes it out as a JSON document or a self-contained HTML page.
//!
//! The heart of the crate is [`chart::ChartDataAdapter`]: a pure transform
//! from a loosely typed `{ "author": [{ "value", "count" }] }` payload into a
//! [`chart::ChartViewModel`] with parallel `labels`/`data` sequences. Hosts
//! feed it from a payload file or from a local git repository
//! ([`source`]) and hand the result to a [`output::Reporter`].
//!
//! ## Example
//!
//! ```
//! use commitpie::chart::{build_chart, CommitsByAuthor, Repository};
//! use serde_json::json;
//!
//! let repository = Repository::new(json!({ "id": 1 }));
//! let commits: CommitsByAuthor = serde_json::from_value(json!({
//!     "author": [{ "value": "alice", "count": 5 }, { "value": "bob", "count": 3 }]
//! }))
//! .unwrap();
//!
//! let chart = build_chart(Some(&repository), Some(&commits)).unwrap();
//! assert_eq!(chart.labels(), ["alice", "bob"]);
//! assert_eq!(chart.data(), [5, 3]);
//! ```

pub mod chart;
pub mod config;
pub mod output;
pub mod source;

pub use chart::{build_chart, ChartDataAdapter, ChartViewModel, DuplicatePolicy};
pub use config::Config;
