use commitpie::chart::ChartDataAdapter;
use commitpie::config::AuthorIdentity;
use commitpie::output::{ChartReport, Reporter};
use commitpie::source::{load_payload, GitCommitSource};
use git2::{Repository, Signature};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn setup_test_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let repo = Repository::init(temp_dir.path()).unwrap();

    let authors = [
        ("Test User", "test@example.com"),
        ("Another User", "another@example.com"),
        ("Test User", "test@example.com"),
    ];

    for (i, (name, email)) in authors.iter().enumerate() {
        let file_name = format!("file_{}.txt", i);
        fs::write(temp_dir.path().join(&file_name), format!("Content {}\n", i)).unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new(&file_name)).unwrap();
        index.write().unwrap();

        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let signature = Signature::now(name, email).unwrap();
        let parent = repo.head().ok().map(|head| head.peel_to_commit().unwrap());
        let parents: Vec<_> = parent.iter().collect();

        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            &format!("Add {}", file_name),
            &tree,
            &parents,
        )
        .unwrap();
    }

    temp_dir
}

#[tokio::test]
async fn test_git_repository_to_json_report() {
    let repo_dir = setup_test_repo();
    let out_dir = TempDir::new().unwrap();

    let input = GitCommitSource::new(repo_dir.path(), None, AuthorIdentity::Name)
        .collect()
        .await
        .unwrap();
    let build = ChartDataAdapter::default()
        .build(input.repository.as_ref(), input.commits_by_author.as_ref());
    let report = ChartReport::new(input.repository, build);

    let stem = out_dir.path().join("report");
    let mut reporter = Reporter::new("json", stem.to_str().unwrap()).unwrap();
    reporter.generate_report(&report).await.unwrap();
    assert!(reporter.output_path().ends_with("report.json"));

    let written: Value =
        serde_json::from_str(&fs::read_to_string(reporter.output_path()).unwrap()).unwrap();
    let chart = &written["chart"];

    let mut pairs: Vec<(String, u64)> = chart["labels"]
        .as_array()
        .unwrap()
        .iter()
        .zip(chart["data"].as_array().unwrap())
        .map(|(label, count)| (label.as_str().unwrap().to_string(), count.as_u64().unwrap()))
        .collect();
    pairs.sort();

    assert_eq!(
        pairs,
        vec![
            ("Another User".to_string(), 1),
            ("Test User".to_string(), 2),
        ]
    );
    assert_eq!(chart["series"], serde_json::json!(["Commits"]));
    assert_eq!(chart["displayKind"], "pie");
    assert!(written["repository"]["path"].is_string());
}

#[tokio::test]
async fn test_payload_without_repository_to_html_report() {
    let work_dir = TempDir::new().unwrap();
    let payload_path = work_dir.path().join("payload.json");
    fs::write(
        &payload_path,
        r#"{ "commitsByAuthor": { "author": [ { "value": "alice", "count": 5 } ] } }"#,
    )
    .unwrap();

    let input = load_payload(&payload_path).unwrap();
    let build = ChartDataAdapter::default()
        .build(input.repository.as_ref(), input.commits_by_author.as_ref());
    assert!(build.is_none());

    let report = ChartReport::new(input.repository, build);
    let stem = work_dir.path().join("chart");
    let mut reporter = Reporter::new("html", stem.to_str().unwrap()).unwrap();
    reporter.generate_report(&report).await.unwrap();

    let html = fs::read_to_string(reporter.output_path()).unwrap();
    assert!(html.contains("No commit statistics available"));
}

#[tokio::test]
async fn test_json_report_for_no_render_state_has_null_chart() {
    let work_dir = TempDir::new().unwrap();
    let report = ChartReport::new(None, None);

    let stem = work_dir.path().join("empty");
    let mut reporter = Reporter::new("json", stem.to_str().unwrap()).unwrap();
    reporter.generate_report(&report).await.unwrap();

    let written: Value =
        serde_json::from_str(&fs::read_to_string(reporter.output_path()).unwrap()).unwrap();
    assert!(written["chart"].is_null());
    assert!(written["repository"].is_null());
    assert_eq!(written["rejected"], serde_json::json!([]));
}
