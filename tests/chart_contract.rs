use commitpie::chart::{
    build_chart, ChartDataAdapter, CommitsByAuthor, DuplicatePolicy, LegendPosition, Repository,
};
use commitpie::source::payload::parse_payload;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn commits(value: Value) -> CommitsByAuthor {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_two_authors_example() {
    let repository = Repository::new(json!({ "id": 1 }));
    let payload = commits(json!({
        "author": [{ "value": "alice", "count": 5 }, { "value": "bob", "count": 3 }]
    }));

    let chart = build_chart(Some(&repository), Some(&payload)).unwrap();
    assert_eq!(
        serde_json::to_value(&chart).unwrap(),
        json!({
            "labels": ["alice", "bob"],
            "data": [5, 3],
            "series": ["Commits"],
            "displayKind": "pie",
            "options": { "legend": { "display": true, "position": "bottom" } }
        })
    );
}

#[test]
fn test_empty_author_list_example() {
    let repository = Repository::new(json!({ "id": 1 }));
    let chart = build_chart(Some(&repository), Some(&commits(json!({ "author": [] })))).unwrap();

    assert!(chart.labels().is_empty());
    assert!(chart.data().is_empty());
    assert_eq!(chart.total(), 0);
}

#[test]
fn test_missing_repository_example() {
    let payload = commits(json!({ "author": [{ "value": "alice", "count": 5 }] }));
    assert!(build_chart(None, Some(&payload)).is_none());
    assert!(build_chart(None, None).is_none());
}

#[test]
fn test_duplicate_author_example_under_both_policies() {
    let repository = Repository::new(json!({ "id": 1 }));
    let payload = commits(json!({
        "author": [{ "value": "alice", "count": 2 }, { "value": "alice", "count": 3 }]
    }));

    let overwrite = ChartDataAdapter::new(DuplicatePolicy::Overwrite)
        .build_chart(Some(&repository), Some(&payload))
        .unwrap();
    assert_eq!(overwrite.labels(), ["alice"]);
    assert_eq!(overwrite.data(), [3]);

    let accumulate = ChartDataAdapter::new(DuplicatePolicy::Accumulate)
        .build_chart(Some(&repository), Some(&payload))
        .unwrap();
    assert_eq!(accumulate.labels(), ["alice"]);
    assert_eq!(accumulate.data(), [5]);
}

#[test]
fn test_payload_envelope_drives_the_adapter() {
    let input = parse_payload(
        r#"{
            "repository": { "id": "7f3a", "name": "scm-webapp" },
            "commitsByAuthor": {
                "author": [
                    { "value": "Sebastian", "count": 12 },
                    { "value": "Thomas", "count": 4 },
                    { "value": "Broken" },
                    { "value": "Mara", "count": 0 }
                ]
            }
        }"#,
    )
    .unwrap();

    let build = ChartDataAdapter::default()
        .build(input.repository.as_ref(), input.commits_by_author.as_ref())
        .unwrap();

    assert_eq!(build.chart.labels(), ["Sebastian", "Thomas", "Mara"]);
    assert_eq!(build.chart.data(), [12, 4, 0]);
    assert_eq!(build.rejected.len(), 1);
    assert_eq!(build.rejected[0].index, 2);
    assert!(build.chart.options().legend.display);
    assert_eq!(build.chart.options().legend.position, LegendPosition::Bottom);
}

#[test]
fn test_null_repository_in_envelope_renders_nothing() {
    let input = parse_payload(
        r#"{ "repository": null, "commitsByAuthor": { "author": [ { "value": "a", "count": 1 } ] } }"#,
    )
    .unwrap();

    let chart = ChartDataAdapter::default()
        .build_chart(input.repository.as_ref(), input.commits_by_author.as_ref());
    assert!(chart.is_none());
}

#[test]
fn test_adapter_is_shareable_across_threads() {
    let adapter = ChartDataAdapter::new(DuplicatePolicy::Accumulate);
    let repository = Repository::new(json!({ "id": 1 }));
    let payload = commits(json!({
        "author": [{ "value": "alice", "count": 2 }, { "value": "bob", "count": 1 }]
    }));

    let expected = adapter.build_chart(Some(&repository), Some(&payload));
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| adapter.build_chart(Some(&repository), Some(&payload))))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_null_author_list_renders_an_empty_chart() {
    let input = parse_payload(
        r#"{ "repository": { "id": 1 }, "commitsByAuthor": { "author": null } }"#,
    )
    .unwrap();

    let chart = ChartDataAdapter::default()
        .build_chart(input.repository.as_ref(), input.commits_by_author.as_ref())
        .unwrap();
    assert!(chart.is_empty());
    assert_eq!(chart.total(), 0);
}

#[test]
fn test_falsy_repository_descriptors_render_nothing() {
    let payload = commits(json!({ "author": [{ "value": "alice", "count": 5 }] }));

    for descriptor in [json!(false), json!(0), json!("")] {
        let repository = Repository::new(descriptor.clone());
        assert!(
            build_chart(Some(&repository), Some(&payload)).is_none(),
            "descriptor {}",
            descriptor
        );
    }
}
