use checker_core::{CheckResult, Query, QueryKind, Site, ValidationError};
use serde_json::json;

#[test]
fn empty_and_blank_queries_are_rejected() {
    assert_eq!(Query::parse(""), Err(ValidationError::Empty));
    assert_eq!(Query::parse("   \n\t"), Err(ValidationError::Empty));
}

#[test]
fn known_sites_are_detected() {
    let cases = [
        ("https://x.com/someone/status/12345", Some(Site::X)),
        ("http://x.com/i/web/status/12345", Some(Site::X)),
        ("https://www.reddit.com/r/news/abc123/title/", Some(Site::Reddit)),
        ("https://redd.it/abc123", Some(Site::Reddit)),
        ("https://example.com/article", None),
    ];
    for (text, site) in cases {
        let query = Query::parse(text).expect("valid query");
        assert_eq!(query.kind(), QueryKind::Link { site }, "{text}");
    }
}

#[test]
fn non_http_input_is_text() {
    for text in ["the moon is made of cheese", "ftp://x.com/file", "x.com/u/status/1"] {
        let query = Query::parse(text).expect("valid query");
        assert_eq!(query.kind(), QueryKind::Text, "{text}");
    }
}

#[test]
fn summary_reads_backend_fields() {
    let result = CheckResult::new(json!({
        "status": "received",
        "url_checked": "https://x.com/u/status/1",
        "is_true": false,
        "truth_percentage": 15.5,
        "justification": "dummy",
    }));

    let summary = result.summary();
    assert_eq!(summary.status.as_deref(), Some("received"));
    assert_eq!(summary.url_checked.as_deref(), Some("https://x.com/u/status/1"));
    assert_eq!(summary.is_true, Some(false));
    assert_eq!(summary.truth_percentage, Some(15.5));
    assert_eq!(summary.justification.as_deref(), Some("dummy"));
    assert_eq!(summary.verdict, None);
}

#[test]
fn summary_of_unexpected_shape_is_empty() {
    assert!(CheckResult::new(json!([1, 2, 3])).summary().is_empty());
    assert!(CheckResult::new(json!({ "is_true": "yes" })).summary().is_empty());
}
