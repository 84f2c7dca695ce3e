use std::fs;

use tempfile::tempdir;

use reqdrift::{
    record_comparison, run_batch, summarize, ComparisonRecord, DriftError, FileHistoryStore,
    FolderSource, ReportRenderer, Severity, TextReportRenderer,
};

#[test]
fn folder_scan_compare_and_report_flow() {
    let dir = tempdir().unwrap();
    let reqs = dir.path().join("requirements");
    let tests = dir.path().join("testcases");
    fs::create_dir_all(&reqs).unwrap();
    fs::create_dir_all(&tests).unwrap();

    fs::write(
        reqs.join("REQ-1.txt"),
        "REQ-1: brake timing\nThe brake must engage within 200 ms\n",
    )
    .unwrap();
    fs::write(
        reqs.join("REQ-2.txt"),
        "REQ-2: indicator\nWarning lamp lights up on failure\n",
    )
    .unwrap();
    fs::write(tests.join("REQ-1.txt"), "The brake must engage within 250 ms").unwrap();
    fs::write(
        tests.join("REQ-2.txt"),
        "Warning lamp lights up on failure",
    )
    .unwrap();
    // Present only on the test side; must be skipped, not fatal.
    fs::write(tests.join("REQ-99.txt"), "orphan test case").unwrap();

    let store = FileHistoryStore::open(dir.path().join("history.json"));
    let source = FolderSource::new("requirements", &reqs);
    let target = FolderSource::new("testcases", &tests);

    let (history, outcome) = run_batch(&store, &source, &target).unwrap();
    assert_eq!(outcome.accepted, 2);
    assert_eq!(outcome.duplicates, 0);
    assert_eq!(history.len(), 2);
    assert_eq!(history.get("REQ-1").unwrap().severity, Severity::Minor);
    assert_eq!(history.get("REQ-2").unwrap().severity, Severity::NoChange);

    // A second run over the same folders records nothing new.
    let (history, outcome) = run_batch(&store, &source, &target).unwrap();
    assert_eq!(outcome.accepted, 0);
    assert_eq!(outcome.duplicates, 2);
    assert_eq!(history.len(), 2);

    let summary = summarize(&history);
    assert_eq!(summary.count_for(Severity::Minor), 1);
    assert_eq!(summary.count_for(Severity::NoChange), 1);
    assert_eq!(summary.count_for(Severity::Major), 0);

    let report_path = dir.path().join("report.txt");
    TextReportRenderer::new(&report_path)
        .render(&history, &summary)
        .unwrap();
    let report = fs::read_to_string(&report_path).unwrap();
    assert!(report.contains("REQ-1\tMinor changes"));
    assert!(report.contains("200[difference]; 250[added]"));
}

#[test]
fn repeat_single_comparison_is_rejected_without_touching_the_store() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history.json");
    let store = FileHistoryStore::open(&path);

    let record = ComparisonRecord::compare("REQ-1", "some text", "some text").unwrap();
    record_comparison(&store, record).unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let repeat = ComparisonRecord::compare("REQ-1", "different", "text now").unwrap();
    let err = record_comparison(&store, repeat).unwrap_err();
    assert!(matches!(err, DriftError::DuplicateRecord { .. }));

    let after = fs::read_to_string(&path).unwrap();
    assert_eq!(before, after);
}

#[test]
fn batch_survives_a_broken_artifact_on_one_side() {
    let dir = tempdir().unwrap();
    let reqs = dir.path().join("requirements");
    let tests = dir.path().join("testcases");
    fs::create_dir_all(&reqs).unwrap();
    fs::create_dir_all(&tests).unwrap();

    fs::write(reqs.join("REQ-1.txt"), "good requirement text").unwrap();
    fs::write(tests.join("REQ-1.txt"), "good test text").unwrap();
    fs::write(tests.join("broken.json"), "{ definitely not json").unwrap();

    let store = FileHistoryStore::open(dir.path().join("history.json"));
    let source = FolderSource::new("requirements", &reqs);
    let target = FolderSource::new("testcases", &tests);

    let (history, outcome) = run_batch(&store, &source, &target).unwrap();
    assert_eq!(outcome.accepted, 1);
    assert!(history.contains("REQ-1"));
}

#[test]
fn missing_source_folder_fails_before_any_write() {
    let dir = tempdir().unwrap();
    let tests = dir.path().join("testcases");
    fs::create_dir_all(&tests).unwrap();

    let store_path = dir.path().join("history.json");
    let store = FileHistoryStore::open(&store_path);
    let source = FolderSource::new("requirements", dir.path().join("missing"));
    let target = FolderSource::new("testcases", &tests);

    let err = run_batch(&store, &source, &target).unwrap_err();
    assert!(matches!(err, DriftError::SourceUnavailable { .. }));
    assert!(!store_path.exists());
}
