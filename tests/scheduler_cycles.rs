mod common;
use crate::common::{
    init_tracing, with_timeout, DescriptorDir, FakeFetcher, LogCapture, RecordingBackend,
};

use std::error::Error;
use std::fs;
use std::time::Duration;

use hookwatch::cache::FileDigestStore;
use hookwatch::config::Settings;
use hookwatch::digest::{Digester, HashDigester};
use hookwatch::engine::{CycleReport, Evaluator, Scheduler};
use hookwatch::types::Termination;

type TestResult = Result<(), Box<dyn Error>>;

fn scheduler(settings: &Settings, fetcher: &FakeFetcher, backend: &RecordingBackend) -> Scheduler {
    let evaluator = Evaluator::new(
        fetcher.clone(),
        HashDigester::new(settings.algorithm),
        FileDigestStore::new(&settings.cache_path),
        backend.clone(),
        settings.dry_run,
    )
    .with_force(settings.force);
    Scheduler::new(settings, evaluator).expect("valid scheduler")
}

#[tokio::test]
async fn one_shot_dry_run_writes_a_single_cache_line() -> TestResult {
    let logs = LogCapture::new();
    let _guard = logs.install();

    let dir = DescriptorDir::new()
        .with_descriptor("data.env", "URL=http://x/data\nHOOK=http://y/notify\n");
    let mut raw = dir.raw_settings();
    raw.dry_run = true;
    let settings = Settings::try_from(raw)?;
    assert!(dir.cache_contents().is_none());

    let fetcher = FakeFetcher::new().with_body("http://x/data", "remote body\n");
    let backend = RecordingBackend::new();

    let termination = with_timeout(
        scheduler(&settings, &fetcher, &backend).run_until(std::future::pending()),
    )
    .await?;

    assert_eq!(termination, Termination::Completed);
    assert_eq!(termination.exit_code(), 0);
    assert!(backend.calls().is_empty());
    assert!(
        logs.contents().contains("would trigger http://y/notify"),
        "missing dry-run line in:\n{}",
        logs.contents()
    );

    let digest = HashDigester::default().digest(b"remote body\n");
    assert_eq!(dir.cache_contents(), Some(format!("{digest}  data\n")));
    Ok(())
}

#[tokio::test]
async fn discovery_is_sorted_non_recursive_and_pattern_filtered() -> TestResult {
    init_tracing();

    let dir = DescriptorDir::new()
        .with_descriptor("b.env", "URL=http://b\n")
        .with_descriptor("a.env", "URL=http://a\n")
        .with_descriptor("notes.txt", "URL=http://ignored\n");
    fs::create_dir(dir.path().join("nested.env"))?;
    fs::write(dir.path().join("nested.env").join("c.env"), "URL=http://c\n")?;

    let settings = dir.settings();
    let fetcher = FakeFetcher::new();
    let backend = RecordingBackend::new();
    let sched = scheduler(&settings, &fetcher, &backend);

    let found = sched.discover()?;
    let names: Vec<_> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.env", "b.env"]);
    Ok(())
}

#[tokio::test]
async fn cycle_evaluates_in_order_and_isolates_failures() -> TestResult {
    init_tracing();

    let dir = DescriptorDir::new()
        .with_descriptor("1-down.env", "URL=http://down\nHOOK=http://hook/down\n")
        .with_descriptor("2-nourl.env", "HOOK=http://hook/nourl\nFOO=bar\n")
        .with_descriptor("3-up.env", "URL=http://up\nHOOK=http://hook/up\n");
    let settings = dir.settings();

    let fetcher = FakeFetcher::new().with_body("http://up", "fine");
    let backend = RecordingBackend::new();
    let mut sched = scheduler(&settings, &fetcher, &backend);

    let first = sched.run_cycle().await?;
    assert_eq!(
        first,
        CycleReport {
            evaluated: 3,
            triggered: 1,
            unchanged: 0,
            skipped: 1,
            fetch_failed: 1,
            trigger_failed: 0,
        }
    );
    assert_eq!(fetcher.requests(), vec!["http://down", "http://up"]);

    let second = sched.run_cycle().await?;
    assert_eq!(second.unchanged, 1);
    assert_eq!(second.triggered, 0);
    assert_eq!(backend.calls().len(), 1);

    let cache = dir.cache_contents().unwrap_or_default();
    assert_eq!(cache.lines().count(), 1);
    assert!(cache.ends_with("  3-up\n"));
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn descriptor_name_with_line_break_is_skipped() -> TestResult {
    init_tracing();

    let dir = DescriptorDir::new()
        .with_descriptor("bad\nname.env", "URL=http://site\nHOOK=http://hook\n");
    let settings = dir.settings();
    let fetcher = FakeFetcher::new().with_body("http://site", "body");
    let backend = RecordingBackend::new();
    let mut sched = scheduler(&settings, &fetcher, &backend);

    for _ in 0..2 {
        let report = sched.run_cycle().await?;
        assert_eq!(report.evaluated, 1);
        assert_eq!(report.skipped, 1);
    }

    assert!(fetcher.requests().is_empty());
    assert!(backend.calls().is_empty());
    assert!(dir.cache_contents().is_none());
    Ok(())
}

#[tokio::test]
async fn cache_persists_across_scheduler_instances() -> TestResult {
    init_tracing();

    let dir = DescriptorDir::new().with_descriptor("site.env", "URL=http://site\nHOOK=http://hook\n");
    let settings = dir.settings();
    let fetcher = FakeFetcher::new().with_body("http://site", "stable");
    let backend = RecordingBackend::new();

    scheduler(&settings, &fetcher, &backend).run_cycle().await?;
    let report = scheduler(&settings, &fetcher, &backend).run_cycle().await?;

    assert_eq!(report.unchanged, 1);
    assert_eq!(backend.calls().len(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn interval_repeats_cycles_until_signalled() -> TestResult {
    init_tracing();

    let dir = DescriptorDir::new().with_descriptor("site.env", "URL=http://site\n");
    let mut raw = dir.raw_settings();
    raw.interval = Some("10s".to_string());
    let settings = Settings::try_from(raw)?;

    let fetcher = FakeFetcher::new().with_body("http://site", "body");
    let backend = RecordingBackend::new();

    // Cycles start at t=0, 10s and 20s; the signal lands during the third sleep.
    let shutdown = async {
        tokio::time::sleep(Duration::from_secs(25)).await;
        15
    };
    let termination = scheduler(&settings, &fetcher, &backend)
        .run_until(shutdown)
        .await?;

    assert_eq!(termination, Termination::Signalled(15));
    assert_eq!(termination.exit_code(), 143);
    assert_eq!(fetcher.requests().len(), 3);
    Ok(())
}

#[tokio::test]
async fn signal_before_start_terminates_without_evaluating() -> TestResult {
    init_tracing();

    let dir = DescriptorDir::new().with_descriptor("site.env", "URL=http://site\n");
    let fetcher = FakeFetcher::new().with_body("http://site", "body");
    let backend = RecordingBackend::new();

    let termination = scheduler(&dir.settings(), &fetcher, &backend)
        .run_until(std::future::ready(2))
        .await?;

    assert_eq!(termination, Termination::Signalled(2));
    assert_eq!(termination.exit_code(), 130);
    assert!(fetcher.requests().is_empty());
    assert!(dir.cache_contents().is_none());
    Ok(())
}
