mod common;
use crate::common::{init_tracing, FakeFetcher, RecordedTrigger, RecordingBackend, ResourceBuilder};

use std::error::Error;

use tempfile::tempdir;

use hookwatch::cache::{DigestStore, FileDigestStore, MemoryDigestStore};
use hookwatch::digest::{Digester, HashDigester};
use hookwatch::engine::{Evaluation, Evaluator};
use hookwatch::errors::HookwatchError;
use hookwatch::extract::{BlockRange, Extractor};
use hookwatch::resource::Resource;
use hookwatch::trigger::{should_trigger, DispatchOutcome, TriggerAction};

type TestResult = Result<(), Box<dyn Error>>;

const DATA_URL: &str = "http://x/data";
const HOOK_URL: &str = "http://y/notify";

fn hooked_resource() -> Resource {
    ResourceBuilder::new("data").url(DATA_URL).hook(HOOK_URL).build()
}

fn evaluator(fetcher: &FakeFetcher, backend: &RecordingBackend, dry_run: bool) -> Evaluator {
    Evaluator::new(
        fetcher.clone(),
        HashDigester::default(),
        MemoryDigestStore::new(),
        backend.clone(),
        dry_run,
    )
}

fn hook_call() -> RecordedTrigger {
    RecordedTrigger::Hook {
        url: HOOK_URL.to_string(),
        method: "GET".to_string(),
    }
}

#[test]
fn trigger_rule() {
    assert!(should_trigger(false, None, "abc"));
    assert!(should_trigger(false, Some("old"), "abc"));
    assert!(!should_trigger(false, Some("abc"), "abc"));
    assert!(should_trigger(true, Some("abc"), "abc"));
}

#[tokio::test]
async fn first_observation_triggers_then_unchanged_content_does_not() -> TestResult {
    init_tracing();

    let fetcher = FakeFetcher::new().with_body(DATA_URL, "v1\n");
    let backend = RecordingBackend::new();
    let mut eval = evaluator(&fetcher, &backend, false);
    let resource = hooked_resource();

    let d1 = match eval.evaluate(&resource).await? {
        Evaluation::Triggered {
            digest,
            outcome: DispatchOutcome::Hook { status: 200, .. },
        } => digest,
        other => panic!("first evaluation should trigger, got {other:?}"),
    };

    let d2 = match eval.evaluate(&resource).await? {
        Evaluation::Unchanged { digest } => digest,
        other => panic!("second evaluation should be unchanged, got {other:?}"),
    };

    assert_eq!(d1, d2);
    assert_eq!(backend.calls(), vec![hook_call()]);
    Ok(())
}

#[tokio::test]
async fn changed_content_triggers_again_and_updates_the_store() -> TestResult {
    init_tracing();

    let fetcher = FakeFetcher::new().with_body(DATA_URL, "v1\n");
    let backend = RecordingBackend::new();
    let mut eval = evaluator(&fetcher, &backend, false);
    let resource = hooked_resource();

    eval.evaluate(&resource).await?;
    fetcher.set_body(DATA_URL, "v2\n");
    let result = eval.evaluate(&resource).await?;

    let expected = HashDigester::default().digest(b"v2\n");
    assert!(matches!(result, Evaluation::Triggered { ref digest, .. } if *digest == expected));
    assert_eq!(eval.store().lookup("data")?, Some(expected));
    assert_eq!(backend.calls().len(), 2);
    Ok(())
}

#[tokio::test]
async fn force_triggers_even_when_digest_is_equal() -> TestResult {
    init_tracing();

    let fetcher = FakeFetcher::new().with_body(DATA_URL, "same");
    let backend = RecordingBackend::new();
    let mut eval = evaluator(&fetcher, &backend, false).with_force(true);
    let resource = hooked_resource();

    eval.evaluate(&resource).await?;
    let second = eval.evaluate(&resource).await?;

    assert!(matches!(second, Evaluation::Triggered { .. }));
    assert_eq!(backend.calls(), vec![hook_call(), hook_call()]);
    Ok(())
}

#[tokio::test]
async fn only_the_extracted_block_affects_change_detection() -> TestResult {
    init_tracing();

    let fetcher = FakeFetcher::new().with_body(DATA_URL, "<b>price 10</b>\nvisited at 12:00\n");
    let backend = RecordingBackend::new();
    let mut eval = evaluator(&fetcher, &backend, false);
    let resource = ResourceBuilder::new("data")
        .url(DATA_URL)
        .end("</b>")
        .hook(HOOK_URL)
        .build();

    eval.evaluate(&resource).await?;
    fetcher.set_body(DATA_URL, "<b>price 10</b>\nvisited at 12:05\n");
    let second = eval.evaluate(&resource).await?;

    assert!(matches!(second, Evaluation::Unchanged { .. }));
    assert_eq!(backend.calls().len(), 1);
    Ok(())
}

/// Digests a fixed payload no matter what was fetched.
struct ConstantExtractor;

impl Extractor for ConstantExtractor {
    fn extract(&self, _content: &[u8], _range: &BlockRange) -> Vec<u8> {
        b"constant".to_vec()
    }
}

#[tokio::test]
async fn substituted_extractor_decides_what_is_digested() -> TestResult {
    init_tracing();

    let fetcher = FakeFetcher::new().with_body(DATA_URL, "v1\n");
    let backend = RecordingBackend::new();
    let mut eval = evaluator(&fetcher, &backend, false).with_extractor(ConstantExtractor);
    let resource = hooked_resource();

    let first = eval.evaluate(&resource).await?;
    let expected = HashDigester::default().digest(b"constant");
    assert!(matches!(first, Evaluation::Triggered { ref digest, .. } if *digest == expected));

    fetcher.set_body(DATA_URL, "v2\n");
    let second = eval.evaluate(&resource).await?;

    assert!(matches!(second, Evaluation::Unchanged { .. }));
    assert_eq!(backend.calls(), vec![hook_call()]);
    Ok(())
}

#[tokio::test]
async fn dry_run_logs_instead_of_firing_but_still_records_digest() -> TestResult {
    init_tracing();

    let fetcher = FakeFetcher::new().with_body(DATA_URL, "payload");
    let backend = RecordingBackend::new();
    let mut eval = evaluator(&fetcher, &backend, true);

    let result = eval.evaluate(&hooked_resource()).await?;

    match result {
        Evaluation::Triggered {
            digest,
            outcome: DispatchOutcome::DryRun(action),
        } => {
            assert_eq!(
                action,
                TriggerAction::Hook {
                    url: HOOK_URL.to_string(),
                    method: "GET".to_string()
                }
            );
            assert_eq!(action.to_string(), "http://y/notify (GET)");
            assert_eq!(eval.store().lookup("data")?, Some(digest));
        }
        other => panic!("expected dry-run trigger, got {other:?}"),
    }
    assert!(backend.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn failed_trigger_still_records_digest_and_next_cycle_is_quiet() -> TestResult {
    init_tracing();

    let fetcher = FakeFetcher::new().with_body(DATA_URL, "payload");
    let backend = RecordingBackend::failing();
    let mut eval = evaluator(&fetcher, &backend, false);
    let resource = hooked_resource();

    let first = eval.evaluate(&resource).await?;
    assert!(matches!(
        first,
        Evaluation::Triggered {
            outcome: DispatchOutcome::Failed(HookwatchError::TriggerError(_)),
            ..
        }
    ));
    assert!(eval.store().lookup("data")?.is_some());

    let second = eval.evaluate(&resource).await?;
    assert!(matches!(second, Evaluation::Unchanged { .. }));
    assert_eq!(backend.calls().len(), 1);
    Ok(())
}

#[tokio::test]
async fn fetch_failure_neither_triggers_nor_mutates_the_cache() -> TestResult {
    init_tracing();

    let dir = tempdir()?;
    let cache = dir.path().join("cache.sums");
    let fetcher = FakeFetcher::new();
    let backend = RecordingBackend::new();
    let mut eval = Evaluator::new(
        fetcher.clone(),
        HashDigester::default(),
        FileDigestStore::new(&cache),
        backend.clone(),
        false,
    );

    let result = eval.evaluate(&hooked_resource()).await?;

    assert!(matches!(result, Evaluation::FetchFailed(HookwatchError::FetchError { .. })));
    assert_eq!(fetcher.requests(), vec![DATA_URL.to_string()]);
    assert!(backend.calls().is_empty());
    assert!(!cache.exists());
    Ok(())
}

#[tokio::test]
async fn resource_without_url_is_skipped() -> TestResult {
    init_tracing();

    let fetcher = FakeFetcher::new();
    let backend = RecordingBackend::new();
    let mut eval = evaluator(&fetcher, &backend, false);
    let resource = ResourceBuilder::new("nourl").hook(HOOK_URL).build();

    let result = eval.evaluate(&resource).await?;

    assert!(matches!(result, Evaluation::Skipped(HookwatchError::MissingUrl(ref n)) if n == "nourl"));
    assert!(fetcher.requests().is_empty());
    assert!(backend.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn invalid_marker_pattern_skips_before_fetching() -> TestResult {
    let fetcher = FakeFetcher::new().with_body(DATA_URL, "x");
    let backend = RecordingBackend::new();
    let mut eval = evaluator(&fetcher, &backend, false);
    let resource = ResourceBuilder::new("bad").url(DATA_URL).start("(").build();

    let result = eval.evaluate(&resource).await?;

    assert!(matches!(result, Evaluation::Skipped(HookwatchError::DescriptorError { .. })));
    assert!(fetcher.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn hook_takes_priority_over_freeform_and_uses_request_method() -> TestResult {
    let fetcher = FakeFetcher::new().with_body(DATA_URL, "x");
    let backend = RecordingBackend::new();
    let mut eval = evaluator(&fetcher, &backend, false);
    let resource = ResourceBuilder::new("both")
        .url(DATA_URL)
        .hook(HOOK_URL)
        .request("post")
        .freeform("echo never")
        .build();

    eval.evaluate(&resource).await?;

    assert_eq!(
        backend.calls(),
        vec![RecordedTrigger::Hook {
            url: HOOK_URL.to_string(),
            method: "POST".to_string()
        }]
    );
    Ok(())
}

#[tokio::test]
async fn freeform_command_is_passed_through_verbatim() -> TestResult {
    let fetcher = FakeFetcher::new().with_body(DATA_URL, "x");
    let backend = RecordingBackend::new();
    let mut eval = evaluator(&fetcher, &backend, false);
    let command = r#"notify-send "page changed" --urgency=low"#;
    let resource = ResourceBuilder::new("cmd").url(DATA_URL).freeform(command).build();

    let result = eval.evaluate(&resource).await?;

    assert!(matches!(
        result,
        Evaluation::Triggered {
            outcome: DispatchOutcome::Command { code: Some(0), .. },
            ..
        }
    ));
    assert_eq!(backend.calls(), vec![RecordedTrigger::Command(command.to_string())]);
    Ok(())
}

#[tokio::test]
async fn no_hook_and_no_freeform_is_a_noop_that_still_records() -> TestResult {
    let fetcher = FakeFetcher::new().with_body(DATA_URL, "x");
    let backend = RecordingBackend::new();
    let mut eval = evaluator(&fetcher, &backend, false);
    let resource = ResourceBuilder::new("quiet").url(DATA_URL).build();

    let result = eval.evaluate(&resource).await?;

    assert!(matches!(result, Evaluation::Triggered { outcome: DispatchOutcome::Noop, .. }));
    assert!(backend.calls().is_empty());
    assert!(eval.store().lookup("quiet")?.is_some());
    Ok(())
}

#[tokio::test]
async fn invalid_request_method_is_a_trigger_error() -> TestResult {
    let fetcher = FakeFetcher::new().with_body(DATA_URL, "x");
    let backend = RecordingBackend::new();
    let mut eval = evaluator(&fetcher, &backend, false);
    let resource = ResourceBuilder::new("m")
        .url(DATA_URL)
        .hook(HOOK_URL)
        .request("NOT A METHOD")
        .build();

    let result = eval.evaluate(&resource).await?;

    assert!(matches!(
        result,
        Evaluation::Triggered {
            outcome: DispatchOutcome::Failed(HookwatchError::TriggerError(_)),
            ..
        }
    ));
    assert!(backend.calls().is_empty());
    assert!(eval.store().lookup("m")?.is_some());
    Ok(())
}
