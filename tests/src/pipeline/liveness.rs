use std::time::Duration;

use reckon_common::config::StatusCodes;
use reckon_common::trace::DebugTrace;
use reckon_core::deadline::Deadline;
use reckon_core::liveness::LivenessCascade;

use crate::utils::{FakeBatch, FakeStatus};

fn hosts(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[tokio::test]
async fn empty_candidates_probe_nothing() {
    let batch = FakeBatch::reporting(&[("api.example.com", 200)]);
    let slow = FakeStatus::with(&[]);
    let cascade = LivenessCascade::new(batch.clone(), slow.clone());

    let alive = cascade
        .filter(&[], &StatusCodes::default(), Deadline::after(Duration::from_secs(5)), &mut DebugTrace::disabled())
        .await;

    assert!(alive.is_empty());
    assert_eq!(batch.calls(), 0);
    assert_eq!(slow.calls(), 0);
}

#[tokio::test]
async fn survivors_are_a_subset_of_the_candidates() {
    let cascade = LivenessCascade::new(
        FakeBatch::reporting(&[
            ("WWW.example.com", 302),
            ("injected.example.net", 200),
            ("www.example.com", 302),
        ]),
        FakeStatus::with(&[]),
    );
    let candidates = hosts(&["api.example.com", "www.example.com"]);

    let alive = cascade
        .filter(&candidates, &StatusCodes::default(), Deadline::after(Duration::from_secs(5)), &mut DebugTrace::disabled())
        .await;

    assert_eq!(alive, ["www.example.com"]);
}

#[tokio::test]
async fn missing_batch_tool_falls_back_per_host() {
    let slow = FakeStatus::with(&[("api.example.com", 200), ("old.example.com", 500)]);
    let cascade = LivenessCascade::new(FakeBatch::absent(), slow.clone());
    let candidates = hosts(&["api.example.com", "old.example.com", "API.example.com", "gone.example.com"]);
    let mut trace = DebugTrace::new(true);

    let alive = cascade
        .filter(&candidates, &StatusCodes::default(), Deadline::after(Duration::from_secs(5)), &mut trace)
        .await;

    assert_eq!(alive, ["api.example.com"]);
    assert_eq!(slow.calls(), 3, "duplicates are checked once");
    let errors = trace.parse_errors().join("\n");
    assert!(errors.contains("httpx"), "{errors}");
    assert!(errors.contains("gone.example.com"), "{errors}");
}

#[tokio::test]
async fn custom_codes_decide_who_is_alive() {
    let codes: StatusCodes = "500".parse().unwrap();
    let cascade = LivenessCascade::new(
        FakeBatch::reporting(&[("api.example.com", 200), ("old.example.com", 500)]),
        FakeStatus::with(&[]),
    );

    let alive = cascade
        .filter(
            &hosts(&["api.example.com", "old.example.com"]),
            &codes,
            Deadline::after(Duration::from_secs(5)),
            &mut DebugTrace::disabled(),
        )
        .await;

    assert_eq!(alive, ["old.example.com"]);
}

#[tokio::test(start_paused = true)]
async fn expired_deadline_stops_the_slow_path() {
    let slow = FakeStatus::with(&[("api.example.com", 200)]);
    let cascade = LivenessCascade::new(FakeBatch::absent(), slow.clone());
    let deadline = Deadline::after(Duration::from_secs(1));
    tokio::time::advance(Duration::from_secs(2)).await;

    let alive = cascade
        .filter(&hosts(&["api.example.com"]), &StatusCodes::default(), deadline, &mut DebugTrace::disabled())
        .await;

    assert!(alive.is_empty());
    assert_eq!(slow.calls(), 0);
}
