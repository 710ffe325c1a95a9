#![cfg(feature = "serde")]

use tickbt_core::Status;
use tickbt_trace::{TraceEvent, TraceLog};

#[test]
fn trace_log_roundtrips_through_json() {
    let mut log = TraceLog::default();
    log.push(
        TraceEvent::new(4, "task.end")
            .with_task("loot")
            .with_status(Status::Failure),
    );

    let json = serde_json::to_string(&log).unwrap();
    let back: TraceLog = serde_json::from_str(&json).unwrap();
    assert_eq!(back, log);
}
