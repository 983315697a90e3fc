// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listing run history reported by the execution subsystem.

use crate::prelude::*;

const RUNS: &str = r#"[
  {"id": "run-1", "agent_id": "agt-a", "agent_name": "Reviewer", "status": "completed",
   "started_at_ms": 1000, "metrics": {"duration_ms": 185000, "total_tokens": 12345, "cost_usd": 0.25}},
  {"id": "run-2", "agent_id": "agt-b", "agent_name": "Planner", "status": "failed",
   "started_at_ms": 5000}
]"#;

#[test]
fn no_runs_file_lists_nothing() {
    let ws = Workspace::empty();
    ws.deck().args(&["run", "list"]).passes().stdout_has("No runs");
}

#[test]
fn lists_runs_newest_first_with_metrics() {
    let ws = Workspace::empty();
    ws.file("state/runs.json", RUNS);

    let out = ws.deck().args(&["run", "list"]).passes().stdout_has("3m 05s").stdout_has("12.3k");
    let stdout = out.stdout();
    let planner = stdout.find("Planner").unwrap();
    let reviewer = stdout.find("Reviewer").unwrap();
    assert!(planner < reviewer, "newest run should come first:\n{stdout}");
}

#[test]
fn json_output_carries_records() {
    let ws = Workspace::empty();
    ws.file("state/runs.json", RUNS);

    let runs = ws.deck().args(&["run", "list", "-o", "json"]).passes().json();
    assert_eq!(runs[0]["id"], json!("run-2"));
    assert_eq!(runs[1]["metrics"]["total_tokens"], json!(12345));
}

#[test]
fn malformed_runs_file_fails() {
    let ws = Workspace::empty();
    ws.file("state/runs.json", "[{\"id\": 1}]");
    ws.deck().args(&["run", "list"]).fails_with(1).stderr_has("malformed runs");
}
