// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! End-to-end tests that run the compiled binary against collections in
//! temporary directories.

use std::fs::read_to_string;
use std::fs::write;
use std::process::Command;
use std::process::Output;

use serde_json::Value;
use tempfile::TempDir;
use tempfile::tempdir;

use duecards_core::Fallible;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_duecards"))
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn dir_arg(dir: &TempDir) -> String {
    dir.path().display().to_string()
}

/// A collection with one deck of three items.
fn collection_with_deck() -> Fallible<TempDir> {
    let dir = tempdir()?;
    write(
        dir.path().join("kana.toml"),
        "name = \"Kana\"\nitems = [\"ka\", \"ki\", \"ku\"]\n",
    )?;
    Ok(dir)
}

fn stats_json(dir: &TempDir) -> Value {
    let output = run(&["stats", &dir_arg(dir), "--format", "json"]);
    assert!(output.status.success());
    serde_json::from_str(&stdout(&output)).unwrap()
}

#[test]
fn test_due_lists_new_items_in_catalog_order() -> Fallible<()> {
    let dir = collection_with_deck()?;
    let output = run(&["due", &dir_arg(&dir)]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "ka\nki\nku\n");
    Ok(())
}

#[test]
fn test_due_overdue_first_on_fresh_collection() -> Fallible<()> {
    // Never-scheduled items tie and fall back to id order.
    let dir = collection_with_deck()?;
    let output = run(&["due", &dir_arg(&dir), "--overdue-first"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "ka\nki\nku\n");
    Ok(())
}

#[test]
fn test_rate_reschedules_the_item() -> Fallible<()> {
    let dir = collection_with_deck()?;
    let output = run(&["rate", "ka", "5", &dir_arg(&dir)]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("ka: perfect (5/5). Next review in 1 day(s), at "));
    // The rated item is scheduled for tomorrow, so it is no longer due.
    let output = run(&["due", &dir_arg(&dir)]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "ki\nku\n");
    Ok(())
}

#[test]
fn test_rate_accepts_quality_names() -> Fallible<()> {
    let dir = collection_with_deck()?;
    let output = run(&["rate", "ka", "hesitant", &dir_arg(&dir)]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("ka: hesitant (4/5)."));
    Ok(())
}

#[test]
fn test_rate_rejects_out_of_range_quality() -> Fallible<()> {
    let dir = collection_with_deck()?;
    let output = run(&["rate", "ka", "9", &dir_arg(&dir)]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid quality rating: '9'"));
    let output = run(&["rate", "ka", "great", &dir_arg(&dir)]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid quality rating: 'great'"));
    Ok(())
}

#[test]
fn test_rate_rejects_unknown_item() -> Fallible<()> {
    let dir = collection_with_deck()?;
    let output = run(&["rate", "zz", "5", &dir_arg(&dir)]);
    assert!(!output.status.success());
    assert_eq!(stderr(&output), "error: item 'zz' is not in any deck.\n");
    Ok(())
}

#[test]
fn test_due_filtered_by_mastery() -> Fallible<()> {
    let dir = collection_with_deck()?;
    let output = run(&["rate", "ka", "5", &dir_arg(&dir)]);
    assert!(output.status.success());
    // The two untouched items are due and new; the rated one is neither.
    let output = run(&["due", &dir_arg(&dir), "--mastery", "new"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "ki\nku\n");
    let output = run(&["due", &dir_arg(&dir), "--mastery", "learning"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "No items due.\n");
    let output = run(&["due", &dir_arg(&dir), "--mastery", "wat"]);
    assert!(!output.status.success());
    assert_eq!(stderr(&output), "error: invalid mastery level: 'wat'.\n");
    Ok(())
}

#[test]
fn test_stats_json() -> Fallible<()> {
    let dir = collection_with_deck()?;
    let output = run(&["rate", "ka", "5", &dir_arg(&dir)]);
    assert!(output.status.success());
    let stats = stats_json(&dir);
    assert_eq!(stats["items"].as_u64(), Some(3));
    assert_eq!(stats["untracked"].as_u64(), Some(2));
    assert_eq!(stats["orphans"].as_u64(), Some(0));
    assert_eq!(stats["new"].as_u64(), Some(2));
    assert_eq!(stats["learning"].as_u64(), Some(1));
    assert_eq!(stats["review"].as_u64(), Some(0));
    assert_eq!(stats["mastered"].as_u64(), Some(0));
    assert_eq!(stats["due"].as_u64(), Some(2));
    assert_eq!(stats["overdue"].as_u64(), Some(0));
    assert_eq!(stats["favorites"].as_u64(), Some(0));
    assert_eq!(stats["total_reviews"].as_u64(), Some(1));
    assert_eq!(stats["total_correct"].as_u64(), Some(1));
    assert_eq!(stats["accuracy"].as_f64(), Some(1.0));
    Ok(())
}

#[test]
fn test_stats_table() -> Fallible<()> {
    let dir = collection_with_deck()?;
    let output = run(&["stats", &dir_arg(&dir)]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("items:          3"));
    assert!(text.contains("never seen:   3"));
    assert!(text.contains("due now:        3"));
    Ok(())
}

#[test]
fn test_favorite_set_and_unset() -> Fallible<()> {
    let dir = collection_with_deck()?;
    let output = run(&["favorite", "ka", &dir_arg(&dir)]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "ka is now a favorite.\n");
    assert_eq!(stats_json(&dir)["favorites"].as_u64(), Some(1));
    let output = run(&["favorite", "ka", &dir_arg(&dir), "--unset"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "ka is no longer a favorite.\n");
    assert_eq!(stats_json(&dir)["favorites"].as_u64(), Some(0));
    Ok(())
}

#[test]
fn test_check_passes_on_healthy_collection() -> Fallible<()> {
    let dir = collection_with_deck()?;
    let output = run(&["rate", "ka", "3", &dir_arg(&dir)]);
    assert!(output.status.success());
    let output = run(&["check", &dir_arg(&dir)]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("OK: 1 stored state(s) checked in "));
    Ok(())
}

#[test]
fn test_export_to_file_and_stdout() -> Fallible<()> {
    let dir = collection_with_deck()?;
    let output = run(&["rate", "ka", "5", &dir_arg(&dir)]);
    assert!(output.status.success());
    let path = dir.path().join("progress.json");
    let path_arg = path.display().to_string();
    let output = run(&["export", &dir_arg(&dir), "--output", &path_arg]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), format!("Exported 1 state(s) to {path_arg}.\n"));
    let exported: Value = serde_json::from_str(&read_to_string(&path)?)?;
    let states = exported.as_array().unwrap();
    assert_eq!(states.len(), 1);
    assert_eq!(states[0]["item_id"].as_str(), Some("ka"));
    assert_eq!(states[0]["review_count"].as_u64(), Some(1));
    // Without --output the same document goes to stdout.
    let output = run(&["export", &dir_arg(&dir)]);
    assert!(output.status.success());
    let printed: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(printed, exported);
    Ok(())
}

#[test]
fn test_orphan_lifecycle() -> Fallible<()> {
    let dir = collection_with_deck()?;
    let output = run(&["rate", "ka", "5", &dir_arg(&dir)]);
    assert!(output.status.success());
    let output = run(&["orphans", "list", &dir_arg(&dir)]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "No orphan progress records.\n");
    // Removing the item from the deck orphans its progress record.
    write(dir.path().join("kana.toml"), "items = [\"ki\", \"ku\"]\n")?;
    let output = run(&["orphans", "list", &dir_arg(&dir)]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "ka\n");
    assert_eq!(stats_json(&dir)["orphans"].as_u64(), Some(1));
    let output = run(&["orphans", "delete", &dir_arg(&dir)]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Deleted 1 orphan progress record(s).\n");
    let output = run(&["orphans", "list", &dir_arg(&dir)]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "No orphan progress records.\n");
    Ok(())
}

#[test]
fn test_reset_item() -> Fallible<()> {
    let dir = collection_with_deck()?;
    let output = run(&["rate", "ka", "5", &dir_arg(&dir)]);
    assert!(output.status.success());
    let output = run(&["reset", "item", "ka", &dir_arg(&dir)]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Progress for ka has been reset.\n");
    let output = run(&["reset", "item", "ka", &dir_arg(&dir)]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "No progress recorded for ka.\n");
    // The reset item is due again.
    let output = run(&["due", &dir_arg(&dir)]);
    assert_eq!(stdout(&output), "ka\nki\nku\n");
    Ok(())
}

#[test]
fn test_reset_all() -> Fallible<()> {
    let dir = collection_with_deck()?;
    let output = run(&["rate", "ka", "5", &dir_arg(&dir)]);
    assert!(output.status.success());
    let output = run(&["rate", "ki", "0", &dir_arg(&dir)]);
    assert!(output.status.success());
    let output = run(&["reset", "all", &dir_arg(&dir)]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "All progress has been reset.\n");
    assert_eq!(stats_json(&dir)["total_reviews"].as_u64(), Some(0));
    Ok(())
}

#[test]
fn test_nonexistent_directory() {
    let output = run(&["due", "./derpherp"]);
    assert!(!output.status.success());
    assert_eq!(stderr(&output), "error: directory does not exist.\n");
}

#[test]
fn test_mastery_thresholds_from_config() -> Fallible<()> {
    let dir = collection_with_deck()?;
    // With the repetition bound for the learning tier lowered to zero,
    // a single success already counts as review-tier.
    write(
        dir.path().join("duecards.toml"),
        "[mastery]\nlearning_max_repetition = 0\n",
    )?;
    let output = run(&["rate", "ka", "5", &dir_arg(&dir)]);
    assert!(output.status.success());
    let stats = stats_json(&dir);
    assert_eq!(stats["learning"].as_u64(), Some(0));
    assert_eq!(stats["review"].as_u64(), Some(1));
    Ok(())
}
