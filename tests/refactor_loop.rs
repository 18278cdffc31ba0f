//! End-to-end runs of the refactor loop against an in-memory clipboard

use std::time::Duration;

use clip_refactor::prelude::*;
use pretty_assertions::assert_eq;

const BLOCK: &str = "json!({\n    \"1\": 10,\n    \"2\": 20,\n});";
const VEC: &str = "vec![\n    (1, GDValue::Int(10)),\n    (2, GDValue::Int(20)),\n];";

fn session(initial: &str) -> RefactorSession<MemoryClipboard> {
    let config = WatcherConfig {
        poll_interval: Duration::ZERO,
    };
    let watcher = ClipboardWatcher::new(MemoryClipboard::new(initial), config).unwrap();
    RefactorSession::new(watcher, LineTransformer::new())
}

fn copy(s: &mut RefactorSession<MemoryClipboard>, text: &str) {
    s.watcher_mut().clipboard_mut().copy_external(text);
}

#[test]
fn publishes_block_and_skips_own_echo() {
    let mut s = session("whatever was there");
    copy(&mut s, BLOCK);

    let first = s.step().unwrap();
    assert_eq!(
        first,
        CycleOutcome::Published {
            input: BLOCK.to_string(),
            output: VEC.to_string(),
        }
    );
    assert_eq!(s.watcher().clipboard().current(), Some(VEC));

    // the next read sees our own write; only the copy after it is accepted
    copy(&mut s, "\"7\": 3");
    let second = s.step().unwrap();
    assert_eq!(
        second,
        CycleOutcome::Published {
            input: "\"7\": 3".to_string(),
            output: "    (7, GDValue::Int(3)),\n".to_string(),
        }
    );
    assert_eq!(
        s.watcher().clipboard().writes(),
        [VEC.to_string(), "    (7, GDValue::Int(3)),\n".to_string()]
    );
    assert_eq!(s.cycles(), 2);
}

#[test]
fn failed_transform_accepts_very_next_change() {
    let mut s = session("");
    copy(&mut s, "json!({\n\"1\" 10\n});");

    match s.step().unwrap() {
        CycleOutcome::Failed { error } => {
            assert_eq!(error.input(), "json!({\n\"1\" 10\n});");
            assert_eq!(error.line_number, 2);
            assert_eq!(error.reason, ParseFailure::MissingSeparator);
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(s.watcher().clipboard().writes().is_empty());
    assert_eq!(s.policy().required_skips, 0);

    copy(&mut s, BLOCK);
    assert_eq!(
        s.step().unwrap(),
        CycleOutcome::Published {
            input: BLOCK.to_string(),
            output: VEC.to_string(),
        }
    );
}

#[test]
fn change_right_after_publish_is_treated_as_echo() {
    let mut s = session("");
    copy(&mut s, BLOCK);
    s.step().unwrap();
    assert_eq!(s.policy(), SkipPolicy::AFTER_PUBLISH);

    // echo observed, counter 1, nothing accepted yet
    assert_eq!(s.watcher_mut().poll(1).unwrap(), None);
    assert_eq!(s.watcher().state().previous, VEC);
    assert_eq!(s.watcher().state().skip_counter, 1);
}

#[test]
fn whitespace_and_commas_do_not_change_output() {
    assert_eq!(transform("  \"42\": 7,  "), transform("\"42\": 7"));
}

#[test]
fn empty_text_paste_publishes_empty_output() {
    let mut s = session("something");
    copy(&mut s, "");

    assert_eq!(
        s.step().unwrap(),
        CycleOutcome::Published {
            input: String::new(),
            output: String::new(),
        }
    );
    assert_eq!(s.policy(), SkipPolicy::AFTER_PUBLISH);
}

#[test]
fn non_text_copy_is_ignored_and_never_overwritten() {
    let mut s = session("something");
    s.watcher_mut().clipboard_mut().copy_non_text();
    copy(&mut s, BLOCK);

    // the image in between is not a paste; the block right after it is
    assert_eq!(
        s.step().unwrap(),
        CycleOutcome::Published {
            input: BLOCK.to_string(),
            output: VEC.to_string(),
        }
    );
    assert_eq!(s.watcher().clipboard().writes(), [VEC.to_string()]);
    assert_eq!(s.cycles(), 1);
}
