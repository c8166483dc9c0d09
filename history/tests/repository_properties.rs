//! Behavioural tests for the public repository API.
//!
//! Tests going through `Repository::new` share the process-wide id counter
//! and are serialized; the rest use their own `SequentialIds`.

use history::prelude::*;
use serial_test::serial;
use std::sync::Arc;

fn isolated(name: &str, ids: &SequentialIds) -> Repository {
    Repository::with_config(
        name,
        Arc::new(ids.clone()),
        DisplayConfig::new().with_zone(DisplayZone::Utc),
    )
    .unwrap()
}

fn chain(repo: &Repository) -> Vec<(String, String)> {
    repo.iter()
        .map(|c| (c.id.to_string(), c.message.clone()))
        .collect()
}

#[test]
#[serial]
fn test_global_repository_starts_empty() {
    reset_ids();
    for name in ["a", "repo", "with spaces", "ü"] {
        let repo = Repository::new(name).unwrap();
        assert_eq!(repo.size(), 0);
        assert!(repo.head_id().is_none());
        assert_eq!(repo.to_string(), format!("{} - No commits", name));
    }
}

#[test]
#[serial]
fn test_global_ids_shared_between_repositories() {
    reset_ids();
    let mut first = Repository::new("first").unwrap();
    let mut second = Repository::new("second").unwrap();

    assert_eq!(first.commit("a"), "0");
    assert_eq!(second.commit("b"), "1");
    assert_eq!(first.commit("c"), "2");

    reset_ids();
    let mut third = Repository::new("third").unwrap();
    assert_eq!(third.commit("d"), "0");
}

#[test]
fn test_empty_name_is_invalid() {
    assert!(matches!(
        Repository::new(""),
        Err(HistoryError::InvalidName)
    ));
}

#[test]
fn test_n_commits() {
    let ids = SequentialIds::new();
    let mut repo = isolated("repo", &ids);

    let mut last = None;
    for i in 0..25 {
        last = Some(repo.commit(format!("commit {}", i)));
    }

    assert_eq!(repo.size(), 25);
    assert_eq!(repo.head_id(), last.as_ref());
}

#[test]
fn test_ids_strictly_increasing() {
    let ids = SequentialIds::new();
    let mut repo = isolated("repo", &ids);

    let numeric: Vec<u64> = (0..10)
        .map(|i| repo.commit(i.to_string()).as_str().parse().unwrap())
        .collect();

    assert!(numeric.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_contains_after_commit_and_drop() {
    let ids = SequentialIds::new();
    let mut repo = isolated("repo", &ids);
    let id = repo.commit("tracked");

    assert!(repo.contains(id.as_str()));
    assert!(repo.drop_commit(id.as_str()));
    assert!(!repo.contains(id.as_str()));
    assert!(!repo.drop_commit(id.as_str()));
}

#[test]
fn test_drop_unknown_leaves_state_unchanged() {
    let ids = SequentialIds::new();
    let mut repo = isolated("repo", &ids);
    repo.commit("a");
    repo.commit("b");
    let before = chain(&repo);

    assert!(!repo.drop_commit("nope"));
    assert!(!repo.drop_commit(""));
    assert_eq!(chain(&repo), before);
}

#[test]
fn test_drop_every_commit_from_head() {
    let ids = SequentialIds::new();
    let mut repo = isolated("repo", &ids);
    for i in 0..5 {
        repo.commit(format!("m{}", i));
    }

    for expected in (0..5).rev() {
        let head = repo.head_id().cloned().unwrap();
        assert!(repo.drop_commit(head.as_str()));
        assert_eq!(repo.size(), expected);
    }

    assert!(repo.head_id().is_none());
    assert_eq!(repo.history(1).unwrap(), "");
}

#[test]
fn test_drop_tail_then_keep_working() {
    let ids = SequentialIds::new();
    let mut repo = isolated("repo", &ids);
    let tail = repo.commit("oldest");
    repo.commit("middle");
    repo.commit("newest");

    assert!(repo.drop_commit(tail.as_str()));
    assert_eq!(repo.size(), 2);
    assert_eq!(repo.tail_id().unwrap(), "1");

    repo.commit("after");
    assert_eq!(
        chain(&repo),
        vec![
            ("3".to_string(), "after".to_string()),
            ("2".to_string(), "newest".to_string()),
            ("1".to_string(), "middle".to_string()),
        ]
    );
}

#[test]
fn test_history_bounds() {
    let ids = SequentialIds::new();
    let mut repo = isolated("repo", &ids);
    for message in ["one", "two", "three"] {
        repo.commit(message);
    }

    assert!(repo.history(0).is_err());

    let one = repo.history(1).unwrap();
    assert_eq!(one.lines().count(), 1);
    assert!(one.ends_with(": three"));

    let all = repo.history(50).unwrap();
    let messages: Vec<&str> = all
        .lines()
        .map(|line| line.rsplit(": ").next().unwrap())
        .collect();
    assert_eq!(messages, vec!["three", "two", "one"]);
}

#[test]
fn test_history_line_format() {
    let ids = SequentialIds::new();
    let mut repo = isolated("repo", &ids);
    repo.commit("hello world");

    let commit = repo.head().unwrap();
    let expected = format!(
        "0 at {}: hello world",
        commit.timestamp.format("%Y-%m-%d at %H:%M:%S UTC")
    );
    assert_eq!(repo.history(1).unwrap(), expected);
    assert_eq!(
        repo.to_string(),
        format!("repo - Current head: {}", expected)
    );
}

#[test]
fn test_synchronize_merges_in_order() {
    let ids = SequentialIds::new();
    let mut a = isolated("A", &ids);
    let mut b = isolated("B", &ids);
    a.commit("a2");
    a.commit("a1");
    b.commit("b2");
    b.commit("b1");

    let originals: Vec<Commit> = b.iter().cloned().collect();

    a.synchronize(&mut b);

    let messages: Vec<String> = a.iter().map(|c| c.message.clone()).collect();
    assert_eq!(messages, vec!["a1", "a2", "b1", "b2"]);
    assert_eq!(b.size(), 0);
    assert!(b.head_id().is_none());

    let copies: Vec<Commit> = a.iter().skip(2).cloned().collect();
    assert_eq!(copies, originals);
}

#[test]
fn test_synchronize_into_empty_moves_chain() {
    let ids = SequentialIds::new();
    let mut a = isolated("A", &ids);
    let mut b = isolated("B", &ids);
    b.commit("x");
    b.commit("y");
    let expected = chain(&b);

    a.synchronize(&mut b);

    assert_eq!(chain(&a), expected);
    assert!(b.is_empty());
}

#[test]
fn test_synchronize_twice_only_moves_once() {
    let ids = SequentialIds::new();
    let mut a = isolated("A", &ids);
    let mut b = isolated("B", &ids);
    b.commit("x");

    a.synchronize(&mut b);
    a.synchronize(&mut b);

    assert_eq!(a.size(), 1);
}

#[test]
fn test_uuid_generator_repository() {
    let mut repo = Repository::with_generator("uuids", Arc::new(UuidIds::new())).unwrap();
    let first = repo.commit("a");
    let second = repo.commit("b");

    assert_ne!(first, second);
    assert_eq!(first.as_str().len(), 36);
    assert!(repo.contains(first.as_str()));
}

#[test]
fn test_snapshot_lists_chain() {
    let ids = SequentialIds::new();
    let mut repo = isolated("repo", &ids);
    repo.commit("a");
    repo.commit("b");

    let snapshot = repo.snapshot();
    let ids: Vec<&str> = snapshot.commits.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "0"]);

    let json: serde_json::Value = serde_json::from_str(&repo.to_json().unwrap()).unwrap();
    assert_eq!(json["name"], "repo");
    assert_eq!(json["size"], 2);
    assert_eq!(json["head"], "1");
}

#[test]
#[serial]
fn test_default_history_names_the_zone() {
    let previous = std::env::var("TZ").ok();
    let mut rendered = Vec::new();
    for zone in ["UTC", "America/Los_Angeles"] {
        std::env::set_var("TZ", zone);
        let mut repo =
            Repository::with_generator("r", Arc::new(SequentialIds::new())).unwrap();
        repo.commit("m");
        rendered.push(repo.history(1).unwrap());
    }
    match previous {
        Some(value) => std::env::set_var("TZ", value),
        None => std::env::remove_var("TZ"),
    }

    assert!(rendered[0].ends_with(" UTC: m"), "{}", rendered[0]);
    assert!(
        rendered[1].ends_with(" PDT: m") || rendered[1].ends_with(" PST: m"),
        "{}",
        rendered[1]
    );
}
