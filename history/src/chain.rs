//! Arena-backed backward chain of commits
//!
//! Nodes live in a map keyed by [`NodeKey`]; each node stores the key of the
//! commit made before it. Keys are local to one chain and never handed out
//! twice, so copying commits from another chain always produces fresh nodes.

use crate::commit::Commit;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NodeKey(u64);

#[derive(Debug)]
struct Node {
    commit: Commit,
    past: Option<NodeKey>,
}

#[derive(Debug, Default)]
pub(crate) struct Chain {
    nodes: HashMap<NodeKey, Node>,
    head: Option<NodeKey>,
    next_key: u64,
}

impl Chain {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub(crate) fn head(&self) -> Option<&Commit> {
        self.head.map(|key| &self.nodes[&key].commit)
    }

    pub(crate) fn iter(&self) -> Iter<'_> {
        Iter {
            chain: self,
            next: self.head,
        }
    }

    pub(crate) fn tail(&self) -> Option<&Commit> {
        self.tail_key().map(|key| &self.nodes[&key].commit)
    }

    /// Make `commit` the new head, linked to the current head
    pub(crate) fn push(&mut self, commit: Commit) {
        let key = self.insert(commit, self.head);
        self.head = Some(key);
    }

    /// Unlink the first commit with `id` found walking from head.
    ///
    /// The predecessor in walk order is rewired to the removed node's past,
    /// which is `None` when the removed commit was the tail.
    pub(crate) fn remove(&mut self, id: &str) -> Option<Commit> {
        let mut newer: Option<NodeKey> = None;
        let mut current = self.head;

        while let Some(key) = current {
            let node = &self.nodes[&key];
            if node.commit.id == id {
                let past = node.past;
                match newer {
                    None => self.head = past,
                    Some(newer_key) => {
                        if let Some(newer_node) = self.nodes.get_mut(&newer_key) {
                            newer_node.past = past;
                        }
                    }
                }
                return self.nodes.remove(&key).map(|node| node.commit);
            }
            newer = Some(key);
            current = node.past;
        }

        None
    }

    /// Copy every commit of `other` onto the end of this chain.
    ///
    /// Ids, messages and timestamps are preserved; every copied commit gets a
    /// fresh node in this arena. Returns the number of commits copied.
    pub(crate) fn append_copy_of(&mut self, other: &Chain) -> usize {
        let commits: Vec<Commit> = other.iter().cloned().collect();
        let copied = commits.len();
        if copied == 0 {
            return 0;
        }

        let tail = self.tail_key();

        let mut copy_head = None;
        for commit in commits.into_iter().rev() {
            copy_head = Some(self.insert(commit, copy_head));
        }

        match tail {
            None => self.head = copy_head,
            Some(tail_key) => {
                if let Some(tail_node) = self.nodes.get_mut(&tail_key) {
                    tail_node.past = copy_head;
                }
            }
        }

        copied
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
    }

    fn insert(&mut self, commit: Commit, past: Option<NodeKey>) -> NodeKey {
        let key = NodeKey(self.next_key);
        self.next_key += 1;
        self.nodes.insert(key, Node { commit, past });
        key
    }

    fn tail_key(&self) -> Option<NodeKey> {
        let mut current = self.head?;
        while let Some(past) = self.nodes[&current].past {
            current = past;
        }
        Some(current)
    }

    #[cfg(test)]
    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Walks a chain from head to tail
pub struct Iter<'a> {
    chain: &'a Chain,
    next: Option<NodeKey>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Commit;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.next?;
        let node = &self.chain.nodes[&key];
        self.next = node.past;
        Some(&node.commit)
    }
}
