//! Pure tree transforms. Each takes ownership of its input and returns a
//! fresh tree; sibling order is always preserved.

use crate::node::Node;

fn take_children(node: Node) -> Vec<Node> {
    match node {
        Node::Leaf { .. } => Vec::new(),
        Node::Branch { children, .. } => children,
    }
}

/// Collapses chains of same-key nodes. A `key`-branch with a single
/// `key`-child becomes that child; a `key`-branch inlines the children of
/// its `key`-children.
pub fn squash(node: Node, keys: &[&str]) -> Node {
    keys.iter().fold(node, |node, key| squash_key(node, key))
}

fn squash_key(node: Node, key: &str) -> Node {
    let (node_key, children) = match node {
        leaf @ Node::Leaf { .. } => return leaf,
        Node::Branch { key, children } => (key, children),
    };
    let children: Vec<Node> = children
        .into_iter()
        .map(|child| squash_key(child, key))
        .collect();
    if children.is_empty() || node_key != key {
        return Node::branch(node_key, children);
    }
    if children.len() == 1 && children[0].key() == key {
        return children.into_iter().next().unwrap();
    }
    let mut merged = Vec::new();
    for child in children {
        if child.key() != key || child.children().is_empty() {
            merged.push(child);
        } else {
            merged.extend(take_children(child));
        }
    }
    Node::branch(node_key, merged)
}

/// Removes every node whose key is in `keys`, then cascades away any branch
/// left with zero length. The root itself is never removed.
pub fn prune(node: Node, keys: &[&str]) -> Node {
    match node {
        leaf @ Node::Leaf { .. } => leaf,
        Node::Branch { key, children } => {
            let children = children
                .into_iter()
                .filter(|child| !keys.contains(&child.key()))
                .map(|child| prune(child, keys))
                .filter(|child| !child.is_empty())
                .collect();
            Node::branch(key, children)
        }
    }
}

/// Squashes over `keys`, then replaces each `key`-branch by its children.
/// A `key`-leaf is kept.
pub fn skip(node: Node, keys: &[&str]) -> Node {
    let node = squash(node, keys);
    keys.iter().fold(node, |node, key| skip_key(node, key))
}

fn skip_key(node: Node, key: &str) -> Node {
    match node {
        leaf @ Node::Leaf { .. } => leaf,
        Node::Branch {
            key: node_key,
            children,
        } => {
            let mut merged = Vec::new();
            for child in children.into_iter().map(|child| skip_key(child, key)) {
                if child.key() != key || child.children().is_empty() {
                    merged.push(child);
                } else {
                    merged.extend(take_children(child));
                }
            }
            Node::branch(node_key, merged)
        }
    }
}
