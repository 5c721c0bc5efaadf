//! Ternary search tree over byte strings.
//!
//! Every node holds a single byte. Keys whose next byte is smaller continue
//! through `lower`, larger through `higher`, and equal bytes advance the key
//! through `equal`. A payload lives on the node where a stored key ends.

use std::cmp::Ordering;

#[derive(Debug)]
struct TstNode<V> {
    byte: u8,
    lower: Option<Box<TstNode<V>>>,
    higher: Option<Box<TstNode<V>>>,
    equal: Option<Box<TstNode<V>>>,
    value: Option<V>,
}

impl<V> TstNode<V> {
    fn new(byte: u8) -> Self {
        Self {
            byte,
            lower: None,
            higher: None,
            equal: None,
            value: None,
        }
    }
}

/// A ternary search tree mapping byte-string keys to values of type `V`.
///
/// Nodes are created lazily along the path of each inserted key and are never
/// removed. The empty key is kept in its own slot next to the root.
#[derive(Debug)]
pub struct Tst<V> {
    root: Option<Box<TstNode<V>>>,
    empty: Option<V>,
    len: usize,
}

impl<V> Default for Tst<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Tst<V> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            root: None,
            empty: None,
            len: 0,
        }
    }

    /// Number of distinct keys stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no key has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert `value` under `key`.
    ///
    /// Returns the previous value if the key was already present; the stored
    /// value is overwritten in that case.
    pub fn insert(&mut self, key: &[u8], value: V) -> Option<V> {
        let previous = if key.is_empty() {
            self.empty.replace(value)
        } else {
            Self::insert_at(&mut self.root, key, value)
        };

        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    fn insert_at(mut slot: &mut Option<Box<TstNode<V>>>, key: &[u8], value: V) -> Option<V> {
        let last = key.len() - 1;
        let mut idx = 0;

        loop {
            let byte = key[idx];
            let node = slot.get_or_insert_with(|| Box::new(TstNode::new(byte)));

            match byte.cmp(&node.byte) {
                Ordering::Less => slot = &mut node.lower,
                Ordering::Greater => slot = &mut node.higher,
                Ordering::Equal => {
                    if idx == last {
                        return node.value.replace(value);
                    }
                    idx += 1;
                    slot = &mut node.equal;
                }
            }
        }
    }

    /// Look up the value stored under `key`.
    pub fn get(&self, key: &[u8]) -> Option<&V> {
        let Some(last) = key.len().checked_sub(1) else {
            return self.empty.as_ref();
        };

        let mut node = self.root.as_deref();
        let mut idx = 0;

        while let Some(n) = node {
            match key[idx].cmp(&n.byte) {
                Ordering::Less => node = n.lower.as_deref(),
                Ordering::Greater => node = n.higher.as_deref(),
                Ordering::Equal => {
                    if idx == last {
                        return n.value.as_ref();
                    }
                    idx += 1;
                    node = n.equal.as_deref();
                }
            }
        }

        None
    }

    /// Look up the value stored under a string key.
    pub fn get_str(&self, key: &str) -> Option<&V> {
        self.get(key.as_bytes())
    }

    /// Whether a value is stored under `key`.
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }
}
