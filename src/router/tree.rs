//! Per-method segment trees compiled from the route table.

use std::collections::HashMap;

use log::{debug, info, warn};

use crate::router::error::RouteError;
use crate::router::table::RouteTable;
use crate::router::tst::Tst;
use crate::router::validator::{split_pattern, Segment, WILDCARD};

/// Index of a node inside its [`MethodTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

const ROOT: NodeId = NodeId(0);

/// What a node matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The exact segment text stored in the node name.
    Literal,
    /// Any single segment.
    Param,
    /// Every remaining segment.
    Wildcard,
}

/// Handler chain stored where a route pattern ends.
#[derive(Debug)]
pub(crate) struct Endpoint<H> {
    pub(crate) handlers: Vec<H>,
    /// Capture names in pattern order; `*` for the wildcard.
    pub(crate) keys: Vec<String>,
}

/// A node of a method tree.
#[derive(Debug)]
pub struct RouteNode<H> {
    name: String,
    kind: NodeKind,
    pub(crate) endpoint: Option<Endpoint<H>>,
    pub(crate) literals: Tst<NodeId>,
    pub(crate) param: Option<NodeId>,
    pub(crate) wildcard: Option<NodeId>,
}

impl<H> RouteNode<H> {
    fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            endpoint: None,
            literals: Tst::new(),
            param: None,
            wildcard: None,
        }
    }

    /// Segment text, parameter name, or `*`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// What this node matches.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Whether a route ends at this node.
    pub fn is_endpoint(&self) -> bool {
        self.endpoint.is_some()
    }
}

/// The segment tree of a single HTTP method.
///
/// Nodes live in an arena and refer to their children by [`NodeId`].
#[derive(Debug)]
pub struct MethodTree<H> {
    nodes: Vec<RouteNode<H>>,
}

impl<H> Default for MethodTree<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> MethodTree<H> {
    /// Create a tree holding only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![RouteNode::new("/", NodeKind::Literal)],
        }
    }

    /// The root node.
    pub fn root(&self) -> &RouteNode<H> {
        self.node(ROOT)
    }

    pub(crate) fn root_id(&self) -> NodeId {
        ROOT
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> &RouteNode<H> {
        &self.nodes[id.0]
    }

    /// Total number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether only the root node exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Number of routes ending in this tree.
    pub fn route_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_endpoint()).count()
    }

    fn push(&mut self, node: RouteNode<H>) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Walk `path` from the root, creating missing nodes, and store
    /// `handlers` at the node where it ends.
    fn insert(&mut self, method: &str, path: &str, handlers: Vec<H>) -> Result<(), RouteError> {
        let mut current = ROOT;
        let mut keys = Vec::new();

        for segment in split_pattern(path) {
            current = match segment {
                Segment::Literal(text) => {
                    let existing = self.node(current).literals.get_str(text).copied();
                    match existing {
                        Some(child) => child,
                        None => {
                            let child = self.push(RouteNode::new(text, NodeKind::Literal));
                            self.nodes[current.0].literals.insert(text.as_bytes(), child);
                            child
                        }
                    }
                }
                Segment::Param(name) => {
                    keys.push(name.to_string());
                    let existing = self.node(current).param;
                    match existing {
                        Some(child) => child,
                        None => {
                            let child = self.push(RouteNode::new(name, NodeKind::Param));
                            self.nodes[current.0].param = Some(child);
                            child
                        }
                    }
                }
                Segment::Wildcard => {
                    keys.push(WILDCARD.to_string());
                    let existing = self.node(current).wildcard;
                    match existing {
                        Some(child) => child,
                        None => {
                            let child = self.push(RouteNode::new(WILDCARD, NodeKind::Wildcard));
                            self.nodes[current.0].wildcard = Some(child);
                            child
                        }
                    }
                }
            };
        }

        let node = &mut self.nodes[current.0];
        if node.endpoint.is_some() {
            return Err(RouteError::Conflict {
                method: method.to_string(),
                path: path.to_string(),
            });
        }

        node.endpoint = Some(Endpoint { handlers, keys });
        Ok(())
    }

    /// Find the endpoint matching `segments` below `id`, pushing captured
    /// values onto `values`.
    ///
    /// Children are tried literal first, then parameter, then wildcard; a
    /// branch that dead-ends is undone before the next one is tried.
    pub(crate) fn find(
        &self,
        id: NodeId,
        segments: &[&str],
        values: &mut Vec<String>,
    ) -> Option<&Endpoint<H>> {
        let node = self.node(id);

        let Some((first, rest)) = segments.split_first() else {
            if let Some(endpoint) = node.endpoint.as_ref() {
                return Some(endpoint);
            }
            // A trailing wildcard also matches zero remaining segments.
            let endpoint = self.node(node.wildcard?).endpoint.as_ref()?;
            values.push(String::new());
            return Some(endpoint);
        };

        let literal = node.literals.get_str(first).copied();
        for child_id in [literal, node.param, node.wildcard].into_iter().flatten() {
            let child = self.node(child_id);
            match child.kind {
                NodeKind::Literal => {
                    if let Some(endpoint) = self.find(child_id, rest, values) {
                        return Some(endpoint);
                    }
                }
                NodeKind::Param => {
                    values.push((*first).to_string());
                    if let Some(endpoint) = self.find(child_id, rest, values) {
                        return Some(endpoint);
                    }
                    values.pop();
                }
                NodeKind::Wildcard => {
                    if let Some(endpoint) = child.endpoint.as_ref() {
                        values.push(segments.join("/"));
                        return Some(endpoint);
                    }
                }
            }
        }

        None
    }
}

/// The compiled routes of every method plus the fallback chain.
///
/// Built once from a [`RouteTable`] and never mutated afterwards, so it can
/// be shared between threads and matched against without locking.
#[derive(Debug)]
pub struct RoutingTree<H> {
    pub(crate) trees: HashMap<String, MethodTree<H>>,
    pub(crate) fallback: Option<Vec<H>>,
}

impl<H: Clone> RoutingTree<H> {
    /// Compile `table` into one tree per method.
    ///
    /// Middleware is prepended to every route chain and to the fallback.
    /// Nothing is returned if any two routes of the same method end at the
    /// same tree position.
    pub fn build(table: &RouteTable<H>) -> Result<Self, RouteError> {
        let mut trees: HashMap<String, MethodTree<H>> = HashMap::new();
        let middleware = table.middleware();

        for entry in table.entries() {
            let handlers: Vec<H> = middleware.iter().chain(&entry.handlers).cloned().collect();
            let tree = trees.entry(entry.method.clone()).or_default();

            if let Err(e) = tree.insert(&entry.method, &entry.path, handlers) {
                warn!("Failed to build routing tree: {e}");
                return Err(e);
            }
            debug!(
                "Compiled route {method} {path} ({count} handlers)",
                method = entry.method,
                path = entry.path,
                count = middleware.len() + entry.handlers.len()
            );
        }

        let fallback = table
            .fallback()
            .map(|handlers| middleware.iter().chain(handlers).cloned().collect());

        info!(
            "Routing tree built: {routes} routes across {methods} methods",
            routes = table.len(),
            methods = trees.len()
        );

        Ok(Self { trees, fallback })
    }
}

impl<H> RoutingTree<H> {
    /// The tree for `method`, if any route uses it.
    pub fn method_tree(&self, method: &str) -> Option<&MethodTree<H>> {
        self.trees.get(method)
    }

    /// Methods that have at least one route.
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.trees.keys().map(String::as_str)
    }

    /// Total number of compiled routes.
    pub fn route_count(&self) -> usize {
        self.trees.values().map(MethodTree::route_count).sum()
    }

    /// Whether a fallback chain is compiled in.
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}
