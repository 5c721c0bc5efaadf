//! Request matching against a compiled [`RoutingTree`].

use crate::router::tree::RoutingTree;
use crate::router::validator::split_path;

/// Values captured from the request path, in pattern order.
///
/// A parameter segment `:id` is stored under `id`; a wildcard under `*`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    fn from_keys(keys: &[String], values: Vec<String>) -> Self {
        Self {
            pairs: keys.iter().cloned().zip(values).collect(),
        }
    }

    /// Get the value captured under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find_map(|(k, v)| (k == name).then_some(v.as_str()))
    }

    /// Iterate over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of captured values.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// The outcome of a successful lookup.
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    /// The handler chain to run, middleware first.
    pub handlers: &'a [H],
    /// Captured path values; always empty for the fallback.
    pub params: Params,
    /// Whether no route matched and the fallback was selected.
    pub is_fallback: bool,
}

impl<H> RoutingTree<H> {
    /// Select the handler chain for a request.
    ///
    /// # Arguments
    ///
    /// * `method` - The request method, compared case-sensitively
    /// * `path` - The request path without its query string
    ///
    /// # Returns
    ///
    /// The matched route, the fallback if no route matches, or `None`. An
    /// empty path matches nothing, not even the fallback.
    pub fn match_route(&self, method: &str, path: &str) -> Option<RouteMatch<'_, H>> {
        if path.is_empty() {
            return None;
        }

        if let Some(tree) = self.trees.get(method) {
            let segments: Vec<&str> = split_path(path).collect();
            let mut values = Vec::new();

            if let Some(endpoint) = tree.find(tree.root_id(), &segments, &mut values) {
                return Some(RouteMatch {
                    handlers: &endpoint.handlers,
                    params: Params::from_keys(&endpoint.keys, values),
                    is_fallback: false,
                });
            }
        }

        self.fallback.as_deref().map(|handlers| RouteMatch {
            handlers,
            params: Params::default(),
            is_fallback: true,
        })
    }
}
