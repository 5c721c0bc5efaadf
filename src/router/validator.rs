//! Route path grammar: validation and segment splitting.

use crate::router::error::RouteError;

/// Leading character of a parameter segment, e.g. `:id`.
pub const PARAM_SENTINEL: char = ':';

/// A segment made of exactly this marker matches the rest of the path.
pub const WILDCARD: &str = "*";

/// One segment of a route pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Matched by exact byte equality.
    Literal(&'a str),
    /// Matches any single segment and binds it under the given name.
    Param(&'a str),
    /// Matches every remaining segment, always last.
    Wildcard,
}

impl<'a> Segment<'a> {
    /// Classify a raw pattern segment.
    pub fn parse(raw: &'a str) -> Self {
        if raw == WILDCARD {
            Segment::Wildcard
        } else if let Some(name) = raw.strip_prefix(PARAM_SENTINEL) {
            Segment::Param(name)
        } else {
            Segment::Literal(raw)
        }
    }
}

/// Check a route path against the pattern grammar.
///
/// # Arguments
///
/// * `path` - The route path, e.g. `/users/:id` or `/static/*`
///
/// # Returns
///
/// `Ok(())` if the path can be registered, or the first rule it breaks
pub fn validate(path: &str) -> Result<(), RouteError> {
    if path.is_empty() {
        return Err(RouteError::EmptyPath);
    }

    let Some(rest) = path.strip_prefix('/') else {
        return Err(RouteError::MissingLeadingSlash(path.to_string()));
    };

    let mut segments = rest.split('/').peekable();
    while let Some(segment) = segments.next() {
        if segment == WILDCARD && segments.peek().is_some() {
            return Err(RouteError::WildcardNotTerminal(path.to_string()));
        }
    }

    Ok(())
}

/// Split a path into its segments.
///
/// The empty segment before the leading `/` is skipped; every other segment,
/// including empty ones from doubled or trailing slashes, is kept.
pub fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.strip_prefix('/').unwrap_or(path).split('/')
}

/// Split a validated route path into classified segments.
pub fn split_pattern(path: &str) -> impl Iterator<Item = Segment<'_>> {
    split_path(path).map(Segment::parse)
}
