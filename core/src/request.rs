//! `Request` — An import path split into path and resource query
//!
//! The host bundler evaluates a rule's `test` against the path part of an
//! import and its `resourceQuery` against the query suffix (`?inline` in
//! `icon.svg?inline`). Splitting happens here so rule evaluation never has
//! to re-parse.

/// A parsed import request.
///
/// Borrowed view over the raw import string; the query, when present,
/// retains its leading `?` to match the host bundler's semantics.
///
/// # Example
///
/// ```
/// use svgrewire::Request;
///
/// let req = Request::parse("icon.svg?inline");
/// assert_eq!(req.path(), "icon.svg");
/// assert_eq!(req.query(), Some("?inline"));
///
/// let req = Request::parse("icon.svg");
/// assert_eq!(req.query(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request<'a> {
    path: &'a str,
    query: Option<&'a str>,
}

impl<'a> Request<'a> {
    /// Split a raw import string at the first `?`.
    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        match raw.find('?') {
            Some(idx) => Self {
                path: &raw[..idx],
                query: Some(&raw[idx..]),
            },
            None => Self {
                path: raw,
                query: None,
            },
        }
    }

    /// The path part, with any query removed.
    #[must_use]
    pub fn path(&self) -> &'a str {
        self.path
    }

    /// The resource query including its leading `?`, if any.
    #[must_use]
    pub fn query(&self) -> Option<&'a str> {
        self.query
    }
}
