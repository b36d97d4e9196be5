//! `LoaderRef` — A named processing step plus its options mapping

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reference to a loader: the step's name plus its options.
///
/// Options are an open JSON mapping because their schema belongs to each
/// loader, not to this crate.
///
/// # Example
///
/// ```
/// use svgrewire::LoaderRef;
///
/// let loader = LoaderRef::new("url-loader").with_option("esModule", false);
/// assert_eq!(loader.loader, "url-loader");
/// assert_eq!(loader.options["esModule"], serde_json::json!(false));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderRef {
    /// The loader's name, as resolved by the host bundler.
    pub loader: String,

    /// Options passed through verbatim to the loader.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
}

impl LoaderRef {
    /// Create a loader reference with empty options.
    pub fn new(loader: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            options: Map::new(),
        }
    }

    /// Set a single option, builder style.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}
