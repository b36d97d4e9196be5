//! svgrewire - Resource-query dispatch for bundler SVG module rules
//!
//! Rewrites a bundler's module-rule configuration so that `.svg` imports are
//! dispatched on their resource query instead of being swallowed by the
//! stock raster-image rules.
//!
//! # Architecture
//!
//! The type system mirrors the host bundler's rule protocol:
//!
//! - [`RuleTest`] — Path predicate with identity-by-source-text semantics
//! - [`LoaderRef`] — A named processing step plus its options mapping
//! - [`ModuleRule`] / [`RuleEffect`] — A rule entry: `use` chain or `oneOf` branches
//! - [`QueryRule`] — A `oneOf` branch gated by an optional resource-query predicate
//! - [`BuildConfig`] — The ordered rule list plus the build-target tag
//! - [`transform`] — The one-shot in-place rewrite
//!
//! # Key Design Insights
//!
//! 1. **Identity by text**: [`RuleTest`] equality compares pattern source
//!    text, never compiled-matcher identity. Recognizing "the same predicate
//!    constructed twice" is load-bearing for the rewrite.
//!
//! 2. **First-match-wins `oneOf`**: branch order is semantic. A branch with
//!    no resource-query predicate matches unconditionally and acts as the
//!    default, so it must come last.
//!
//! 3. **The rule shape is a foreign protocol**: serde shapes (`use`, `oneOf`,
//!    `resourceQuery`) follow the host bundler's JSON, not our taste.
//!
//! # Example
//!
//! ```
//! use svgrewire::{transform, BuildConfig, ModuleRule, RuleEffect, RuleTest, Request};
//!
//! let mut config = BuildConfig::new("client");
//! config.rules.push(ModuleRule {
//!     test: RuleTest::new(r"(?i)\.(png|jpe?g|gif|svg|webp)$").unwrap(),
//!     effect: RuleEffect::use_loader(svgrewire::LoaderRef::new("url-loader")),
//! });
//!
//! transform(&mut config).unwrap();
//!
//! // The stock rule no longer claims .svg; the appended composite rule does.
//! let spec = config.rules[1].select(&Request::parse("icon.svg?raw")).unwrap();
//! assert_eq!(spec.loaders()[0].loader, "raw-loader");
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod config;
mod loader;
mod request;
mod rule;
mod transform;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

pub use config::{BuildConfig, SERVER_TARGET};
pub use loader::LoaderRef;
pub use request::Request;
pub use rule::{ModuleRule, QueryRule, RuleEffect, UseSpec};
pub use rule_test::RuleTest;
pub use transform::{
    transform, BASELINE_TESTS, DATA_URI_LOADER, FILE_REF_LOADER, RAW_LOADER, REPLACEMENT_TESTS,
    SVG_COMPONENT_LOADER, SVG_RULE_TEST,
};

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from rule construction and the configuration rewrite.
///
/// Both are caught at configuration-construction time, never during the
/// build itself. There is no recovery path: fix the host configuration and
/// reconstruct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewireError {
    /// A rule claims the `.svg` extension but its predicate text is outside
    /// the known baseline/replacement sets. The configuration is left in an
    /// undefined intermediate state and the build must not proceed.
    UnrecognizedRule {
        /// Source text of the unexpected predicate.
        pattern: String,
    },
    /// A rule predicate failed to compile.
    InvalidPattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// The underlying error message.
        source: String,
    },
}

impl std::fmt::Display for RewireError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedRule { pattern } => {
                write!(
                    f,
                    "unexpected \".svg\" rule with test pattern \"{pattern}\" \
                     — the host configuration shape is not one this rewrite understands"
                )
            }
            Self::InvalidPattern { pattern, source } => {
                write!(f, "invalid test pattern \"{pattern}\": {source}")
            }
        }
    }
}

impl std::error::Error for RewireError {}
