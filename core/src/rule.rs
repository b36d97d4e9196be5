//! `ModuleRule` — A rule entry in the host bundler's ordered rule list
//!
//! A rule maps a path predicate to an effect: either a `use` specification
//! (one loader or an ordered chain) or a `oneOf` branch list dispatched on
//! the import's resource query, first match wins.
//!
//! The serde shapes here mirror the host bundler's JSON verbatim (`use`,
//! `oneOf`, `resourceQuery`); this crate consumes and emits that protocol,
//! it does not redesign it.

use crate::{LoaderRef, Request, RuleTest};
use serde::{Deserialize, Serialize};

/// A module-processing rule: path predicate plus effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleRule {
    /// Predicate evaluated against the import's path part.
    pub test: RuleTest,

    /// What happens when the predicate matches.
    #[serde(flatten)]
    pub effect: RuleEffect,
}

/// The effect half of a rule.
///
/// Untagged: the host shape distinguishes the variants by key (`oneOf` vs
/// `use`), not by a tag. `OneOf` is tried first because its key is the more
/// specific one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleEffect {
    /// Dispatch on the resource query: ordered branches, first match wins.
    OneOf {
        /// The branches, in evaluation order.
        #[serde(rename = "oneOf")]
        branches: Vec<QueryRule>,
    },
    /// Apply the use specification unconditionally.
    Use {
        /// One loader or an ordered chain.
        #[serde(rename = "use")]
        spec: UseSpec,
    },
}

impl RuleEffect {
    /// Shorthand for a single-loader `use` effect.
    #[must_use]
    pub fn use_loader(loader: LoaderRef) -> Self {
        Self::Use {
            spec: UseSpec::Loader(loader),
        }
    }

    /// Shorthand for a loader-chain `use` effect.
    #[must_use]
    pub fn use_chain(chain: Vec<LoaderRef>) -> Self {
        Self::Use {
            spec: UseSpec::Chain(chain),
        }
    }

    /// The direct use specification, if this effect is not a `oneOf`.
    #[must_use]
    pub fn use_spec(&self) -> Option<&UseSpec> {
        match self {
            Self::Use { spec } => Some(spec),
            Self::OneOf { .. } => None,
        }
    }
}

/// A `oneOf` branch: optional resource-query predicate plus use specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRule {
    /// Predicate evaluated against the import's resource query. A branch
    /// without one matches unconditionally and acts as the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_query: Option<RuleTest>,

    /// The branch's use specification.
    #[serde(rename = "use")]
    pub spec: UseSpec,
}

impl QueryRule {
    /// Does this branch accept the request?
    ///
    /// A branch with a resource-query predicate requires a query to be
    /// present and matching; a branch without one accepts everything.
    #[must_use]
    pub fn accepts(&self, request: &Request<'_>) -> bool {
        match &self.resource_query {
            Some(test) => request.query().is_some_and(|q| test.is_match(q)),
            None => true,
        }
    }
}

/// A use specification: one loader or an ordered chain.
///
/// Untagged to mirror the host shape, where a bare object and an array are
/// both legal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UseSpec {
    /// A single loader reference.
    Loader(LoaderRef),
    /// An ordered loader chain.
    Chain(Vec<LoaderRef>),
}

impl UseSpec {
    /// View the specification as an ordered loader slice.
    #[must_use]
    pub fn loaders(&self) -> &[LoaderRef] {
        match self {
            Self::Loader(loader) => std::slice::from_ref(loader),
            Self::Chain(chain) => chain,
        }
    }
}

impl ModuleRule {
    /// Evaluate this rule against a request with the host bundler's
    /// semantics: `test` against the path, then for a `oneOf` the branches
    /// in order, first match wins.
    ///
    /// Returns the selected use specification, or `None` when the rule does
    /// not apply to the request.
    #[must_use]
    pub fn select<'a>(&'a self, request: &Request<'_>) -> Option<&'a UseSpec> {
        if !self.test.is_match(request.path()) {
            return None;
        }
        match &self.effect {
            RuleEffect::Use { spec } => Some(spec),
            RuleEffect::OneOf { branches } => branches
                .iter()
                .find(|branch| branch.accepts(request))
                .map(|branch| &branch.spec),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn query_rule(query: Option<&str>, loader: &str) -> QueryRule {
        QueryRule {
            resource_query: query.map(|q| RuleTest::new(q).unwrap()),
            spec: UseSpec::Loader(LoaderRef::new(loader)),
        }
    }

    #[test]
    fn select_requires_path_match() {
        let rule = ModuleRule {
            test: RuleTest::new(r"(?i)\.svg$").unwrap(),
            effect: RuleEffect::use_loader(LoaderRef::new("file-loader")),
        };

        assert!(rule.select(&Request::parse("a.svg")).is_some());
        assert!(rule.select(&Request::parse("a.png")).is_none());
    }

    #[test]
    fn one_of_first_match_wins() {
        let rule = ModuleRule {
            test: RuleTest::new(r"(?i)\.svg$").unwrap(),
            effect: RuleEffect::OneOf {
                branches: vec![
                    query_rule(Some("inline"), "first"),
                    query_rule(Some("inline"), "second"), // also matches, never reached
                    query_rule(None, "default"),
                ],
            },
        };

        let spec = rule.select(&Request::parse("a.svg?inline")).unwrap();
        assert_eq!(spec.loaders()[0].loader, "first");
    }

    #[test]
    fn one_of_falls_through_to_default() {
        let rule = ModuleRule {
            test: RuleTest::new(r"(?i)\.svg$").unwrap(),
            effect: RuleEffect::OneOf {
                branches: vec![
                    query_rule(Some("inline"), "inline-loader"),
                    query_rule(None, "default-loader"),
                ],
            },
        };

        let spec = rule.select(&Request::parse("a.svg")).unwrap();
        assert_eq!(spec.loaders()[0].loader, "default-loader");
    }

    #[test]
    fn one_of_without_default_can_miss() {
        let rule = ModuleRule {
            test: RuleTest::new(r"(?i)\.svg$").unwrap(),
            effect: RuleEffect::OneOf {
                branches: vec![query_rule(Some("inline"), "inline-loader")],
            },
        };

        assert!(rule.select(&Request::parse("a.svg?data")).is_none());
        assert!(rule.select(&Request::parse("a.svg")).is_none());
    }

    #[test]
    fn query_predicate_needs_a_query() {
        let branch = query_rule(Some("inline"), "x");
        assert!(branch.accepts(&Request::parse("a.svg?inline")));
        assert!(!branch.accepts(&Request::parse("a.svg")));
    }

    #[test]
    fn use_spec_loaders_view() {
        let single = UseSpec::Loader(LoaderRef::new("a"));
        assert_eq!(single.loaders().len(), 1);

        let chain = UseSpec::Chain(vec![LoaderRef::new("a"), LoaderRef::new("b")]);
        assert_eq!(chain.loaders().len(), 2);
        assert_eq!(chain.loaders().last().unwrap().loader, "b");
    }

    #[test]
    fn serde_matches_host_shape() {
        let rule = ModuleRule {
            test: RuleTest::new(r"(?i)\.svg$").unwrap(),
            effect: RuleEffect::OneOf {
                branches: vec![
                    query_rule(Some("inline"), "vue-svg-loader"),
                    query_rule(None, "file-loader"),
                ],
            },
        };

        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            value,
            json!({
                "test": r"(?i)\.svg$",
                "oneOf": [
                    { "resourceQuery": "inline", "use": { "loader": "vue-svg-loader" } },
                    { "use": { "loader": "file-loader" } },
                ],
            })
        );

        let back: ModuleRule = serde_json::from_value(value).unwrap();
        assert_eq!(back, rule);
    }

    #[test]
    fn serde_accepts_chain_and_single_use() {
        let single: ModuleRule = serde_json::from_value(json!({
            "test": r"\.jsx$",
            "use": { "loader": "babel-loader" },
        }))
        .unwrap();
        assert!(matches!(
            single.effect,
            RuleEffect::Use { spec: UseSpec::Loader(_) }
        ));

        let chain: ModuleRule = serde_json::from_value(json!({
            "test": r"\.jsx$",
            "use": [{ "loader": "cache-loader" }, { "loader": "babel-loader" }],
        }))
        .unwrap();
        assert!(matches!(
            chain.effect,
            RuleEffect::Use { spec: UseSpec::Chain(_) }
        ));
    }
}
