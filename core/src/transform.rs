//! The configuration rewrite: neutralize stock `.svg` claims, append the
//! resource-query dispatch rule
//!
//! One deterministic pass over the rule list, run exactly once per build
//! configuration, before any compilation work begins. Success is silent;
//! the only failure is [`RewireError::UnrecognizedRule`], which aborts
//! configuration construction.

use crate::{
    BuildConfig, LoaderRef, ModuleRule, QueryRule, RewireError, RuleEffect, RuleTest, UseSpec,
};

/// The stock raster-image predicates that also claim `.svg`, as shipped by
/// the host bundler: one for the base raster family, one for the family
/// plus AVIF. Recognition is by literal pattern text.
pub const BASELINE_TESTS: [&str; 2] = [
    r"(?i)\.(png|jpe?g|gif|svg|webp)$",
    r"(?i)\.(png|jpe?g|gif|svg|webp|avif)$",
];

/// The same two families with `svg` removed, index-aligned with
/// [`BASELINE_TESTS`].
pub const REPLACEMENT_TESTS: [&str; 2] = [
    r"(?i)\.(png|jpe?g|gif|webp)$",
    r"(?i)\.(png|jpe?g|gif|webp|avif)$",
];

/// Predicate of the appended composite rule.
pub const SVG_RULE_TEST: &str = r"(?i)\.svg$";

/// Loader that compiles an SVG into a renderable component.
pub const SVG_COMPONENT_LOADER: &str = "vue-svg-loader";

/// Loader that inlines the asset as a data URI.
pub const DATA_URI_LOADER: &str = "url-loader";

/// Loader that passes the asset through as raw text.
pub const RAW_LOADER: &str = "raw-loader";

/// Loader that emits a file reference. The composite rule's default branch.
pub const FILE_REF_LOADER: &str = "file-loader";

/// Representative paths used to probe existing rules.
const SVG_PROBE: &str = ".svg";
const JSX_PROBE: &str = ".jsx";

/// Rewrite `config.rules` in place.
///
/// 1. Every rule whose `test` matches `".svg"` is reconciled against
///    [`BASELINE_TESTS`]: a baseline hit is replaced by the same-index entry
///    of [`REPLACEMENT_TESTS`]; an already-replaced predicate is left alone
///    so a partially migrated configuration reconciles cleanly. Anything
///    else fails with [`RewireError::UnrecognizedRule`].
/// 2. A composite `oneOf` rule for `.svg` is appended, dispatching on the
///    resource query: `?inline` builds a component (prefixed with the JSX
///    rule's transpile loader on non-server targets), `?data` a data URI,
///    `?raw` raw text, and the default branch a file reference.
///
/// # Errors
///
/// [`RewireError::UnrecognizedRule`] when a rule claims `.svg` with a
/// predicate outside both lookup tables. The configuration is then in an
/// undefined intermediate state and must be discarded. Note this includes
/// an already-transformed configuration: the appended composite rule itself
/// claims `.svg` with an unlisted predicate, so a second invocation fails
/// rather than silently stacking rules.
pub fn transform(config: &mut BuildConfig) -> Result<(), RewireError> {
    reconcile_stock_rules(&mut config.rules)?;

    let inline_chain = inline_chain(config);
    config.rules.push(composite_rule(inline_chain)?);
    Ok(())
}

/// Strip the `.svg` claim from every stock rule that carries one.
///
/// Matching zero rules is not an error; it just means no prior rule claimed
/// the extension.
fn reconcile_stock_rules(rules: &mut [ModuleRule]) -> Result<(), RewireError> {
    for rule in rules.iter_mut() {
        if !rule.test.is_match(SVG_PROBE) {
            continue;
        }

        let source = rule.test.source();
        if let Some(idx) = BASELINE_TESTS.iter().position(|t| *t == source) {
            rule.test = RuleTest::new(REPLACEMENT_TESTS[idx])?;
        } else if !REPLACEMENT_TESTS.contains(&source) {
            return Err(RewireError::UnrecognizedRule {
                pattern: source.to_owned(),
            });
        }
        // Replacement hit: already migrated, nothing to do.
    }
    Ok(())
}

/// Assemble the loader chain for the `?inline` branch.
///
/// Client-side targets run the component output through the same transpile
/// step as ordinary JSX, so the chain borrows the LAST loader of the JSX
/// rule's `use` list. The server bundle, and any configuration without a
/// JSX rule, gets the component loader alone.
fn inline_chain(config: &BuildConfig) -> Vec<LoaderRef> {
    let mut chain = Vec::with_capacity(2);

    if !config.is_server_target() {
        let transpiler = config
            .rules
            .iter()
            .find(|rule| rule.test.is_match(JSX_PROBE))
            .and_then(|rule| rule.effect.use_spec())
            .and_then(|spec| spec.loaders().last());
        if let Some(loader) = transpiler {
            chain.push(loader.clone());
        }
    }

    // The component loader's own optimizer stays off: optimization belongs
    // to the asset pipeline, not the import path.
    chain.push(LoaderRef::new(SVG_COMPONENT_LOADER).with_option("svgo", false));
    chain
}

/// Build the composite `.svg` rule. Branch order is semantic: the
/// query-gated branches first, the unconditional file-reference branch last.
fn composite_rule(inline_chain: Vec<LoaderRef>) -> Result<ModuleRule, RewireError> {
    let branch = |query: &str, spec: UseSpec| -> Result<QueryRule, RewireError> {
        Ok(QueryRule {
            resource_query: Some(RuleTest::new(query)?),
            spec,
        })
    };
    let wrapper_off = |name: &str| LoaderRef::new(name).with_option("esModule", false);

    Ok(ModuleRule {
        test: RuleTest::new(SVG_RULE_TEST)?,
        effect: RuleEffect::OneOf {
            branches: vec![
                branch("inline", UseSpec::Chain(inline_chain))?,
                branch("data", UseSpec::Loader(wrapper_off(DATA_URI_LOADER)))?,
                branch("raw", UseSpec::Loader(wrapper_off(RAW_LOADER)))?,
                QueryRule {
                    resource_query: None,
                    spec: UseSpec::Loader(wrapper_off(FILE_REF_LOADER)),
                },
            ],
        },
    })
}
