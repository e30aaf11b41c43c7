//! BetsOff Domain-List Compiler
//!
//! This crate compiles a flat gambling-domain list into the
//! declarative rule document consumed by the host's request-filtering
//! layer. Compilation is stateless and single-pass: it never performs
//! I/O of its own and is deterministic for a given input.

pub mod builder;
pub mod parser;

pub use builder::{
    build_rule_document, Rule, RuleCondition, RuleDocument, RULE_PRIORITY, RULE_SCHEMA_VERSION,
};
pub use parser::parse_domain_list;

/// Error type for the compilation pipeline.
///
/// `SourceUnreadable` is only ever produced at the loader seam: the
/// caller that fetches the domain list wraps its failure here. The
/// compiler itself is total over an in-memory list.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("domain list source unreadable: {0}")]
    SourceUnreadable(#[from] std::io::Error),
}

/// Compile raw domain-list text into the rule document.
///
/// Preprocessing drops blank and `#`-comment lines; each surviving
/// domain becomes one block rule with its 1-based position as the rule
/// ID. An input with no surviving domains compiles to the explicit
/// empty document.
pub fn compile_rules(text: &str) -> RuleDocument {
    let domains = parse_domain_list(text);
    let document = build_rule_document(&domains);
    log::debug!(
        "compiled {} rules from {} input lines",
        document.rules.len(),
        text.lines().count()
    );
    document
}
