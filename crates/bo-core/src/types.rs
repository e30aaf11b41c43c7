//! Shared rule vocabulary for BetsOff
//!
//! These types define the declarative rule document consumed by the
//! host's request-filtering layer. Serde names are frozen: the host
//! matches them verbatim against its rule schema.

use serde::{Deserialize, Serialize};

/// Action kind for a matched rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleActionType {
    /// Cancel the request
    Block,
}

/// Action record as it appears in the rule document:
/// `{ "type": "block" }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleAction {
    #[serde(rename = "type")]
    pub kind: RuleActionType,
}

impl RuleAction {
    pub const fn block() -> Self {
        Self {
            kind: RuleActionType::Block,
        }
    }
}

/// Resource types a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// Top-level document navigation
    MainFrame,
    /// Nested frame (iframe)
    SubFrame,
    Image,
    Script,
    /// XHR / fetch-style requests
    Xmlhttprequest,
}

/// The fixed resource-type scope every compiled block rule carries.
pub const BLOCKED_RESOURCE_TYPES: [ResourceType; 5] = [
    ResourceType::MainFrame,
    ResourceType::SubFrame,
    ResourceType::Image,
    ResourceType::Script,
    ResourceType::Xmlhttprequest,
];
