//! Rule document builder
//!
//! Turns the preprocessed domain list into the declarative rule
//! document the host's request-filtering layer loads. Compilation is a
//! pure function of the list: same input, byte-identical output.
//!
//! The canonical document shape is the wrapped object
//! `{ "version": 1, "rules": [...] }` for both the empty and non-empty
//! cases. An empty `rules` array is the explicit "no rules" marker,
//! not an error.

use serde::{Deserialize, Serialize};

use bo_core::types::{ResourceType, RuleAction, BLOCKED_RESOURCE_TYPES};

/// Rule document schema version.
pub const RULE_SCHEMA_VERSION: u32 = 1;

/// Priority assigned to every compiled rule. All rules rank equal;
/// conflict resolution beyond this is out of scope.
pub const RULE_PRIORITY: u32 = 1;

/// Matching condition for one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleCondition {
    /// Wildcard-wrapped domain: `*<domain>*`
    pub url_filter: String,
    pub resource_types: Vec<ResourceType>,
}

/// One compiled blocking directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// 1-based position of the domain in the filtered input list
    pub id: u32,
    pub priority: u32,
    pub action: RuleAction,
    pub condition: RuleCondition,
}

/// The full compiled rule document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDocument {
    pub version: u32,
    pub rules: Vec<Rule>,
}

impl RuleDocument {
    /// True when compilation produced the explicit empty marker.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Serialize to the canonical pretty-printed JSON form.
    pub fn to_json_bytes(&self) -> Vec<u8> {
        // Plain derived structs with string/integer fields cannot fail
        // to serialize.
        serde_json::to_vec_pretty(self).expect("rule document serializes")
    }
}

/// Build the rule document for an already-filtered domain list.
pub fn build_rule_document<S: AsRef<str>>(domains: &[S]) -> RuleDocument {
    let rules = domains
        .iter()
        .enumerate()
        .map(|(index, domain)| Rule {
            id: index as u32 + 1,
            priority: RULE_PRIORITY,
            action: RuleAction::block(),
            condition: RuleCondition {
                url_filter: format!("*{}*", domain.as_ref()),
                resource_types: BLOCKED_RESOURCE_TYPES.to_vec(),
            },
        })
        .collect();

    RuleDocument {
        version: RULE_SCHEMA_VERSION,
        rules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_one_based_positions() {
        let doc = build_rule_document(&["bet365.com", "betway.com", "unibet.com"]);
        let ids: Vec<u32> = doc.rules.iter().map(|r| r.id).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[test]
    fn test_rule_shape() {
        let doc = build_rule_document(&["bet365.com"]);
        let rule = &doc.rules[0];
        assert_eq!(rule.priority, 1);
        assert_eq!(rule.action, RuleAction::block());
        assert_eq!(rule.condition.url_filter, "*bet365.com*");
        assert_eq!(rule.condition.resource_types, BLOCKED_RESOURCE_TYPES);
    }

    #[test]
    fn test_empty_marker() {
        let doc = build_rule_document::<&str>(&[]);
        assert!(doc.is_empty());
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json, serde_json::json!({ "version": 1, "rules": [] }));
    }

    #[test]
    fn test_document_json_layout() {
        let doc = build_rule_document(&["bet365.com"]);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "version": 1,
                "rules": [{
                    "id": 1,
                    "priority": 1,
                    "action": { "type": "block" },
                    "condition": {
                        "urlFilter": "*bet365.com*",
                        "resourceTypes": [
                            "main_frame",
                            "sub_frame",
                            "image",
                            "script",
                            "xmlhttprequest"
                        ]
                    }
                }]
            })
        );
    }

    #[test]
    fn test_json_round_trip() {
        let doc = build_rule_document(&["bet365.com", "betway.com"]);
        let parsed: RuleDocument = serde_json::from_slice(&doc.to_json_bytes()).unwrap();
        assert_eq!(parsed, doc);
    }
}
