//! Tests for RuleRegistry

use crate::no_array_fill_with_reference_type::NAME;
use crate::{Rule, RuleContext, RuleRegistry, builtin_rules};
use fillcheck_common::Diagnostic;
use serde_json::Value;

struct DummyRule(&'static str);

impl Rule for DummyRule {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        self.0
    }

    fn validate_options(&self, _options: &Value) -> Result<(), serde_json::Error> {
        Ok(())
    }

    fn check(&self, _ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        Vec::new()
    }
}

#[test]
fn test_builtin_rules_contain_fill_rule() {
    let registry = builtin_rules();
    assert_eq!(registry.names().collect::<Vec<_>>(), vec![NAME]);
    assert!(registry.contains(NAME));
    assert!(!registry.contains("no-console"));
    assert!(registry.get("no-console").is_none());
}

#[test]
fn test_register_replaces_rule_with_same_name() {
    let mut registry = RuleRegistry::with_builtin_rules();
    registry.register(Box::new(DummyRule("replacement")));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get(NAME).map(|r| r.description()), Some("replacement"));
}

#[test]
fn test_empty_registry() {
    let registry = RuleRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.iter().count(), 0);
}
