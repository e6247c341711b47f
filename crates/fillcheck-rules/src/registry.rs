//! Lookup of rules by configuration name.

use crate::no_array_fill_with_reference_type::NoArrayFillWithReferenceType;
use crate::rule::Rule;
use once_cell::sync::Lazy;

static BUILTIN_RULES: Lazy<RuleRegistry> = Lazy::new(RuleRegistry::with_builtin_rules);

/// The registry of rules shipped with fillcheck.
pub fn builtin_rules() -> &'static RuleRegistry {
    &BUILTIN_RULES
}

/// Rules in registration order.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        RuleRegistry { rules: Vec::new() }
    }

    pub fn with_builtin_rules() -> Self {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(NoArrayFillWithReferenceType));
        registry
    }

    /// Add a rule. A rule with the same name is replaced.
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        if let Some(slot) = self.rules.iter_mut().find(|r| r.name() == rule.name()) {
            *slot = rule;
        } else {
            self.rules.push(rule);
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|rule| rule.name() == name)
            .map(|rule| rule.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
