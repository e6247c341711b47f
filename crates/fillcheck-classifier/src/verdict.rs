//! Classification result.

use serde::Serialize;

/// Whether an expression evaluates to a shared, mutable reference.
///
/// Value verdicts never carry a label.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub is_reference_type: bool,
    /// Display name for diagnostics: `Object`, `new Map()`, `variable (p)`...
    pub type_label: Option<String>,
}

impl Verdict {
    #[inline]
    pub fn value() -> Self {
        Verdict {
            is_reference_type: false,
            type_label: None,
        }
    }

    #[inline]
    pub fn reference(type_label: Option<String>) -> Self {
        Verdict {
            is_reference_type: true,
            type_label,
        }
    }

    /// The label as a message suffix: `" (Object)"`, or `""` without a label.
    pub fn label_suffix(&self) -> String {
        match &self.type_label {
            Some(label) if !label.is_empty() => format!(" ({label})"),
            _ => String::new(),
        }
    }
}
