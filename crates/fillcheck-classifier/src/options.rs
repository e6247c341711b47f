//! Classifier options, as written in a rule's configuration entry.

use serde::{Deserialize, Serialize};

/// Toggles that downgrade reference-shaped constructs to "safe to share".
///
/// ```json
/// { "canFillWithFunction": false, "canFillWithRegexp": true }
/// ```
///
/// Missing keys take their defaults; unknown keys are rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ClassifierOptions {
    /// Treat function and arrow function expressions as value types.
    pub can_fill_with_function: bool,
    /// Treat regex literals and `new RegExp(...)` as value types.
    pub can_fill_with_regexp: bool,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        ClassifierOptions {
            can_fill_with_function: true,
            can_fill_with_regexp: true,
        }
    }
}

impl ClassifierOptions {
    /// Every reference-shaped construct is reported.
    pub const STRICT: ClassifierOptions = ClassifierOptions {
        can_fill_with_function: false,
        can_fill_with_regexp: false,
    };
}
