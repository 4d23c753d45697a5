//! Class names used by form views.

use serde::{Deserialize, Serialize};

/// Class names for `FormGroup` markup. The default is the Bootstrap
/// horizontal-form layout; load a JSON file to restyle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormStyle {
    pub group: String,
    pub error: String,
    pub control: String,
    pub label: String,
    pub field_column: String,
    pub help_column: String,
    pub help_block: String,
    pub form: String,
}

impl Default for FormStyle {
    fn default() -> Self {
        Self {
            group: "form-group".to_string(),
            error: "has-error".to_string(),
            control: "form-control".to_string(),
            label: "col-md-2 control-label".to_string(),
            field_column: "col-md-7".to_string(),
            help_column: "col-md-3".to_string(),
            help_block: "help-block".to_string(),
            form: "form-horizontal".to_string(),
        }
    }
}
