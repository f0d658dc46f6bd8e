//! Display preferences for values shown to the user.

use serde::{Deserialize, Serialize};

fn default_date_format() -> String {
    "%d %B %Y".to_string()
}

fn default_currency_prefix() -> String {
    "Rp.".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// `strftime` pattern for the last-updated stamp.
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default = "default_currency_prefix")]
    pub currency_prefix: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            currency_prefix: default_currency_prefix(),
        }
    }
}
