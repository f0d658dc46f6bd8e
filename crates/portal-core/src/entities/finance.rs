use serde::{Deserialize, Serialize};

use super::amount;

/// An outstanding billing line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinanceCharge {
    #[serde(rename = "DUE_DT")]
    pub due_date: String,
    #[serde(rename = "DESCR", default)]
    pub description: String,
    #[serde(rename = "ITEM_TYPE", default)]
    pub item_type: Option<String>,
    #[serde(rename = "ITEM_TERM", default)]
    pub term: Option<String>,
    #[serde(rename = "ITEM_AMT", deserialize_with = "amount")]
    pub amount: f64,
}
