//! Sale terms such as warranty or invoice type.

use serde::{Deserialize, Serialize};

use crate::attribute::AttributeValue;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaleTerm {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<AttributeValue>,
}

impl SaleTerm {
    pub fn new(id: impl Into<String>, value_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value_name: Some(value_name.into()),
            ..Self::default()
        }
    }
}
