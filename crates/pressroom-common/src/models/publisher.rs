//! Publisher (tenant) documents and the contact categories readers can write to.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Extra;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publisher {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_us: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A contact category as stored by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactCat {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub cat_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    /// Addresses messages in this category are forwarded to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to_email: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Payload for creating a contact category. Only the name is mandatory.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewContactCat {
    #[validate(length(min = 1, message = "catName is required"))]
    pub cat_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub to_email: Vec<String>,
}

/// A reader's message, as echoed back by `POST /publishers/{pid}/contacts`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}
