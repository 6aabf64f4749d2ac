//! Columns: the sections a publisher organises stories under.

use serde::{Deserialize, Serialize};

use super::Extra;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// Parent column id for nested sections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// 1 = published, 0 = hidden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,

    #[serde(flatten)]
    pub extra: Extra,
}
