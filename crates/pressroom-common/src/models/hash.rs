//! Attribution hash records.

use serde::{Deserialize, Serialize};

use super::{Extra, Story};

/// What the backend stores for an attribution hash. `story` is the plain id on
/// create and may come back populated on check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HashRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story: Option<StoryRef>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoryRef {
    Id(String),
    Document(Story),
}

impl HashRecord {
    /// Story id the hash was registered against, whichever shape it came in.
    pub fn story_id(&self) -> Option<&str> {
        match self.story.as_ref()? {
            StoryRef::Id(id) => Some(id.as_str()),
            StoryRef::Document(story) if !story.id.is_empty() => Some(story.id.as_str()),
            StoryRef::Document(_) => None,
        }
    }
}

/// `POST /publishers/{pid}/hashes` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHash {
    pub hash: String,
    pub story: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn story_id_reads_plain_and_populated_refs() {
        let plain: HashRecord = serde_json::from_value(json!({ "hash": "h1", "story": "s1" })).unwrap();
        assert_eq!(plain.story_id(), Some("s1"));

        let populated: HashRecord =
            serde_json::from_value(json!({ "hash": "h1", "story": { "_id": "s2", "title": "T" } })).unwrap();
        assert_eq!(populated.story_id(), Some("s2"));

        let none: HashRecord = serde_json::from_value(json!({ "hash": "h1", "story": null })).unwrap();
        assert_eq!(none.story_id(), None);
    }
}
