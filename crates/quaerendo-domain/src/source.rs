//! Source module - provenance of claims and evidence

use crate::id::integer_id;
use serde::{Deserialize, Serialize};

integer_id!(
    /// Server-assigned identifier of a source
    SourceId
);

integer_id!(
    /// Server-assigned identifier of an entity (an author or publisher)
    EntityId
);

/// An author or publisher credited on a source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier
    pub id: EntityId,

    /// Display name
    pub name: String,

    /// Short biography, empty when the server has none
    #[serde(default)]
    pub short_bio: String,
}

/// Provenance of a claim or a piece of evidence
///
/// Every text field may legitimately be empty. An empty `title` is rendered
/// with a fallback label, see [`crate::display::display_title`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Unique identifier (absent on sources embedded in a submission echo)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SourceId>,

    /// Title of the cited work
    #[serde(default)]
    pub title: String,

    /// Link to the cited work
    #[serde(default)]
    pub url: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Credited authors
    #[serde(default)]
    pub authors: Vec<Entity>,

    /// When the server recorded the source (ISO 8601, opaque to the client)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_retrieved: Option<String>,
}

impl Source {
    /// Author names joined for display, or "Unknown author" when none are credited
    pub fn author_names(&self) -> String {
        if self.authors.is_empty() {
            return "Unknown author".to_string();
        }
        self.authors
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The link, if one was recorded
    pub fn link(&self) -> Option<&str> {
        if self.url.is_empty() {
            None
        } else {
            Some(&self.url)
        }
    }
}

/// Source as submitted by the client; authors are referenced by id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSource {
    /// Title of the cited work
    pub title: String,

    /// Link to the cited work
    pub url: String,

    /// Free-form description
    pub description: String,

    /// Existing entities credited as authors
    pub authors: Vec<EntityId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: u64, name: &str) -> Entity {
        Entity {
            id: EntityId::new(id),
            name: name.to_string(),
            short_bio: String::new(),
        }
    }

    #[test]
    fn test_author_names() {
        let mut source = Source::default();
        assert_eq!(source.author_names(), "Unknown author");

        source.authors = vec![entity(1, "Ada Lovelace"), entity(2, "Charles Babbage")];
        assert_eq!(source.author_names(), "Ada Lovelace, Charles Babbage");
    }

    #[test]
    fn test_link() {
        let mut source = Source::default();
        assert_eq!(source.link(), None);

        source.url = "https://example.org/paper".to_string();
        assert_eq!(source.link(), Some("https://example.org/paper"));
    }

    #[test]
    fn test_sparse_source_payload() {
        // The server omits empty fields
        let source: Source = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(source.id, Some(SourceId::new(7)));
        assert_eq!(source.title, "");
        assert!(source.authors.is_empty());
    }

    #[test]
    fn test_source_with_authors_payload() {
        let json = r#"{
            "id": 3,
            "title": "On Computable Numbers",
            "url": "https://example.org/turing",
            "authors": [{"id": 11, "name": "Alan Turing", "short_bio": "Mathematician"}],
            "date_retrieved": "2020-06-26T02:35:00Z"
        }"#;

        let source: Source = serde_json::from_str(json).unwrap();
        assert_eq!(source.authors.len(), 1);
        assert_eq!(source.authors[0].id, EntityId::new(11));
        assert_eq!(source.author_names(), "Alan Turing");
        assert_eq!(source.date_retrieved.as_deref(), Some("2020-06-26T02:35:00Z"));
    }

    #[test]
    fn test_id_parse() {
        assert_eq!("42".parse::<SourceId>().unwrap(), SourceId::new(42));
        assert!("forty-two".parse::<SourceId>().is_err());
        assert!("-1".parse::<EntityId>().is_err());
        assert_eq!(EntityId::new(9).to_string(), "9");
    }
}
