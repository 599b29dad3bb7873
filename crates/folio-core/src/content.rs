//! Typed view over the well-known sections of a portfolio document.
//!
//! Every field is optional and every record keeps the fields it does not
//! know about in `extra`, so a document read through this view serializes
//! back to the same JSON. The view never gates writes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The whole portfolio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero: Option<Hero>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<About>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<Skill>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ventures: Option<Vec<Venture>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achievements: Option<Vec<Achievement>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socials: Option<Vec<Link>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct About {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Vec<Stat>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A skill card. `icon` names an icon in the renderer's icon set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A venture card plus its detail page.
///
/// `link` is the client-side route of the detail page, e.g. `/wrapify`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Venture {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<VentureDetails>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VentureDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An outbound link: social profile or venture link. `kind` selects the icon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::document::PortfolioDocument;

    #[test]
    fn builtin_parses_into_typed_view() {
        let content = PortfolioDocument::builtin().content().unwrap();
        assert_eq!(
            content.hero.as_ref().and_then(|h| h.name.as_deref()),
            Some("Mahdi Ashabil")
        );
        assert_eq!(content.about.unwrap().stats.unwrap().len(), 4);
        assert_eq!(content.skills.unwrap().len(), 4);
        assert_eq!(content.achievements.unwrap().len(), 3);
        assert_eq!(content.socials.unwrap()[0].kind.as_deref(), Some("Facebook"));
    }

    #[test]
    fn typed_view_roundtrips_builtin_exactly() {
        let doc = PortfolioDocument::builtin();
        let content = doc.content().unwrap();
        assert_eq!(&serde_json::to_value(&content).unwrap(), doc.as_value());
    }

    #[test]
    fn unknown_fields_pass_through() {
        let value = json!({
            "hero": {"name": "X", "pronouns": "they/them"},
            "theme": {"accent": "teal"},
            "ventures": [{"link": "/x", "links": [], "rank": 3}]
        });
        let content = PortfolioDocument::new(value.clone()).content().unwrap();
        assert_eq!(content.extra["theme"], json!({"accent": "teal"}));
        assert_eq!(serde_json::to_value(&content).unwrap(), value);
    }

    #[test]
    fn wrong_section_shape_is_malformed() {
        let doc = PortfolioDocument::new(json!({"ventures": "not a list"}));
        assert!(doc.content().is_err());
    }
}
