//! Location-scouting media.

use serde::{Deserialize, Serialize};

use super::fields::{blank_as_none, null_as_default};
use crate::ids::new_id;

/// Category assigned when none is given; matches rows written before
/// categories existed.
pub const DEFAULT_SCOUTING_CATEGORY: &str = "Autres";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "video" => MediaType::Video,
            _ => MediaType::Image,
        }
    }
}

fn default_category() -> String {
    DEFAULT_SCOUTING_CATEGORY.to_string()
}

fn category_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(blank_as_none(deserializer)?.unwrap_or_else(default_category))
}

/// A scouting photo or clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoutingMedia {
    pub id: String,
    /// Data URL or base64 payload, stored as text
    pub image_data: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub scene_number: Option<String>,
    #[serde(default = "default_category", deserialize_with = "category_or_default")]
    pub category: String,
    #[serde(default)]
    pub media_type: MediaType,
    pub upload_date: String,
    /// Manual position, independent of upload time
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_order: i64,
}

/// User input for a new media item.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewMedia {
    pub image_data: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub scene_number: Option<String>,
    pub category: Option<String>,
    pub media_type: MediaType,
}

impl ScoutingMedia {
    pub fn create(input: NewMedia, upload_date: String, display_order: i64) -> Self {
        Self {
            id: new_id(),
            image_data: input.image_data,
            location: input.location,
            description: input.description,
            scene_number: input.scene_number,
            category: input
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(default_category),
            media_type: input.media_type,
            upload_date,
            display_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_legacy_rows() {
        let media: ScoutingMedia = serde_json::from_value(json!({
            "id": "p1",
            "imageData": "data:image/jpeg;base64,AAAA",
            "location": "",
            "category": null,
            "uploadDate": "2026-01-02T10:00:00Z",
            "displayOrder": null
        }))
        .unwrap();
        assert_eq!(media.category, DEFAULT_SCOUTING_CATEGORY);
        assert_eq!(media.media_type, MediaType::Image);
        assert_eq!(media.display_order, 0);
        assert!(media.location.is_none());
    }

    #[test]
    fn blank_category_falls_back() {
        let media = ScoutingMedia::create(
            NewMedia {
                image_data: "x".into(),
                category: Some("  ".into()),
                ..NewMedia::default()
            },
            "2026-01-02T10:00:00Z".into(),
            3,
        );
        assert_eq!(media.category, DEFAULT_SCOUTING_CATEGORY);
        assert_eq!(media.display_order, 3);
    }
}
