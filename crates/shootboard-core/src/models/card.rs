//! Card Entity
//!
//! A schedulable task pinned to exactly one calendar day of the board.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::fields::{blank_as_none, null_as_default};
use crate::ids::new_id;

/// Title given to freshly added cards.
pub const NEW_CARD_TITLE: &str = "New task";

/// Card category determines the card's color on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum CardCategory {
    Shooting,
    Catering,
    Travel,
    Meeting,
    Red,
    Orange,
    Pink,
    Indigo,
    Teal,
    #[default]
    Other,
}

impl CardCategory {
    pub const ALL: [CardCategory; 10] = [
        CardCategory::Shooting,
        CardCategory::Catering,
        CardCategory::Travel,
        CardCategory::Meeting,
        CardCategory::Red,
        CardCategory::Orange,
        CardCategory::Pink,
        CardCategory::Indigo,
        CardCategory::Teal,
        CardCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CardCategory::Shooting => "shooting",
            CardCategory::Catering => "catering",
            CardCategory::Travel => "travel",
            CardCategory::Meeting => "meeting",
            CardCategory::Red => "red",
            CardCategory::Orange => "orange",
            CardCategory::Pink => "pink",
            CardCategory::Indigo => "indigo",
            CardCategory::Teal => "teal",
            CardCategory::Other => "other",
        }
    }

    /// Unknown names map to `Other`.
    pub fn from_str(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .unwrap_or_default()
    }
}

impl From<String> for CardCategory {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

/// A task on the planning board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Client-generated, never changes
    pub id: String,
    /// Day the card belongs to; the only grouping key for columns
    pub date: NaiveDate,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Optional `HH:MM`
    #[serde(default, deserialize_with = "blank_as_none")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub map_url: Option<String>,
    #[serde(default)]
    pub category: CardCategory,
}

impl Card {
    /// Create a card with default content on `date`
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: new_id(),
            date,
            title: NEW_CARD_TITLE.to_string(),
            description: String::new(),
            time: None,
            map_url: None,
            category: CardCategory::Other,
        }
    }

    /// Same card on another day; every other field is carried over.
    pub fn moved_to(&self, date: NaiveDate) -> Self {
        Self {
            date,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    #[test]
    fn test_card_creation() {
        let card = Card::new(day(5));
        assert_eq!(card.date, day(5));
        assert_eq!(card.title, NEW_CARD_TITLE);
        assert_eq!(card.category, CardCategory::Other);
        assert!(card.time.is_none());
        assert!(!card.id.is_empty());
    }

    #[test]
    fn test_moved_to_keeps_other_fields() {
        let mut card = Card::new(day(5));
        card.description = "Rooftop, bring reflectors".to_string();
        card.time = Some("07:30".to_string());
        card.category = CardCategory::Shooting;

        let moved = card.moved_to(day(6));
        assert_eq!(moved.date, day(6));
        assert_eq!(Card { date: day(5), ..moved }, card);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let mut card = Card::new(day(7));
        card.map_url = Some("https://maps.example/x".to_string());
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["date"], "2026-01-07");
        assert_eq!(value["mapUrl"], "https://maps.example/x");
        assert_eq!(value["category"], "other");
    }

    #[test]
    fn test_lenient_decoding() {
        let card: Card = serde_json::from_value(json!({
            "id": "1700000000000-abc",
            "date": "2026-01-05",
            "title": "Catering",
            "description": null,
            "time": "",
            "mapUrl": null,
            "category": "purple"
        }))
        .unwrap();
        assert_eq!(card.description, "");
        assert!(card.time.is_none());
        assert!(card.map_url.is_none());
        assert_eq!(card.category, CardCategory::Other);
    }

    #[test]
    fn test_category_round_trip() {
        for category in CardCategory::ALL {
            assert_eq!(CardCategory::from_str(category.as_str()), category);
        }
    }
}
