//! Destination model.
//!
//! Two shapes share the `type` discriminator. A `popular` destination carries
//! its collections directly; a `season` destination nests them per named
//! place under `placesDetails`.

use serde::{Deserialize, Serialize};

use super::ActiveStatus;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DestinationKind {
    #[default]
    Popular,
    Season,
}

impl DestinationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DestinationKind::Popular => "popular",
            DestinationKind::Season => "season",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "popular" => Some(DestinationKind::Popular),
            "season" => Some(DestinationKind::Season),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attraction {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum FoodType {
    #[default]
    #[serde(rename = "veg")]
    Veg,
    #[serde(rename = "non-veg", alias = "nonveg", alias = "nonVeg")]
    NonVeg,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "type")]
    pub food_type: FoodType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Event or festival; `month` drives the date-range picker window.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventFestival {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NearbyDestination {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// One named place inside a season destination.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetail {
    pub place_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub top_attractions: Vec<Attraction>,
    #[serde(default)]
    pub hotels: Vec<Hotel>,
    #[serde(default)]
    pub food_and_cuisine: Vec<FoodItem>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub events_festivals: Vec<EventFestival>,
    #[serde(default)]
    pub nearby_destinations: Vec<NearbyDestination>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: DestinationKind,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub top_attractions: Vec<Attraction>,
    #[serde(default)]
    pub hotels: Vec<Hotel>,
    #[serde(default)]
    pub food_and_cuisine: Vec<FoodItem>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub events_festivals: Vec<EventFestival>,
    #[serde(default)]
    pub nearby_destinations: Vec<NearbyDestination>,
    #[serde(default)]
    pub places_details: Vec<PlaceDetail>,
    #[serde(default)]
    pub status: ActiveStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Destination {
    /// Label shown on cards: the season title when set, otherwise the name.
    pub fn display_name(&self) -> &str {
        match &self.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => &self.name,
        }
    }

    /// Visitable places: every `placesDetails` entry for nested
    /// destinations, otherwise the destination's own name.
    pub fn places(&self) -> Vec<String> {
        if self.places_details.is_empty() {
            let own = self.display_name().trim();
            if own.is_empty() {
                Vec::new()
            } else {
                vec![own.to_string()]
            }
        } else {
            self.places_details
                .iter()
                .map(|p| p.place_name.clone())
                .filter(|name| !name.trim().is_empty())
                .collect()
        }
    }
}
