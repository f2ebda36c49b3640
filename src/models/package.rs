//! Tour package model.

use serde::{Deserialize, Serialize};

use super::ActiveStatus;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PackageCategory {
    Adventure,
    Family,
    Honeymoon,
    Pilgrimage,
    Weekend,
    International,
    Group,
    #[serde(other)]
    Other,
}

impl PackageCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageCategory::Adventure => "adventure",
            PackageCategory::Family => "family",
            PackageCategory::Honeymoon => "honeymoon",
            PackageCategory::Pilgrimage => "pilgrimage",
            PackageCategory::Weekend => "weekend",
            PackageCategory::International => "international",
            PackageCategory::Group => "group",
            PackageCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    #[serde(default)]
    pub adult: f64,
    #[serde(default)]
    pub child: f64,
    #[serde(default)]
    pub infant: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "INR".to_string()
}

impl Default for Price {
    fn default() -> Self {
        Self {
            adult: 0.0,
            child: 0.0,
            infant: 0.0,
            currency: default_currency(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    #[serde(default)]
    pub percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
    pub day: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub activities: Vec<String>,
}

/// Budget line a caller can edit; `total` is always derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetField {
    Accommodation,
    Food,
    Activities,
    Transport,
    Miscellaneous,
}

/// Per-destination cost breakdown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    #[serde(default)]
    pub accommodation: f64,
    #[serde(default)]
    pub food: f64,
    #[serde(default)]
    pub activities: f64,
    #[serde(default)]
    pub transport: f64,
    #[serde(default)]
    pub miscellaneous: f64,
    #[serde(default)]
    pub total: f64,
}

impl Budget {
    /// Set one line and recompute the total from scratch.
    pub fn set(&mut self, field: BudgetField, value: f64) {
        let slot = match field {
            BudgetField::Accommodation => &mut self.accommodation,
            BudgetField::Food => &mut self.food,
            BudgetField::Activities => &mut self.activities,
            BudgetField::Transport => &mut self.transport,
            BudgetField::Miscellaneous => &mut self.miscellaneous,
        };
        *slot = value;
        self.recompute();
    }

    pub fn recompute(&mut self) {
        self.total = self.accommodation
            + self.food
            + self.activities
            + self.transport
            + self.miscellaneous;
    }
}

/// A destination selected into a package, with the places copied from it.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PackageDestination {
    #[serde(default)]
    pub destination_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub places: Vec<String>,
    #[serde(default)]
    pub budget: Budget,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomOption {
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationBlock {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub options: Vec<CustomOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomizationKind {
    CarRentals,
    Guides,
    ExtendedStays,
    MealPlans,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customization {
    #[serde(default)]
    pub car_rentals: CustomizationBlock,
    #[serde(default)]
    pub guides: CustomizationBlock,
    #[serde(default)]
    pub extended_stays: CustomizationBlock,
    #[serde(default)]
    pub meal_plans: CustomizationBlock,
}

impl Customization {
    pub fn block_mut(&mut self, kind: CustomizationKind) -> &mut CustomizationBlock {
        match kind {
            CustomizationKind::CarRentals => &mut self.car_rentals,
            CustomizationKind::Guides => &mut self.guides,
            CustomizationKind::ExtendedStays => &mut self.extended_stays,
            CustomizationKind::MealPlans => &mut self.meal_plans,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<PackageCategory>,
    #[serde(default)]
    pub price: Price,
    #[serde(default)]
    pub discount: Discount,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub inclusions: Vec<String>,
    #[serde(default)]
    pub exclusions: Vec<String>,
    #[serde(default)]
    pub itinerary: Vec<ItineraryDay>,
    #[serde(default)]
    pub selected_destinations: Vec<PackageDestination>,
    #[serde(default)]
    pub customization: Customization,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub status: ActiveStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}
