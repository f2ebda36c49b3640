//! Popular and season destination forms.
//!
//! A popular destination owns its collections directly. A season destination
//! owns a list of places, each with the same collections; files picked for a
//! place's items go up under `places[<i>][<collection>Images]`.

use chrono::NaiveDate;
use serde_json::{json, Value};

use super::editor::{DraftItem, SubEntityEditor};
use super::package::FormMode;
use super::payload::{FormPayload, PendingFile};
use crate::api::{self, ApiClient};
use crate::errors::AppError;
use crate::models::{
    is_blank, ActiveStatus, Activity, Attraction, Destination, DestinationKind, EventFestival,
    FoodItem, Hotel, NearbyDestination, PlaceDetail,
};

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Month number (1-12) for a full or three-letter English month name.
pub fn month_number(name: &str) -> Option<u32> {
    let name = name.trim().to_lowercase();
    if name.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|m| *m == name || (name.len() == 3 && m.starts_with(&name)))
        .map(|i| i as u32 + 1)
}

/// First and last day of `month` in `year`; bounds the event date picker.
pub fn month_window(month: &str, year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let month = month_number(month)?;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}

/// The six collections both forms edit.
#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub attractions: SubEntityEditor<Attraction>,
    pub hotels: SubEntityEditor<Hotel>,
    pub food: SubEntityEditor<FoodItem>,
    pub activities: SubEntityEditor<Activity>,
    pub events: SubEntityEditor<EventFestival>,
    pub nearby: SubEntityEditor<NearbyDestination>,
}

impl Collections {
    fn from_saved(
        attractions: &[Attraction],
        hotels: &[Hotel],
        food: &[FoodItem],
        activities: &[Activity],
        events: &[EventFestival],
        nearby: &[NearbyDestination],
    ) -> Self {
        Self {
            attractions: SubEntityEditor::from_items(attractions.to_vec()),
            hotels: SubEntityEditor::from_items(hotels.to_vec()),
            food: SubEntityEditor::from_items(food.to_vec()),
            activities: SubEntityEditor::from_items(activities.to_vec()),
            events: SubEntityEditor::from_items(events.to_vec()),
            nearby: SubEntityEditor::from_items(nearby.to_vec()),
        }
    }

    fn json_fields(&self) -> Result<Vec<(&'static str, Value)>, AppError> {
        Ok(vec![
            (Attraction::JSON_FIELD, Value::Array(self.attractions.items_json()?)),
            (Hotel::JSON_FIELD, Value::Array(self.hotels.items_json()?)),
            (FoodItem::JSON_FIELD, Value::Array(self.food.items_json()?)),
            (Activity::JSON_FIELD, Value::Array(self.activities.items_json()?)),
            (EventFestival::JSON_FIELD, Value::Array(self.events.items_json()?)),
            (NearbyDestination::JSON_FIELD, Value::Array(self.nearby.items_json()?)),
        ])
    }

    fn write_into(&self, payload: &mut FormPayload) -> Result<(), AppError> {
        self.attractions.write_into(payload)?;
        self.hotels.write_into(payload)?;
        self.food.write_into(payload)?;
        self.activities.write_into(payload)?;
        self.events.write_into(payload)?;
        self.nearby.write_into(payload)?;
        Ok(())
    }

    fn append_files_prefixed(&self, payload: &mut FormPayload, prefix: &str) {
        let field = |image_field: &str| format!("{}[{}]", prefix, image_field);
        self.attractions
            .append_files_as(payload, &field(Attraction::IMAGE_FIELD));
        self.hotels.append_files_as(payload, &field(Hotel::IMAGE_FIELD));
        self.food.append_files_as(payload, &field(FoodItem::IMAGE_FIELD));
        self.activities
            .append_files_as(payload, &field(Activity::IMAGE_FIELD));
        self.events
            .append_files_as(payload, &field(EventFestival::IMAGE_FIELD));
        self.nearby
            .append_files_as(payload, &field(NearbyDestination::IMAGE_FIELD));
    }
}

/// Header fields shared by both destination shapes.
#[derive(Debug, Clone, Default)]
pub struct DestinationHeader {
    pub description: String,
    pub location: String,
    pub status: ActiveStatus,
    pub existing_images: Vec<String>,
    pub new_images: Vec<PendingFile>,
}

impl DestinationHeader {
    fn from_destination(d: &Destination) -> Self {
        Self {
            description: d.description.clone(),
            location: d.location.clone(),
            status: d.status,
            existing_images: d.images.clone(),
            new_images: Vec::new(),
        }
    }

    fn validate(&self) -> Result<(), AppError> {
        if is_blank(&self.description) {
            return Err(AppError::Validation("Description is required".to_string()));
        }
        if is_blank(&self.location) {
            return Err(AppError::Validation("Location is required".to_string()));
        }
        Ok(())
    }

    fn write_into(&self, payload: &mut FormPayload) -> Result<(), AppError> {
        payload
            .text("description", self.description.trim())
            .text("location", self.location.trim())
            .text("status", self.status.as_str());
        payload.json("existingImages", &self.existing_images)?;
        for file in &self.new_images {
            payload.file("images", file.clone());
        }
        Ok(())
    }
}

async fn save(
    api: &ApiClient,
    id: Option<&str>,
    payload: FormPayload,
) -> Result<Option<String>, AppError> {
    match id {
        Some(id) => api::update_destination(api, id, payload).await,
        None => api::create_destination(api, payload).await,
    }
}

#[derive(Debug, Clone, Default)]
pub struct PopularDestinationForm {
    pub id: Option<String>,
    pub name: String,
    pub header: DestinationHeader,
    pub collections: Collections,
}

impl PopularDestinationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_destination(d: &Destination) -> Self {
        Self {
            id: Some(d.id.clone()).filter(|id| !id.is_empty()),
            name: d.name.clone(),
            header: DestinationHeader::from_destination(d),
            collections: Collections::from_saved(
                &d.top_attractions,
                &d.hotels,
                &d.food_and_cuisine,
                &d.activities,
                &d.events_festivals,
                &d.nearby_destinations,
            ),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if is_blank(&self.name) {
            return Err(AppError::Validation("Name is required".to_string()));
        }
        self.header.validate()
    }

    pub fn to_payload(&self) -> Result<FormPayload, AppError> {
        let mut payload = FormPayload::new();
        payload
            .text("type", DestinationKind::Popular.as_str())
            .text("name", self.name.trim());
        self.header.write_into(&mut payload)?;
        self.collections.write_into(&mut payload)?;
        Ok(payload)
    }

    pub async fn submit(&self, api: &ApiClient) -> Result<Option<String>, AppError> {
        self.validate()?;
        save(api, self.id.as_deref(), self.to_payload()?).await
    }
}

/// One place of a season destination, edited like any other sub-entity.
#[derive(Debug, Clone, Default)]
pub struct SeasonPlace {
    pub place_name: String,
    pub description: String,
    pub image: Option<String>,
    pub collections: Collections,
}

impl SeasonPlace {
    fn from_detail(p: &PlaceDetail) -> Self {
        Self {
            place_name: p.place_name.clone(),
            description: p.description.clone(),
            image: p.image.clone(),
            collections: Collections::from_saved(
                &p.top_attractions,
                &p.hotels,
                &p.food_and_cuisine,
                &p.activities,
                &p.events_festivals,
                &p.nearby_destinations,
            ),
        }
    }
}

impl DraftItem for SeasonPlace {
    const LABEL: &'static str = "Place";
    const JSON_FIELD: &'static str = "placesDetails";
    const IMAGE_FIELD: &'static str = "placeImages";

    fn name(&self) -> &str {
        &self.place_name
    }

    fn to_json(&self) -> Result<Value, AppError> {
        let mut value = json!({
            "placeName": self.place_name.trim(),
            "description": self.description,
        });
        if let Value::Object(map) = &mut value {
            if let Some(image) = &self.image {
                map.insert("image".to_string(), Value::String(image.clone()));
            }
            for (field, items) in self.collections.json_fields()? {
                map.insert(field.to_string(), items);
            }
        }
        Ok(value)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SeasonDestinationForm {
    pub id: Option<String>,
    pub title: String,
    pub header: DestinationHeader,
    pub places: SubEntityEditor<SeasonPlace>,
}

impl SeasonDestinationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_destination(d: &Destination) -> Self {
        Self {
            id: Some(d.id.clone()).filter(|id| !id.is_empty()),
            title: d.display_name().to_string(),
            header: DestinationHeader::from_destination(d),
            places: SubEntityEditor::from_items(
                d.places_details.iter().map(SeasonPlace::from_detail).collect(),
            ),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if is_blank(&self.title) {
            return Err(AppError::Validation("Title is required".to_string()));
        }
        self.header.validate()
    }

    pub fn to_payload(&self) -> Result<FormPayload, AppError> {
        let mut payload = FormPayload::new();
        payload
            .text("type", DestinationKind::Season.as_str())
            .text("title", self.title.trim())
            .text("name", self.title.trim());
        self.header.write_into(&mut payload)?;
        self.places.write_into(&mut payload)?;
        for (i, place) in self.places.items().iter().enumerate() {
            place
                .collections
                .append_files_prefixed(&mut payload, &format!("places[{}]", i));
        }
        Ok(payload)
    }

    pub async fn submit(&self, api: &ApiClient) -> Result<Option<String>, AppError> {
        self.validate()?;
        save(api, self.id.as_deref(), self.to_payload()?).await
    }
}

/// Form for whichever shape `d` has.
#[derive(Debug, Clone)]
pub enum DestinationForm {
    Popular(PopularDestinationForm),
    Season(SeasonDestinationForm),
}

impl DestinationForm {
    /// Empty form of the given shape.
    pub fn blank(kind: DestinationKind) -> Self {
        match kind {
            DestinationKind::Popular => Self::Popular(PopularDestinationForm::new()),
            DestinationKind::Season => Self::Season(SeasonDestinationForm::new()),
        }
    }

    pub fn from_destination(d: &Destination) -> Self {
        match d.kind {
            DestinationKind::Popular => Self::Popular(PopularDestinationForm::from_destination(d)),
            DestinationKind::Season => Self::Season(SeasonDestinationForm::from_destination(d)),
        }
    }

    pub fn kind(&self) -> DestinationKind {
        match self {
            Self::Popular(_) => DestinationKind::Popular,
            Self::Season(_) => DestinationKind::Season,
        }
    }

    fn set_id(&mut self, id: Option<String>) {
        match self {
            Self::Popular(form) => form.id = id,
            Self::Season(form) => form.id = id,
        }
    }

    pub async fn submit(&self, api: &ApiClient) -> Result<Option<String>, AppError> {
        match self {
            Self::Popular(form) => form.submit(api).await,
            Self::Season(form) => form.submit(api).await,
        }
    }
}

/// A destination form opened on the create, edit or view route.
#[derive(Debug, Clone)]
pub struct DestinationPage {
    mode: FormMode,
    form: DestinationForm,
}

impl DestinationPage {
    pub fn new(mode: FormMode, mut form: DestinationForm) -> Self {
        form.set_id(mode.record_id().map(str::to_string));
        Self { mode, form }
    }

    /// Open the page. Edit and view routes re-fetch the destination so the
    /// form always starts from the stored record; `kind` only picks the
    /// shape of a new one.
    pub async fn load(
        api: &ApiClient,
        mode: FormMode,
        kind: DestinationKind,
    ) -> Result<Self, AppError> {
        let Some(id) = mode.record_id().map(str::to_string) else {
            return Ok(Self::new(mode, DestinationForm::blank(kind)));
        };
        let destination = api::get_destination(api, &id).await.map_err(|e| {
            tracing::error!("Failed to load destination {}: {}", id, e);
            e
        })?;
        let form = DestinationForm::from_destination(&destination);
        Ok(Self::new(mode, form))
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn form(&self) -> &DestinationForm {
        &self.form
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self.mode, FormMode::View(_))
    }

    /// Mutable access to the form; refused on the view route.
    pub fn form_mut(&mut self) -> Result<&mut DestinationForm, AppError> {
        if self.is_read_only() {
            return Err(AppError::Validation(
                "Destination is open read-only; switch to edit mode to change it".to_string(),
            ));
        }
        Ok(&mut self.form)
    }

    /// Validate and save: PUT on the edit route, add on the create route.
    pub async fn submit(&self, api: &ApiClient) -> Result<Option<String>, AppError> {
        if self.is_read_only() {
            return Err(AppError::Validation("Destination is open read-only".to_string()));
        }
        self.form.submit(api).await
    }
}
