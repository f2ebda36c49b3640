//! Package create/edit/view form.

use crate::api::{self, ApiClient};
use crate::errors::AppError;
use crate::models::{
    is_blank, BudgetField, CustomOption, CustomizationKind, Destination, ItineraryDay, Package,
    PackageDestination,
};

use super::payload::{FormPayload, PendingFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(String),
    View(String),
}

impl FormMode {
    /// Id of the record behind an edit or view route.
    pub fn record_id(&self) -> Option<&str> {
        match self {
            FormMode::Create => None,
            FormMode::Edit(id) | FormMode::View(id) => Some(id),
        }
    }
}

/// Simple string lists on a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextList {
    Highlights,
    Inclusions,
    Exclusions,
}

#[derive(Debug, Clone)]
pub struct PackageForm {
    mode: FormMode,
    package: Package,
    catalogue: Vec<Destination>,
    new_images: Vec<PendingFile>,
}

impl PackageForm {
    /// Empty form in create mode.
    pub fn create(catalogue: Vec<Destination>) -> Self {
        Self {
            mode: FormMode::Create,
            package: Package::default(),
            catalogue,
            new_images: Vec::new(),
        }
    }

    /// Form over an existing package.
    pub fn with_package(mode: FormMode, package: Package, catalogue: Vec<Destination>) -> Self {
        Self {
            mode,
            package,
            catalogue,
            new_images: Vec::new(),
        }
    }

    /// Open the form. The destination catalogue and, outside create mode, the
    /// package detail are fetched concurrently. A catalogue failure only
    /// leaves the picker empty; a detail failure fails the load.
    pub async fn load(api: &ApiClient, mode: FormMode) -> Result<Self, AppError> {
        let Some(id) = mode.record_id().map(str::to_string) else {
            let catalogue = catalogue_or_empty(api::list_all_destinations(api, None).await);
            return Ok(Self::create(catalogue));
        };

        let (catalogue, detail) = tokio::join!(
            api::list_all_destinations(api, None),
            api::get_package(api, &id)
        );
        let catalogue = catalogue_or_empty(catalogue);
        let package = detail.map_err(|e| {
            tracing::error!("Failed to load package {}: {}", id, e);
            e
        })?;
        Ok(Self::with_package(mode, package, catalogue))
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn package(&self) -> &Package {
        &self.package
    }

    pub fn catalogue(&self) -> &[Destination] {
        &self.catalogue
    }

    pub fn new_images(&self) -> &[PendingFile] {
        &self.new_images
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self.mode, FormMode::View(_))
    }

    fn editable(&mut self) -> Result<&mut Package, AppError> {
        if self.is_read_only() {
            return Err(AppError::Validation(
                "Package is open read-only; switch to edit mode to change it".to_string(),
            ));
        }
        Ok(&mut self.package)
    }

    /// Change scalar fields.
    pub fn update(&mut self, f: impl FnOnce(&mut Package)) -> Result<(), AppError> {
        f(self.editable()?);
        Ok(())
    }

    fn list_mut(&mut self, list: TextList) -> Result<&mut Vec<String>, AppError> {
        let package = self.editable()?;
        Ok(match list {
            TextList::Highlights => &mut package.highlights,
            TextList::Inclusions => &mut package.inclusions,
            TextList::Exclusions => &mut package.exclusions,
        })
    }

    /// Append a trimmed entry; blank input is ignored.
    pub fn add_to_list(&mut self, list: TextList, value: &str) -> Result<(), AppError> {
        let entries = self.list_mut(list)?;
        if !is_blank(value) {
            entries.push(value.trim().to_string());
        }
        Ok(())
    }

    pub fn remove_from_list(&mut self, list: TextList, index: usize) -> Result<(), AppError> {
        let entries = self.list_mut(list)?;
        if index < entries.len() {
            entries.remove(index);
        }
        Ok(())
    }

    /// Append a day numbered after the last one.
    pub fn add_day(&mut self, title: &str, description: &str) -> Result<usize, AppError> {
        let itinerary = &mut self.editable()?.itinerary;
        let day = itinerary.len() as u32 + 1;
        itinerary.push(ItineraryDay {
            day,
            title: title.to_string(),
            description: description.to_string(),
            activities: Vec::new(),
        });
        Ok(itinerary.len() - 1)
    }

    /// Remove a day and renumber the rest.
    pub fn remove_day(&mut self, index: usize) -> Result<(), AppError> {
        let itinerary = &mut self.editable()?.itinerary;
        if index < itinerary.len() {
            itinerary.remove(index);
            for (i, day) in itinerary.iter_mut().enumerate() {
                day.day = i as u32 + 1;
            }
        }
        Ok(())
    }

    pub fn add_activity(&mut self, day_index: usize, activity: &str) -> Result<(), AppError> {
        let day = self
            .editable()?
            .itinerary
            .get_mut(day_index)
            .ok_or_else(|| AppError::NotFound(format!("Day {} does not exist", day_index + 1)))?;
        if !is_blank(activity) {
            day.activities.push(activity.trim().to_string());
        }
        Ok(())
    }

    pub fn remove_activity(&mut self, day_index: usize, index: usize) -> Result<(), AppError> {
        if let Some(day) = self.editable()?.itinerary.get_mut(day_index) {
            if index < day.activities.len() {
                day.activities.remove(index);
            }
        }
        Ok(())
    }

    pub fn set_customization_enabled(
        &mut self,
        kind: CustomizationKind,
        enabled: bool,
    ) -> Result<(), AppError> {
        self.editable()?.customization.block_mut(kind).enabled = enabled;
        Ok(())
    }

    pub fn add_custom_option(
        &mut self,
        kind: CustomizationKind,
        option: CustomOption,
    ) -> Result<(), AppError> {
        if is_blank(&option.name) {
            return Err(AppError::Validation("Option name is required".to_string()));
        }
        self.editable()?.customization.block_mut(kind).options.push(option);
        Ok(())
    }

    pub fn remove_custom_option(
        &mut self,
        kind: CustomizationKind,
        index: usize,
    ) -> Result<(), AppError> {
        let options = &mut self.editable()?.customization.block_mut(kind).options;
        if index < options.len() {
            options.remove(index);
        }
        Ok(())
    }

    /// Add a destination with its places copied in. Returns `false` when it
    /// was already selected.
    pub fn select_destination(&mut self, destination: &Destination) -> Result<bool, AppError> {
        let selected = &mut self.editable()?.selected_destinations;
        if selected.iter().any(|d| d.destination_id == destination.id) {
            return Ok(false);
        }
        selected.push(PackageDestination {
            destination_id: destination.id.clone(),
            name: destination.display_name().to_string(),
            places: destination.places(),
            budget: Default::default(),
        });
        Ok(true)
    }

    /// Select a destination from the loaded catalogue by id.
    pub fn select_destination_by_id(&mut self, id: &str) -> Result<bool, AppError> {
        let destination = self
            .catalogue
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Destination {} not found", id)))?;
        self.select_destination(&destination)
    }

    pub fn deselect_destination(&mut self, id: &str) -> Result<bool, AppError> {
        let selected = &mut self.editable()?.selected_destinations;
        let before = selected.len();
        selected.retain(|d| d.destination_id != id);
        Ok(selected.len() != before)
    }

    /// Set one budget line of a selected destination; the total follows.
    pub fn set_budget(
        &mut self,
        dest_index: usize,
        field: BudgetField,
        value: f64,
    ) -> Result<f64, AppError> {
        if !value.is_finite() || value < 0.0 {
            return Err(AppError::Validation("Budget values must be zero or more".to_string()));
        }
        let entry = self
            .editable()?
            .selected_destinations
            .get_mut(dest_index)
            .ok_or_else(|| {
                AppError::NotFound(format!("No selected destination at {}", dest_index))
            })?;
        entry.budget.set(field, value);
        Ok(entry.budget.total)
    }

    pub fn attach_image(&mut self, file: PendingFile) -> Result<(), AppError> {
        self.editable()?;
        self.new_images.push(file);
        Ok(())
    }

    /// Required fields. The first problem found is reported.
    pub fn validate(&self) -> Result<(), AppError> {
        let p = &self.package;
        let required = [
            (p.title.as_str(), "Title"),
            (p.duration.as_str(), "Duration"),
            (p.source.as_str(), "Source"),
            (p.destination.as_str(), "Destination"),
        ];
        for (value, label) in required {
            if is_blank(value) {
                return Err(AppError::Validation(format!("{} is required", label)));
            }
        }
        if p.category.is_none() {
            return Err(AppError::Validation("Category is required".to_string()));
        }
        if p.price.adult.is_nan() || p.price.adult <= 0.0 {
            return Err(AppError::Validation(
                "Adult price must be greater than zero".to_string(),
            ));
        }
        if p.selected_destinations.is_empty() {
            return Err(AppError::Validation(
                "Select at least one destination".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_payload(&self) -> Result<FormPayload, AppError> {
        let p = &self.package;
        let mut payload = FormPayload::new();
        payload
            .text("title", p.title.trim())
            .text("duration", p.duration.trim())
            .text("source", p.source.trim())
            .text("destination", p.destination.trim())
            .text_opt("category", p.category.as_ref().map(|c| c.as_str()))
            .text("status", p.status.as_str());
        payload
            .json("price", &p.price)?
            .json("discount", &p.discount)?
            .json("highlights", &p.highlights)?
            .json("inclusions", &p.inclusions)?
            .json("exclusions", &p.exclusions)?
            .json("itinerary", &p.itinerary)?
            .json("selectedDestinations", &p.selected_destinations)?
            .json("customization", &p.customization)?
            .json("existingImages", &p.images)?;
        for file in &self.new_images {
            payload.file("images", file.clone());
        }
        Ok(payload)
    }

    /// Validate, then create or update. Nothing is sent when validation
    /// fails.
    pub async fn submit(&self, api: &ApiClient) -> Result<Option<String>, AppError> {
        if self.is_read_only() {
            return Err(AppError::Validation("Package is open read-only".to_string()));
        }
        self.validate()?;
        let payload = self.to_payload()?;
        match &self.mode {
            FormMode::Edit(id) => api::update_package(api, id, payload).await,
            _ => api::create_package(api, payload).await,
        }
    }
}

fn catalogue_or_empty(result: Result<Vec<Destination>, AppError>) -> Vec<Destination> {
    result.unwrap_or_else(|e| {
        tracing::warn!("Failed to load destination catalogue: {}", e);
        Vec::new()
    })
}
