//! Add/edit/remove editor for a form's repeatable sub-entities.
//!
//! Each committed item may carry one newly picked file. Files stay out of the
//! item JSON; the item instead says `hasNewImage` and the file is appended
//! under the collection's image field in item order.

use serde_json::Value;

use super::payload::{FormPayload, PendingFile};
use crate::errors::AppError;
use crate::models::{
    is_blank, Activity, Attraction, EventFestival, FoodItem, Hotel, NearbyDestination,
};

/// A sub-entity a form edits in place.
pub trait DraftItem: Clone + Default {
    /// Singular label used in validation messages.
    const LABEL: &'static str;
    /// Field the collection's JSON array goes up under.
    const JSON_FIELD: &'static str;
    /// Field the collection's new files go up under.
    const IMAGE_FIELD: &'static str;

    fn name(&self) -> &str;

    fn to_json(&self) -> Result<Value, AppError>;

    fn validate(&self) -> Result<(), AppError> {
        if is_blank(self.name()) {
            return Err(AppError::Validation(format!("{} name is required", Self::LABEL)));
        }
        Ok(())
    }
}

macro_rules! serde_draft_item {
    ($ty:ty, $label:literal, $json:literal, $image:literal) => {
        impl DraftItem for $ty {
            const LABEL: &'static str = $label;
            const JSON_FIELD: &'static str = $json;
            const IMAGE_FIELD: &'static str = $image;

            fn name(&self) -> &str {
                &self.name
            }

            fn to_json(&self) -> Result<Value, AppError> {
                Ok(serde_json::to_value(self)?)
            }
        }
    };
}

serde_draft_item!(Attraction, "Attraction", "topAttractions", "attractionImages");
serde_draft_item!(Hotel, "Hotel", "hotels", "hotelImages");
serde_draft_item!(FoodItem, "Food", "foodAndCuisine", "foodImages");
serde_draft_item!(Activity, "Activity", "activities", "activityImages");
serde_draft_item!(NearbyDestination, "Nearby destination", "nearbyDestinations", "nearbyImages");

impl DraftItem for EventFestival {
    const LABEL: &'static str = "Event";
    const JSON_FIELD: &'static str = "eventsFestivals";
    const IMAGE_FIELD: &'static str = "eventImages";

    fn name(&self) -> &str {
        &self.name
    }

    fn to_json(&self) -> Result<Value, AppError> {
        Ok(serde_json::to_value(self)?)
    }

    fn validate(&self) -> Result<(), AppError> {
        if is_blank(&self.name) {
            return Err(AppError::Validation("Event name is required".to_string()));
        }
        // ISO dates compare correctly as strings
        if let (Some(start), Some(end)) = (&self.start_date, &self.end_date) {
            if end < start {
                return Err(AppError::Validation(
                    "Event end date must not be before its start date".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SubEntityEditor<T: DraftItem> {
    items: Vec<T>,
    files: Vec<Option<PendingFile>>,
    draft: Option<T>,
    draft_file: Option<PendingFile>,
    editing_index: Option<usize>,
}

impl<T: DraftItem> Default for SubEntityEditor<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            files: Vec::new(),
            draft: None,
            draft_file: None,
            editing_index: None,
        }
    }
}

impl<T: DraftItem> SubEntityEditor<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Editor over already saved items (none with new files).
    pub fn from_items(items: Vec<T>) -> Self {
        let files = vec![None; items.len()];
        Self {
            items,
            files,
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn has_new_file(&self, index: usize) -> bool {
        self.files.get(index).is_some_and(|f| f.is_some())
    }

    pub fn editing_index(&self) -> Option<usize> {
        self.editing_index
    }

    pub fn draft(&self) -> Option<&T> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut T> {
        self.draft.as_mut()
    }

    /// Open an empty draft.
    pub fn begin_add(&mut self) -> &mut T {
        self.draft_file = None;
        self.editing_index = None;
        self.draft.insert(T::default())
    }

    /// Open a copy of item `index` for editing.
    pub fn begin_edit(&mut self, index: usize) -> Result<&mut T, AppError> {
        let item = self.items.get(index).cloned().ok_or_else(|| {
            AppError::NotFound(format!("{} #{} does not exist", T::LABEL, index + 1))
        })?;
        self.draft_file = None;
        self.editing_index = Some(index);
        Ok(self.draft.insert(item))
    }

    /// Pick a file for the open draft.
    pub fn attach_file(&mut self, file: PendingFile) -> Result<(), AppError> {
        if self.draft.is_none() {
            return Err(AppError::Validation(format!(
                "Open a {} before attaching an image",
                T::LABEL.to_lowercase()
            )));
        }
        self.draft_file = Some(file);
        Ok(())
    }

    /// Validate the draft, then append it or write it back over the item
    /// being edited. Returns the item's index. On a validation error the
    /// draft stays open.
    pub fn commit(&mut self) -> Result<usize, AppError> {
        let draft = self.draft.as_ref().ok_or_else(|| {
            AppError::Validation(format!("No {} is being edited", T::LABEL.to_lowercase()))
        })?;
        draft.validate()?;

        let item = self.draft.take().unwrap_or_default();
        let file = self.draft_file.take();
        let index = match self.editing_index.take() {
            Some(index) if index < self.items.len() => {
                self.items[index] = item;
                if file.is_some() {
                    self.files[index] = file;
                }
                index
            }
            _ => {
                self.items.push(item);
                self.files.push(file);
                self.items.len() - 1
            }
        };
        Ok(index)
    }

    /// Close the draft without changing anything.
    pub fn cancel(&mut self) {
        self.draft = None;
        self.draft_file = None;
        self.editing_index = None;
    }

    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        self.files.remove(index);
        match self.editing_index {
            Some(editing) if editing == index => self.cancel(),
            Some(editing) if editing > index => self.editing_index = Some(editing - 1),
            _ => {}
        }
        Some(self.items.remove(index))
    }

    /// Item JSON with each entry's `hasNewImage` flag.
    pub fn items_json(&self) -> Result<Vec<Value>, AppError> {
        self.items
            .iter()
            .zip(&self.files)
            .map(|(item, file)| {
                let mut value = item.to_json()?;
                if let Value::Object(map) = &mut value {
                    map.insert("hasNewImage".to_string(), Value::Bool(file.is_some()));
                }
                Ok(value)
            })
            .collect()
    }

    /// Append the JSON array and the new files under the collection's own
    /// field names.
    pub fn write_into(&self, payload: &mut FormPayload) -> Result<(), AppError> {
        payload.json(T::JSON_FIELD, &self.items_json()?)?;
        self.append_files_as(payload, T::IMAGE_FIELD);
        Ok(())
    }

    /// Append new files, in item order, under `field`.
    pub fn append_files_as(&self, payload: &mut FormPayload, field: &str) {
        for file in self.files.iter().flatten() {
            payload.file(field, file.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attraction(name: &str) -> Attraction {
        Attraction {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_commit_requires_name() {
        let mut editor = SubEntityEditor::<Hotel>::new();
        editor.begin_add();
        let err = editor.commit().unwrap_err();
        assert_eq!(err.message(), "Hotel name is required");
        assert!(editor.draft().is_some());

        editor.draft_mut().unwrap().name = "Taj".into();
        assert_eq!(editor.commit().unwrap(), 0);
        assert!(editor.draft().is_none());
    }

    #[test]
    fn test_edit_replaces_in_place() {
        let mut editor = SubEntityEditor::from_items(vec![attraction("Fort"), attraction("Beach")]);
        editor.begin_edit(1).unwrap().name = "Baga Beach".into();
        editor.attach_file(PendingFile::new("baga.jpg", vec![1])).unwrap();
        assert_eq!(editor.commit().unwrap(), 1);

        assert_eq!(editor.len(), 2);
        assert_eq!(editor.items()[1].name, "Baga Beach");
        assert!(editor.has_new_file(1));
        assert!(!editor.has_new_file(0));
        assert!(editor.begin_edit(5).is_err());
    }

    #[test]
    fn test_attach_without_draft_fails() {
        let mut editor = SubEntityEditor::<Activity>::new();
        assert!(editor.attach_file(PendingFile::new("a.png", vec![])).is_err());
    }

    #[test]
    fn test_files_stay_aligned_after_remove() {
        let mut editor = SubEntityEditor::<Attraction>::new();
        for (name, with_file) in [("A", true), ("B", false), ("C", true)] {
            editor.begin_add().name = name.into();
            if with_file {
                editor
                    .attach_file(PendingFile::new(&format!("{}.jpg", name), vec![0]))
                    .unwrap();
            }
            editor.commit().unwrap();
        }
        editor.remove(0);

        let json = editor.items_json().unwrap();
        assert_eq!(json[0]["name"], "B");
        assert_eq!(json[0]["hasNewImage"], false);
        assert_eq!(json[1]["hasNewImage"], true);

        let mut payload = FormPayload::new();
        editor.write_into(&mut payload).unwrap();
        let files = payload.files_named("attractionImages");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name, "C.jpg");
        assert!(payload.field("topAttractions").unwrap().contains("\"B\""));
    }

    #[test]
    fn test_event_dates_ordered() {
        let mut editor = SubEntityEditor::<EventFestival>::new();
        let draft = editor.begin_add();
        draft.name = "Sunburn".into();
        draft.start_date = Some("2025-12-28".into());
        draft.end_date = Some("2025-12-20".into());
        assert!(editor.commit().unwrap_err().is_validation());
    }

    #[test]
    fn test_cancel_leaves_items() {
        let mut editor = SubEntityEditor::from_items(vec![attraction("Fort")]);
        editor.begin_edit(0).unwrap().name = "Changed".into();
        editor.cancel();
        assert_eq!(editor.items()[0].name, "Fort");
        assert_eq!(editor.editing_index(), None);
    }
}
