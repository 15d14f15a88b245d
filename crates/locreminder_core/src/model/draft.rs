//! Reminder draft entered through the save flow.
//!
//! # Responsibility
//! - Hold partially filled form input before it becomes a `Reminder`.
//! - Enforce the "title and location are required" rule before storage.
//!
//! # Invariants
//! - The draft id is fixed at draft creation so the geofence request id and
//!   the persisted reminder id always match.
//! - Validation order is title first, then location.

use crate::model::reminder::{Reminder, ReminderId};
use thiserror::Error;
use uuid::Uuid;

/// Validation failure for a reminder draft.
///
/// Display strings are shown to the user verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Please enter title")]
    MissingTitle,
    #[error("Please select location")]
    MissingLocation,
}

/// Form-level reminder input with every field optional.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderDraft {
    pub id: ReminderId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Default for ReminderDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl ReminderDraft {
    /// Creates an empty draft with a freshly generated id.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: None,
            description: None,
            location: None,
            latitude: None,
            longitude: None,
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets only the location label, leaving coordinates untouched.
    pub fn labelled(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn located_at(mut self, label: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        self.location = Some(label.into());
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Checks that the draft can be persisted.
    ///
    /// # Errors
    /// - `MissingTitle` when the title is absent or blank.
    /// - `MissingLocation` when the location label is absent or blank.
    pub fn validate(&self) -> Result<(), DraftError> {
        if is_blank(self.title.as_deref()) {
            return Err(DraftError::MissingTitle);
        }
        if is_blank(self.location.as_deref()) {
            return Err(DraftError::MissingLocation);
        }
        Ok(())
    }

    /// Validates and converts the draft into a persistable reminder.
    pub fn into_reminder(self) -> Result<Reminder, DraftError> {
        self.validate()?;
        Ok(Reminder {
            id: self.id,
            title: self.title.unwrap_or_default(),
            description: self.description,
            location: self.location,
            latitude: self.latitude,
            longitude: self.longitude,
        })
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |value| value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{DraftError, ReminderDraft};

    #[test]
    fn empty_draft_reports_missing_title_first() {
        assert_eq!(
            ReminderDraft::new().validate(),
            Err(DraftError::MissingTitle)
        );
    }

    #[test]
    fn blank_title_counts_as_missing() {
        let draft = ReminderDraft::new().titled("   ").labelled("Lala");
        assert_eq!(draft.validate(), Err(DraftError::MissingTitle));
    }

    #[test]
    fn titled_draft_without_location_is_rejected() {
        let draft = ReminderDraft::new().titled("TITLE1").described("DESCRIPTION2");
        assert_eq!(draft.validate(), Err(DraftError::MissingLocation));
    }

    #[test]
    fn into_reminder_keeps_draft_id() {
        let draft = ReminderDraft::new()
            .titled("TITLE2")
            .described("DESCRIPTION2")
            .located_at("LOCATION2", 11.67, 111.44);
        let id = draft.id.clone();

        let reminder = draft.into_reminder().expect("valid draft should convert");
        assert_eq!(reminder.id, id);
        assert_eq!(reminder.title, "TITLE2");
        assert_eq!(reminder.location.as_deref(), Some("LOCATION2"));
        assert_eq!(reminder.coordinates(), Some((11.67, 111.44)));
    }

    #[test]
    fn error_messages_are_user_facing() {
        assert_eq!(DraftError::MissingTitle.to_string(), "Please enter title");
        assert_eq!(
            DraftError::MissingLocation.to_string(),
            "Please select location"
        );
    }
}
