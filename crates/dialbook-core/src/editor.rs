use crate::domain::{Contact, ContactId, ContactRequest, DEFAULT_PROFILE_IMAGE_URL};
use crate::error::CoreError;
use crate::source::ContactApi;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationResult {
    Idle,
    Saved,
    Deleted,
    Error,
    ValidationError,
}

/// Editable form fields, kept raw until validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub profile_image_url: String,
}

impl Default for ContactDraft {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            phone_number: String::new(),
            profile_image_url: DEFAULT_PROFILE_IMAGE_URL.to_string(),
        }
    }
}

impl From<&Contact> for ContactDraft {
    fn from(contact: &Contact) -> Self {
        Self {
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            phone_number: contact.phone_number.clone(),
            profile_image_url: contact.profile_image_or_default().to_string(),
        }
    }
}

impl ContactDraft {
    pub fn validate(&self) -> Result<ContactRequest, CoreError> {
        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();
        let phone_number = self.phone_number.trim();
        if first_name.is_empty() {
            return Err(CoreError::Validation("first name"));
        }
        if last_name.is_empty() {
            return Err(CoreError::Validation("last name"));
        }
        if phone_number.is_empty() {
            return Err(CoreError::Validation("phone number"));
        }
        let image = self.profile_image_url.trim();
        let profile_image_url = if image.is_empty() {
            DEFAULT_PROFILE_IMAGE_URL
        } else {
            image
        };
        Ok(ContactRequest {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            phone_number: phone_number.to_string(),
            profile_image_url: profile_image_url.to_string(),
        })
    }

    pub fn randomize_image(&mut self, seed: u64) {
        self.profile_image_url = format!("{DEFAULT_PROFILE_IMAGE_URL}?random={seed}");
    }
}

/// Create/edit workflow for a single contact.
#[derive(Debug, Clone, Default)]
pub struct ContactEditor {
    id: Option<ContactId>,
    pub draft: ContactDraft,
    last_error: Option<String>,
}

impl ContactEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefills from the remote record. A failed lookup yields a blank
    /// editor rather than an error.
    pub fn open<A: ContactApi>(api: &A, id: &ContactId) -> Self {
        match api.find_by_id(id) {
            Some(contact) => Self {
                id: contact.id.clone(),
                draft: ContactDraft::from(&contact),
                last_error: None,
            },
            None => Self::new(),
        }
    }

    pub fn id(&self) -> Option<&ContactId> {
        self.id.as_ref()
    }

    pub fn is_existing(&self) -> bool {
        self.id.is_some()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn save<A: ContactApi>(&mut self, api: &A) -> OperationResult {
        let request = match self.draft.validate() {
            Ok(request) => request,
            Err(err) => {
                self.last_error = Some(err.to_string());
                return OperationResult::ValidationError;
            }
        };

        let result = match &self.id {
            None => api.create(&request),
            Some(id) => api.update(id, &request),
        };
        match result {
            Ok(saved) => {
                if self.id.is_none() {
                    self.id = saved.id;
                }
                self.last_error = None;
                OperationResult::Saved
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                OperationResult::Error
            }
        }
    }

    pub fn delete<A: ContactApi>(&mut self, api: &A) -> OperationResult {
        let Some(id) = self.id.as_ref() else {
            return OperationResult::Idle;
        };
        match api.delete(id) {
            Ok(()) => {
                self.last_error = None;
                OperationResult::Deleted
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
                OperationResult::Error
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ContactDraft;
    use crate::domain::DEFAULT_PROFILE_IMAGE_URL;
    use crate::error::CoreError;

    fn draft(first: &str, last: &str, phone: &str) -> ContactDraft {
        ContactDraft {
            first_name: first.to_string(),
            last_name: last.to_string(),
            phone_number: phone.to_string(),
            profile_image_url: String::new(),
        }
    }

    #[test]
    fn validate_trims_fields() {
        let request = draft("  Ada ", " Lovelace", " 555 ").validate().unwrap();
        assert_eq!(request.first_name, "Ada");
        assert_eq!(request.last_name, "Lovelace");
        assert_eq!(request.phone_number, "555");
        assert_eq!(request.profile_image_url, DEFAULT_PROFILE_IMAGE_URL);
    }

    #[test]
    fn validate_names_the_blank_field() {
        assert_eq!(
            draft("Ada", "  ", "1").validate().unwrap_err(),
            CoreError::Validation("last name")
        );
        assert_eq!(
            draft("Ada", "Lovelace", "").validate().unwrap_err(),
            CoreError::Validation("phone number")
        );
    }

    #[test]
    fn randomize_image_appends_seed() {
        let mut value = ContactDraft::default();
        value.randomize_image(42);
        assert_eq!(value.profile_image_url, "https://picsum.photos/200?random=42");
    }
}
