use crate::domain::ids::ContactId;
use crate::domain::phone::normalize_phone;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROFILE_IMAGE_URL: &str = "https://picsum.photos/200";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContactId>,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn reversed_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }

    pub fn normalized_phone(&self) -> String {
        normalize_phone(&self.phone_number)
    }

    pub fn profile_image_or_default(&self) -> &str {
        self.profile_image_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_PROFILE_IMAGE_URL)
    }
}

/// Payload for create and update calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub profile_image_url: String,
}
