use crate::domain::Contact;
use crate::group::ContactGroup;
use crate::session::ContactListSession;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactListItemDto {
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub on_device: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactGroupDto {
    pub key: char,
    pub contacts: Vec<ContactListItemDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactDetailDto {
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub normalized_phone: String,
    pub profile_image_url: String,
}

impl ContactListItemDto {
    pub fn from_contact(contact: &Contact, session: &ContactListSession) -> Self {
        Self {
            id: contact.id.as_ref().map(|id| id.to_string()),
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            phone_number: contact.phone_number.clone(),
            on_device: session.is_on_device(&contact.phone_number),
        }
    }
}

impl ContactGroupDto {
    pub fn from_group(group: &ContactGroup, session: &ContactListSession) -> Self {
        Self {
            key: group.key,
            contacts: group
                .contacts
                .iter()
                .map(|contact| ContactListItemDto::from_contact(contact, session))
                .collect(),
        }
    }
}

impl From<&Contact> for ContactDetailDto {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id.as_ref().map(|id| id.to_string()),
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            phone_number: contact.phone_number.clone(),
            normalized_phone: contact.normalized_phone(),
            profile_image_url: contact.profile_image_or_default().to_string(),
        }
    }
}
