use crate::domain::{Contact, ContactId, ContactRequest};

/// Remote contact CRUD endpoints.
pub trait ContactApi {
    type Error: std::error::Error;

    fn list_all(&self) -> Result<Vec<Contact>, Self::Error>;
    fn create(&self, request: &ContactRequest) -> Result<Contact, Self::Error>;
    fn update(&self, id: &ContactId, request: &ContactRequest) -> Result<Contact, Self::Error>;
    fn delete(&self, id: &ContactId) -> Result<(), Self::Error>;
    fn get_by_id(&self, id: &ContactId) -> Result<Contact, Self::Error>;

    /// Lookup where any failure counts as "not found".
    fn find_by_id(&self, id: &ContactId) -> Option<Contact> {
        self.get_by_id(id).ok()
    }
}

/// The device's own address book, as raw phone strings.
pub trait DeviceBook {
    type Error: std::error::Error;

    fn source_name(&self) -> &'static str;
    fn phone_numbers(&self) -> Result<Vec<String>, Self::Error>;
}
