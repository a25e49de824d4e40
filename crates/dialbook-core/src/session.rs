use crate::device::DeviceNumberSet;
use crate::domain::{Contact, ContactId};
use crate::group::{group_contacts, ContactGroup};
use crate::search::filter_contacts;
use crate::source::{ContactApi, DeviceBook};
use serde::Serialize;

/// Snapshot handed to whatever renders the list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactsState {
    pub contacts: Vec<Contact>,
    pub query: String,
    pub error: Option<String>,
}

/// Authoritative contact list plus the device snapshot for one session.
///
/// Nothing refreshes on its own: callers run [`ContactListSession::reload`]
/// after every mutation and [`ContactListSession::load_device_numbers`]
/// whenever the device set should be re-read.
#[derive(Debug, Clone, Default)]
pub struct ContactListSession {
    all: Vec<Contact>,
    device: DeviceNumberSet,
    query: String,
    error: Option<String>,
}

impl ContactListSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the list wholesale on success. On failure the previous
    /// list is kept and the message is recorded.
    pub fn reload<A: ContactApi>(&mut self, api: &A) -> Result<usize, A::Error> {
        match api.list_all() {
            Ok(contacts) => {
                self.replace_contacts(contacts);
                self.error = None;
                Ok(self.all.len())
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn replace_contacts(&mut self, mut contacts: Vec<Contact>) {
        contacts.sort_by(|a, b| a.first_name.cmp(&b.first_name));
        self.all = contacts;
    }

    /// Failure degrades to an empty device set; the error is returned only
    /// so the caller can log it.
    pub fn load_device_numbers<D: DeviceBook>(&mut self, book: &D) -> Result<usize, D::Error> {
        match book.phone_numbers() {
            Ok(numbers) => {
                self.device = DeviceNumberSet::from_raw(numbers);
                Ok(self.device.len())
            }
            Err(err) => {
                self.device = DeviceNumberSet::empty();
                Err(err)
            }
        }
    }

    pub fn set_device_numbers(&mut self, device: DeviceNumberSet) {
        self.device = device;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn all(&self) -> &[Contact] {
        &self.all
    }

    pub fn visible(&self) -> Vec<Contact> {
        filter_contacts(&self.all, &self.query)
    }

    pub fn grouped(&self) -> Vec<ContactGroup> {
        group_contacts(&self.visible())
    }

    pub fn is_on_device(&self, contact_phone: &str) -> bool {
        self.device.contains_phone(contact_phone)
    }

    pub fn device_numbers(&self) -> &DeviceNumberSet {
        &self.device
    }

    /// Deletes remotely, then re-pulls the list. Only the remote delete
    /// decides the result: a failed refresh is left in [`Self::error`] and
    /// the previous list is kept.
    pub fn delete<A: ContactApi>(&mut self, api: &A, id: &ContactId) -> Result<(), A::Error> {
        if let Err(err) = api.delete(id) {
            self.error = Some(format!("delete failed: {err}"));
            return Err(err);
        }
        let _ = self.reload(api);
        Ok(())
    }

    pub fn state(&self) -> ContactsState {
        ContactsState {
            contacts: self.visible(),
            query: self.query.clone(),
            error: self.error.clone(),
        }
    }
}
