pub mod device;
pub mod domain;
pub mod dto;
pub mod editor;
pub mod error;
pub mod group;
pub mod search;
pub mod session;
pub mod source;

pub use device::{is_on_device, DeviceNumberSet};
pub use domain::*;
pub use dto::*;
pub use editor::{ContactDraft, ContactEditor, OperationResult};
pub use error::CoreError;
pub use group::{group_contacts, ContactGroup, EMPTY_GROUP_KEY};
pub use search::{filter_contacts, SearchQuery};
pub use session::{ContactListSession, ContactsState};
pub use source::{ContactApi, DeviceBook};
