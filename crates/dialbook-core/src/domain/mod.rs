pub mod contact;
pub mod ids;
pub mod phone;

pub use contact::{Contact, ContactRequest, DEFAULT_PROFILE_IMAGE_URL};
pub use ids::ContactId;
pub use phone::normalize_phone;
