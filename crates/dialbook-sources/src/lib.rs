pub mod api;
pub mod device;
pub mod error;
pub mod macos;
pub mod vcf;

pub use api::HttpContactApi;
pub use device::VcfDeviceBook;
pub use error::{Result, SourceError};
pub use macos::MacosDeviceBook;
