use crate::vcf::parse_vcf_phone_numbers;
use crate::{Result, SourceError};
use dialbook_core::DeviceBook;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Address book exported as a vCard file.
#[derive(Debug, Clone)]
pub struct VcfDeviceBook {
    path: PathBuf,
}

impl VcfDeviceBook {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl DeviceBook for VcfDeviceBook {
    type Error = SourceError;

    fn source_name(&self) -> &'static str {
        "vcf"
    }

    fn phone_numbers(&self) -> Result<Vec<String>> {
        let data = fs::read_to_string(&self.path)?;
        let numbers = parse_vcf_phone_numbers(&data);
        debug!(path = %self.path.display(), count = numbers.len(), "device numbers read");
        Ok(numbers)
    }
}
