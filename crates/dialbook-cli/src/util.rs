use crate::error::invalid_input;
use anyhow::Result;
use chrono::Utc;
use dialbook_core::ContactId;

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

pub fn now_millis() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

pub fn parse_contact_id(raw: &str) -> Result<ContactId> {
    ContactId::new(raw).map_err(|_| invalid_input("contact id cannot be empty"))
}

pub fn display_name(first: &str, last: &str) -> String {
    format!("{} {}", first, last).trim().to_string()
}
