use crate::domain::normalize_phone;
use std::collections::HashSet;

/// Numbers shorter than this must match exactly; longer ones match on
/// their trailing digits to tolerate country and area code prefixes.
pub const TAIL_MATCH_DIGITS: usize = 7;

/// Digit-only snapshot of the phone numbers stored on the device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceNumberSet {
    numbers: HashSet<String>,
}

impl DeviceNumberSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let numbers = raw
            .into_iter()
            .map(|value| normalize_phone(value.as_ref()))
            .filter(|value| !value.is_empty())
            .collect();
        Self { numbers }
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn contains_phone(&self, contact_phone: &str) -> bool {
        let digits = normalize_phone(contact_phone);
        if digits.is_empty() {
            return false;
        }
        if digits.len() < TAIL_MATCH_DIGITS {
            return self.numbers.contains(&digits);
        }
        let tail = &digits[digits.len() - TAIL_MATCH_DIGITS..];
        self.numbers.iter().any(|number| number.ends_with(tail))
    }
}

pub fn is_on_device(contact_phone: &str, device_numbers: &DeviceNumberSet) -> bool {
    device_numbers.contains_phone(contact_phone)
}

#[cfg(test)]
mod tests {
    use super::{is_on_device, DeviceNumberSet};

    fn set(values: &[&str]) -> DeviceNumberSet {
        DeviceNumberSet::from_raw(values.iter().copied())
    }

    #[test]
    fn seven_digits_match_on_tail() {
        assert!(is_on_device("5551234", &set(&["05551234"])));
    }

    #[test]
    fn short_numbers_need_exact_match() {
        assert!(is_on_device("123", &set(&["123"])));
        assert!(!is_on_device("123", &set(&["99123"])));
    }

    #[test]
    fn country_code_prefix_is_tolerated() {
        assert!(is_on_device("+90 (532) 555 12 34", &set(&["0532 555 1234"])));
    }

    #[test]
    fn differing_tail_does_not_match() {
        assert!(!is_on_device("0532 555 1234", &set(&["0532 555 1235"])));
    }

    #[test]
    fn non_numeric_phone_never_matches() {
        assert!(!is_on_device("unknown", &set(&["123"])));
        assert!(!is_on_device("", &set(&[""])));
    }

    #[test]
    fn empty_set_matches_nothing() {
        assert!(!DeviceNumberSet::empty().contains_phone("5551234"));
    }

    #[test]
    fn from_raw_normalizes_and_drops_blank_entries() {
        let numbers = set(&["0555 123-45", "055512345", "---"]);
        assert_eq!(numbers.len(), 1);
        assert!(numbers.contains_phone("055512345"));
    }
}
