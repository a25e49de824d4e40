use crate::domain::Contact;

/// A query folded once so it can be tested against many contacts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    folded: String,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            folded: raw.trim().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.folded
    }

    pub fn matches(&self, contact: &Contact) -> bool {
        if self.is_empty() {
            return true;
        }
        contact.full_name().to_lowercase().contains(&self.folded)
            || contact.reversed_name().to_lowercase().contains(&self.folded)
            || contact.normalized_phone().contains(&self.folded)
    }
}

/// Filters by name (either order) or digits of the phone number.
/// An empty query returns the input untouched.
pub fn filter_contacts(contacts: &[Contact], query: &str) -> Vec<Contact> {
    let query = SearchQuery::new(query);
    if query.is_empty() {
        return contacts.to_vec();
    }
    contacts
        .iter()
        .filter(|contact| query.matches(contact))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{filter_contacts, SearchQuery};
    use crate::domain::Contact;

    fn contact(first: &str, last: &str, phone: &str) -> Contact {
        Contact {
            id: None,
            first_name: first.to_string(),
            last_name: last.to_string(),
            phone_number: phone.to_string(),
            profile_image_url: None,
        }
    }

    fn ada() -> Contact {
        contact("Ada", "Lovelace", "0212-555-66-77")
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let contacts = vec![contact("Zed", "A", "1"), ada(), contact("Bob", "B", "2")];
        assert_eq!(filter_contacts(&contacts, ""), contacts);
        assert_eq!(filter_contacts(&contacts, "   "), contacts);
    }

    #[test]
    fn matches_full_name_case_insensitively() {
        let contacts = vec![ada()];
        assert_eq!(filter_contacts(&contacts, "ADA LOVE"), contacts);
    }

    #[test]
    fn matches_reversed_name() {
        let contacts = vec![ada()];
        assert_eq!(filter_contacts(&contacts, "lovelace ada"), contacts);
    }

    #[test]
    fn matches_normalized_phone_digits() {
        let contacts = vec![ada()];
        assert_eq!(filter_contacts(&contacts, "5556677"), contacts);
        assert_eq!(filter_contacts(&contacts, " 0212555 "), contacts);
    }

    #[test]
    fn formatted_phone_query_does_not_match_digits() {
        let contacts = vec![ada()];
        assert!(filter_contacts(&contacts, "555-66").is_empty());
    }

    #[test]
    fn keeps_input_order_of_survivors() {
        let contacts = vec![
            contact("Anna", "Smith", "1"),
            contact("Bob", "Jones", "2"),
            contact("Hanna", "Lee", "3"),
        ];
        let filtered = filter_contacts(&contacts, "anna");
        let names: Vec<&str> = filtered.iter().map(|c| c.first_name.as_str()).collect();
        assert_eq!(names, vec!["Anna", "Hanna"]);
    }

    #[test]
    fn does_not_touch_the_source_list() {
        let contacts = vec![ada(), contact("Bob", "Jones", "2")];
        let before = contacts.clone();
        let _ = filter_contacts(&contacts, "bob");
        assert_eq!(contacts, before);
    }

    #[test]
    fn search_query_folds_unicode() {
        let query = SearchQuery::new("  ÇAĞLA ");
        assert_eq!(query.as_str(), "çağla");
        assert!(query.matches(&contact("Çağla", "Yıldız", "")));
    }
}
