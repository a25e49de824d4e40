use crate::domain::Contact;
use serde::Serialize;
use std::cmp::Ordering;

/// Key for contacts without a first name.
pub const EMPTY_GROUP_KEY: char = '#';

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactGroup {
    pub key: char,
    pub contacts: Vec<Contact>,
}

pub fn group_key(contact: &Contact) -> char {
    contact
        .first_name
        .chars()
        .next()
        .and_then(|ch| ch.to_uppercase().next())
        .unwrap_or(EMPTY_GROUP_KEY)
}

/// Case-insensitive `(first, last)` order. Empty first names sort last.
pub fn compare_by_name(a: &Contact, b: &Contact) -> Ordering {
    match (a.first_name.is_empty(), b.first_name.is_empty()) {
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        _ => {}
    }
    a.first_name
        .to_lowercase()
        .cmp(&b.first_name.to_lowercase())
        .then_with(|| a.last_name.to_lowercase().cmp(&b.last_name.to_lowercase()))
}

/// Sorts then buckets by first-name initial. Groups come out in the order
/// their first member appears in the sorted sequence.
pub fn group_contacts(contacts: &[Contact]) -> Vec<ContactGroup> {
    let mut sorted: Vec<&Contact> = contacts.iter().collect();
    sorted.sort_by(|a, b| compare_by_name(a, b));

    let mut groups: Vec<ContactGroup> = Vec::new();
    for contact in sorted {
        let key = group_key(contact);
        match groups.iter_mut().find(|group| group.key == key) {
            Some(group) => group.contacts.push(contact.clone()),
            None => groups.push(ContactGroup {
                key,
                contacts: vec![contact.clone()],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::{group_contacts, EMPTY_GROUP_KEY};
    use crate::domain::Contact;

    fn named(first: &str, last: &str) -> Contact {
        Contact {
            id: None,
            first_name: first.to_string(),
            last_name: last.to_string(),
            phone_number: String::new(),
            profile_image_url: None,
        }
    }

    #[test]
    fn groups_follow_sorted_first_appearance() {
        let contacts = vec![named("bob", ""), named("Ann", ""), named("", "")];
        let groups = group_contacts(&contacts);
        let keys: Vec<char> = groups.iter().map(|group| group.key).collect();
        assert_eq!(keys, vec!['A', 'B', EMPTY_GROUP_KEY]);
    }

    #[test]
    fn sorts_by_first_then_last_ignoring_case() {
        let contacts = vec![
            named("ada", "Zeta"),
            named("Ada", "byron"),
            named("aaron", "Smith"),
        ];
        let groups = group_contacts(&contacts);
        assert_eq!(groups.len(), 1);
        let order: Vec<String> = groups[0].contacts.iter().map(|c| c.full_name()).collect();
        assert_eq!(order, vec!["aaron Smith", "Ada byron", "ada Zeta"]);
    }

    #[test]
    fn lowercase_initials_share_group_with_uppercase() {
        let contacts = vec![named("carl", ""), named("Cem", "")];
        let groups = group_contacts(&contacts);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, 'C');
        assert_eq!(groups[0].contacts.len(), 2);
    }

    #[test]
    fn empty_input_has_no_groups() {
        assert!(group_contacts(&[]).is_empty());
    }
}
