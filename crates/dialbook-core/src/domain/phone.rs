/// Strips every character that is not an ASCII digit.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|ch| ch.is_ascii_digit()).collect()
}
