//! Minimal vCard reader: only `TEL` values are extracted.

use std::borrow::Cow;

/// Raw `TEL` values in file order. Values are unescaped and a `tel:` URI
/// scheme is dropped, but no other normalization happens here.
pub fn parse_vcf_phone_numbers(data: &str) -> Vec<String> {
    let mut numbers = Vec::new();
    let mut in_card = false;

    for line in unfold_lines(data) {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("BEGIN:VCARD") {
            in_card = true;
            continue;
        }
        if trimmed.eq_ignore_ascii_case("END:VCARD") {
            in_card = false;
            continue;
        }
        if !in_card {
            continue;
        }

        let Some((key, raw_value)) = split_property(trimmed) else {
            continue;
        };
        if key != "TEL" {
            continue;
        }

        let value = unescape_vcard_value(&raw_value);
        let value = strip_tel_scheme(value.trim());
        if !value.is_empty() {
            numbers.push(value.to_string());
        }
    }

    numbers
}

fn strip_tel_scheme(value: &str) -> &str {
    match value.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("tel:") => value[4..].trim(),
        _ => value,
    }
}

fn unfold_lines(input: &str) -> Vec<String> {
    let input = normalize_line_endings(input);
    let mut lines: Vec<String> = Vec::new();
    for line in input.lines() {
        if line.starts_with(' ') || line.starts_with('\t') {
            if let Some(last) = lines.last_mut() {
                last.push_str(&line[1..]);
            } else {
                lines.push(line[1..].to_string());
            }
        } else {
            lines.push(line.to_string());
        }
    }
    lines
}

fn normalize_line_endings(input: &str) -> Cow<'_, str> {
    if !input.contains('\r') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\r' {
            if matches!(chars.peek(), Some('\n')) {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

/// Splits `item1.TEL;TYPE=CELL:+1 555` into `("TEL", "+1 555")`.
fn split_property(line: &str) -> Option<(String, String)> {
    let (left, value) = line.split_once(':')?;
    let mut name = left.split(';').next()?.trim();
    if let Some((_, group)) = name.rsplit_once('.') {
        name = group;
    }
    if name.is_empty() {
        return None;
    }
    Some((name.to_ascii_uppercase(), value.to_string()))
}

fn unescape_vcard_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push(' '),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::parse_vcf_phone_numbers;

    #[test]
    fn extracts_every_tel_value() {
        let data = "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Ada Lovelace\r\nTEL;TYPE=CELL:+90 532 555 12 34\r\nTEL;TYPE=HOME:(0212) 555-66-77\r\nEND:VCARD\r\nBEGIN:VCARD\r\nFN:Grace\r\nitem1.TEL:555 0101\r\nEND:VCARD\r\n";
        assert_eq!(
            parse_vcf_phone_numbers(data),
            vec!["+90 532 555 12 34", "(0212) 555-66-77", "555 0101"]
        );
    }

    #[test]
    fn handles_folded_lines_and_tel_uris() {
        let data = "BEGIN:VCARD\nVERSION:4.0\nTEL;VALUE=uri:tel:+1-41\n 5-555-1212\nEND:VCARD\n";
        assert_eq!(parse_vcf_phone_numbers(data), vec!["+1-415-555-1212"]);
    }

    #[test]
    fn ignores_properties_outside_cards_and_empty_values() {
        let data = "TEL:111\nBEGIN:VCARD\nTEL:\nNOTE:TEL:222\nEND:VCARD\n";
        assert!(parse_vcf_phone_numbers(data).is_empty());
    }
}
