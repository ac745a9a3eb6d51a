/// Keep only ASCII digits from a raw phone string.
///
/// `"abc-987-654-3210"` → `"9876543210"`
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Last four characters of a phone number (the whole string if shorter).
pub fn last4(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    let start = chars.len().saturating_sub(4);
    chars[start..].iter().collect()
}
