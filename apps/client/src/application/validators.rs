/// Shortest OTP the server issues.
pub const OTP_MIN_LEN: usize = 4;

/// Strips whitespace, dashes and parentheses users type into phone fields.
pub fn normalize_phone_number(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect()
}

/// Validates a normalized phone number.
/// Rules:
/// - Either exactly 10 digits (local number)
/// - Or `+` followed by 11-15 digits (country code included)
pub fn is_valid_phone_number(phone: &str) -> bool {
    match phone.strip_prefix('+') {
        Some(rest) => (11..=15).contains(&rest.len()) && rest.chars().all(|c| c.is_ascii_digit()),
        None => phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit()),
    }
}

/// Validates an OTP: at least 4 ASCII digits, nothing else. The upper bound
/// is left to the server.
pub fn is_valid_otp(otp: &str) -> bool {
    otp.len() >= OTP_MIN_LEN && otp.chars().all(|c| c.is_ascii_digit())
}

/// Validates a display name on a lead form.
pub fn is_valid_contact_name(name: &str) -> bool {
    let name = name.trim();
    !name.is_empty() && name.chars().count() <= 100
}
