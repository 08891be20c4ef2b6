use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating public case identifiers
    /// "WB" followed by a 4-digit year and a 6-digit zero-padded number
    /// - Valid: "WB2025000417", "WB2024999999"
    /// - Invalid: "WB25000417", "wb2025000417", "WB2025-00417"
    pub static ref CASE_ID_REGEX: Regex = Regex::new(r"^WB\d{4}\d{6}$").unwrap();

    /// Regex for validating access codes
    /// Exactly 8 characters from the uppercase alphanumeric alphabet
    /// - Valid: "A7KQ20ZX", "00000000"
    /// - Invalid: "a7kq20zx", "A7KQ20Z", "A7KQ20ZX9"
    pub static ref ACCESS_CODE_REGEX: Regex = Regex::new(r"^[A-Z0-9]{8}$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_id_regex_valid() {
        assert!(CASE_ID_REGEX.is_match("WB2025000417"));
        assert!(CASE_ID_REGEX.is_match("WB2024999999"));
        assert!(CASE_ID_REGEX.is_match("WB2025000000"));
    }

    #[test]
    fn test_case_id_regex_invalid() {
        assert!(!CASE_ID_REGEX.is_match("WB25000417")); // 2-digit year
        assert!(!CASE_ID_REGEX.is_match("wb2025000417")); // lowercase prefix
        assert!(!CASE_ID_REGEX.is_match("WB2025-00417")); // separator
        assert!(!CASE_ID_REGEX.is_match("WB20250004170")); // too long
        assert!(!CASE_ID_REGEX.is_match("XX2025000417")); // wrong prefix
        assert!(!CASE_ID_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_access_code_regex_valid() {
        assert!(ACCESS_CODE_REGEX.is_match("A7KQ20ZX"));
        assert!(ACCESS_CODE_REGEX.is_match("00000000"));
        assert!(ACCESS_CODE_REGEX.is_match("ZZZZZZZZ"));
    }

    #[test]
    fn test_access_code_regex_invalid() {
        assert!(!ACCESS_CODE_REGEX.is_match("a7kq20zx")); // lowercase
        assert!(!ACCESS_CODE_REGEX.is_match("A7KQ20Z")); // too short
        assert!(!ACCESS_CODE_REGEX.is_match("A7KQ20ZX9")); // too long
        assert!(!ACCESS_CODE_REGEX.is_match("A7KQ 0ZX")); // space
        assert!(!ACCESS_CODE_REGEX.is_match("")); // empty
    }
}
