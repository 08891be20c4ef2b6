//! Generation of public case identifiers and access codes.
//!
//! Both values come from the operating system CSPRNG. Case identifiers are
//! not guaranteed unique here; the store enforces uniqueness with a bounded
//! regenerate-and-retry on insert.

use chrono::{Datelike, Utc};
use rand::rngs::OsRng;
use rand::Rng;

/// Alphabet for access codes: uppercase letters and digits
const ACCESS_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of generated access codes
const ACCESS_CODE_LENGTH: usize = 8;

/// Generate a public case identifier: "WB", the current UTC year, and a
/// 6-digit zero-padded random number.
pub fn generate_case_id() -> String {
    let year = Utc::now().year();
    let number: u32 = OsRng.gen_range(0..1_000_000);
    format!("WB{}{:06}", year, number)
}

/// Generate an 8-character access code drawn uniformly from the uppercase
/// alphanumeric alphabet.
pub fn generate_access_code() -> String {
    (0..ACCESS_CODE_LENGTH)
        .map(|_| {
            let idx = OsRng.gen_range(0..ACCESS_CODE_CHARSET.len());
            ACCESS_CODE_CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::validation::{ACCESS_CODE_REGEX, CASE_ID_REGEX};
    use std::collections::HashSet;

    #[test]
    fn test_case_id_format() {
        for _ in 0..100 {
            let case_id = generate_case_id();
            assert!(
                CASE_ID_REGEX.is_match(&case_id),
                "unexpected case id format: {}",
                case_id
            );
        }
    }

    #[test]
    fn test_case_id_embeds_current_year() {
        let year = Utc::now().year().to_string();
        let case_id = generate_case_id();
        assert_eq!(&case_id[2..6], year);
    }

    #[test]
    fn test_access_code_format() {
        for _ in 0..100 {
            let code = generate_access_code();
            assert!(
                ACCESS_CODE_REGEX.is_match(&code),
                "unexpected access code format: {}",
                code
            );
        }
    }

    #[test]
    fn test_access_codes_are_distinct() {
        // 100 draws from a 36^8 space; a repeat would indicate a broken RNG
        let codes: HashSet<String> = (0..100).map(|_| generate_access_code()).collect();
        assert_eq!(codes.len(), 100);
    }
}
