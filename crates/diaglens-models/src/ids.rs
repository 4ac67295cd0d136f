//! Identifier generation for records and messages.

use rand::RngExt;

/// Generate an opaque identifier from the current millisecond timestamp plus
/// a random component, both base-36 encoded.
///
/// Collision probability is negligible for a single-machine store; the ids
/// are not cryptographically secure and make no global uniqueness claim.
pub fn generate_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis().max(0) as u128;
    let random: u64 = rand::rng().random();
    format!("{}{}", to_base36(millis), to_base36(random as u128))
}

fn to_base36(mut value: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base36 digits are ascii")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base36_encoding() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(36 * 36 + 1), "101");
    }

    #[test]
    fn test_generate_id_is_lowercase_alphanumeric() {
        let id = generate_id();
        assert!(!id.is_empty());
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_generate_id_uniqueness() {
        let mut ids: Vec<String> = (0..100).map(|_| generate_id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 100);
    }
}
