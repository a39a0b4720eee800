//! Utility functions and helpers

use sha2::{Digest, Sha256};

/// Group the digits of an integer into thousands using `separator`.
///
/// The sign, if any, stays in front of the grouped digits.
pub fn group_thousands(n: i128, separator: &str) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut result = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push_str(&separator.chars().rev().collect::<String>());
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

/// SHA-256 of the given parts as lowercase hex.
///
/// Each part is length-prefixed, so `["ab", "c"]` and `["a", "bc"]` differ.
pub fn fingerprint<I, P>(parts: I) -> String
where
    I: IntoIterator<Item = P>,
    P: AsRef<[u8]>,
{
    let mut hasher = Sha256::new();
    for part in parts {
        let part = part.as_ref();
        hasher.update((part.len() as u64).to_le_bytes());
        hasher.update(part);
    }
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Fingerprint of a byte buffer, used to detect a changed ledger source.
pub fn content_fingerprint(content: &[u8]) -> String {
    fingerprint([content])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0, ","), "0");
        assert_eq!(group_thousands(999, ","), "999");
        assert_eq!(group_thousands(1000, ","), "1,000");
        assert_eq!(group_thousands(1234567, ","), "1,234,567");
        assert_eq!(group_thousands(-1500, ","), "-1,500");
        assert_eq!(group_thousands(-100, ","), "-100");
    }

    #[test]
    fn test_group_thousands_custom_separator() {
        assert_eq!(group_thousands(1234567, "."), "1.234.567");
        assert_eq!(group_thousands(1234567, " "), "1 234 567");
    }

    #[test]
    fn test_content_fingerprint() {
        let a = content_fingerprint(b"Date,Account Type\n");
        let b = content_fingerprint(b"Date,Account Type\n");
        let c = content_fingerprint(b"Date,Account Type\r\n");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|ch| ch.is_ascii_hexdigit()));
    }

    #[test]
    fn test_fingerprint_parts_are_delimited() {
        assert_ne!(fingerprint(["ab", "c"]), fingerprint(["a", "bc"]));
        assert_eq!(fingerprint(["ab", "c"]), fingerprint(["ab", "c"]));
        assert_eq!(
            content_fingerprint(b""),
            fingerprint([b"" as &[u8]]),
        );
    }
}
