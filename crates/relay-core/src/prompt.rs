//! Prompt fingerprinting, so logs show which preamble a process is running.

use sha2::{Digest, Sha256};

/// Length of the short fingerprint written to logs.
const SHORT_FINGERPRINT_LEN: usize = 12;

/// SHA-256 of a prompt as lowercase hex, truncated to a log-friendly prefix.
///
/// Pass `full = true` to get all 64 hex characters.
pub fn hash_prompt(prompt: &str, full: bool) -> String {
    let digest = Sha256::digest(prompt.as_bytes());
    let hex: String = digest.iter().map(|byte| format!("{:02x}", byte)).collect();
    if full {
        hex
    } else {
        hex[..SHORT_FINGERPRINT_LEN].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::hash_prompt;

    #[test]
    fn test_fingerprint_is_stable_and_distinct() {
        assert_eq!(hash_prompt("preamble", false), hash_prompt("preamble", false));
        assert_ne!(hash_prompt("preamble", false), hash_prompt("other", false));
    }

    #[test]
    fn test_fingerprint_lengths() {
        assert_eq!(hash_prompt("preamble", false).len(), 12);
        let full = hash_prompt("preamble", true);
        assert_eq!(full.len(), 64);
        assert!(full.starts_with(&hash_prompt("preamble", false)));
    }
}
