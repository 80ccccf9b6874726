//! Secret code generation
//!
//! Codes let a user retrieve a file without walking the folder tree. Each
//! is drawn uniformly from uppercase letters and digits, rejection-sampled
//! against the existing catalog keys; the key space is sparse enough that
//! the loop terminates almost surely.

use rand::Rng;
use std::collections::BTreeMap;

use crate::catalog::records::FileRecord;

/// Alphabet codes are drawn from
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default code length
pub const CODE_LENGTH: usize = 6;

/// Generate a fresh code of the given length, unique among `existing` keys.
pub fn generate_code(existing: &BTreeMap<String, FileRecord>, length: usize) -> String {
    let mut rng = rand::thread_rng();
    loop {
        let code: String = (0..length)
            .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
            .collect();
        if !existing.contains_key(&code) {
            return code;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_length_and_alphabet() {
        let existing = BTreeMap::new();
        for _ in 0..50 {
            let code = generate_code(&existing, CODE_LENGTH);
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_collision_rejection() {
        let mut existing = BTreeMap::new();
        // Occupy a one-character key space almost entirely; generation must
        // land on the single free key.
        for b in CODE_ALPHABET.iter().skip(1) {
            existing.insert(
                (*b as char).to_string(),
                FileRecord {
                    path: String::new(),
                    owner_id: String::new(),
                    name: String::new(),
                    folder: "/".to_string(),
                },
            );
        }
        let code = generate_code(&existing, 1);
        assert_eq!(code, (CODE_ALPHABET[0] as char).to_string());
    }
}
