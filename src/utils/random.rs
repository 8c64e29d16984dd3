use rand::{distr::Alphanumeric, Rng};

/// Generates a random alphanumeric string of the specified length.
pub fn generate_random_string(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect::<String>()
}

/// Generates an uppercase alphanumeric reference code.
///
/// Used for certificate verification codes and referral codes, which are
/// compared case-insensitively and stored uppercase.
pub fn generate_reference_code(length: usize) -> String {
    generate_random_string(length).to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_code_is_uppercase_alphanumeric() {
        let code = generate_reference_code(8);
        assert_eq!(code.len(), 8);
        assert!(
            code.chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn random_strings_do_not_collide() {
        use std::collections::HashSet;

        let mut seen = HashSet::new();
        for _ in 0..1000 {
            seen.insert(generate_reference_code(8));
        }
        // 36^8 keyspace, 1000 draws
        assert_eq!(seen.len(), 1000);
    }
}
