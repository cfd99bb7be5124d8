//! Password generation
//!
//! Characters are drawn independently and uniformly, with replacement, from
//! the concatenated charset of the selected classes. Randomness comes from
//! the operating system CSPRNG; indices are drawn by rejection sampling so
//! every character is equally likely.

use rand_core::{CryptoRng, OsRng, RngCore};
use tracing::debug;

use crate::error::EngineError;
use crate::models::{CharsetFlags, GeneratedPassword, PasswordSpec, SecretString};

/// Concatenate the selected classes in their fixed order
pub fn charset(flags: CharsetFlags) -> Result<Vec<char>, EngineError> {
    if flags.is_empty() {
        return Err(EngineError::NoCharsetSelected);
    }
    Ok(flags.iter().flat_map(|class| class.chars().chars()).collect())
}

/// Entropy of a uniformly random password, in bits
pub fn entropy_bits(length: usize, charset_size: usize) -> f64 {
    if charset_size == 0 {
        return 0.0;
    }
    length as f64 * (charset_size as f64).log2()
}

/// Generate a password using the OS random source
pub fn generate_password(spec: &PasswordSpec) -> Result<GeneratedPassword, EngineError> {
    generate_password_with(spec, &mut OsRng)
}

/// Generate a password using the given cryptographic RNG
pub fn generate_password_with<R>(
    spec: &PasswordSpec,
    rng: &mut R,
) -> Result<GeneratedPassword, EngineError>
where
    R: RngCore + CryptoRng,
{
    let chars = charset(spec.charsets)?;

    let password: String = (0..spec.length)
        .map(|_| chars[sample_index(rng, chars.len())])
        .collect();

    let entropy = entropy_bits(spec.length, chars.len());
    debug!(
        length = spec.length,
        charset_size = chars.len(),
        entropy_bits = entropy,
        "generated password"
    );

    Ok(GeneratedPassword {
        password: SecretString::new(password),
        charset_size: chars.len(),
        entropy_bits: entropy,
    })
}

/// Uniform index in `0..len` without modulo bias
fn sample_index<R: RngCore>(rng: &mut R, len: usize) -> usize {
    debug_assert!(len > 0 && len <= u32::MAX as usize);
    let bound = len as u32;
    // Values below `threshold` would over-represent the low residues
    let threshold = bound.wrapping_neg() % bound;
    loop {
        let x = rng.next_u32();
        if x >= threshold {
            return (x % bound) as usize;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::password::SYMBOLS;
    use crate::models::CharClass;

    /// Deterministic counter RNG for exercising the sampler
    struct CountingRng(u32);

    impl RngCore for CountingRng {
        fn next_u32(&mut self) -> u32 {
            let v = self.0;
            self.0 = self.0.wrapping_add(1);
            v
        }

        fn next_u64(&mut self) -> u64 {
            self.next_u32() as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for b in dest {
                *b = self.next_u32() as u8;
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl CryptoRng for CountingRng {}

    #[test]
    fn test_digits_only() {
        let spec = PasswordSpec::new(12, CharsetFlags::empty().with(CharClass::Digit));
        let generated = generate_password(&spec).unwrap();
        assert_eq!(generated.password.len(), 12);
        assert!(generated.password.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(generated.charset_size, 10);
    }

    #[test]
    fn test_no_charset_fails() {
        for length in [0, 8, 64] {
            let spec = PasswordSpec::new(length, CharsetFlags::empty());
            assert_eq!(
                generate_password(&spec).unwrap_err(),
                EngineError::NoCharsetSelected
            );
        }
    }

    #[test]
    fn test_charset_order_and_size() {
        let all = charset(CharsetFlags::all()).unwrap();
        assert_eq!(all.len(), 26 + 26 + 10 + 32);
        assert_eq!(all[0], 'A');
        assert_eq!(all[26], 'a');
        assert_eq!(all[52], '0');
        assert_eq!(all[62], SYMBOLS.chars().next().unwrap());
    }

    #[test]
    fn test_only_selected_classes_used() {
        let spec = PasswordSpec::new(
            64,
            CharsetFlags::empty()
                .with(CharClass::Upper)
                .with(CharClass::Symbol),
        );
        let generated = generate_password(&spec).unwrap();
        assert!(generated
            .password
            .chars()
            .all(|c| c.is_ascii_uppercase() || SYMBOLS.contains(c)));
    }

    #[test]
    fn test_counting_rng_walks_charset() {
        let spec = PasswordSpec::new(10, CharsetFlags::empty().with(CharClass::Digit));
        let generated = generate_password_with(&spec, &mut CountingRng(10)).unwrap();
        assert_eq!(generated.password.expose(), "0123456789");
    }

    #[test]
    fn test_rejection_skips_biased_values() {
        // For bound 10, threshold is 2^32 % 10 = 6, so 0..=5 are rejected
        let mut rng = CountingRng(0);
        assert_eq!(sample_index(&mut rng, 10), 6);
    }

    #[test]
    fn test_entropy() {
        assert_eq!(entropy_bits(0, 10), 0.0);
        assert_eq!(entropy_bits(10, 0), 0.0);
        assert!((entropy_bits(12, 94) - 78.66).abs() < 0.01);
        assert!((entropy_bits(8, 2) - 8.0).abs() < 1e-12);
    }
}
