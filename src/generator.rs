use crate::charset::{Alphabet, build_alphabet};
use crate::config::{Configuration, validate_length};
use crate::error::Result;
use crate::random::RandomSource;
use tracing::debug;
use zeroize::Zeroizing;

/// Draws `length` characters from `alphabet`, uniformly and with replacement.
///
/// An empty alphabet yields an empty password; callers treat that as
/// "nothing to copy". Class coverage is not guaranteed: enabling digits does
/// not mean a digit appears.
///
/// Fails with [`Error::InvalidLength`](crate::Error::InvalidLength) when
/// `length` is outside `[MIN_LENGTH, MAX_LENGTH]`, before looking at the
/// alphabet.
pub fn generate<R: RandomSource>(
    alphabet: &Alphabet,
    length: usize,
    rng: &mut R,
) -> Result<Zeroizing<String>> {
    validate_length(length)?;

    if alphabet.is_empty() {
        debug!(length, "empty alphabet, nothing to generate");
        return Ok(Zeroizing::new(String::new()));
    }

    let chars = alphabet.as_bytes();
    let mut password = Zeroizing::new(String::with_capacity(length));

    for _ in 0..length {
        let index = rng.next_index(chars.len());
        password.push(chars[index] as char);
    }

    debug!(length, alphabet_size = chars.len(), "password generated");

    Ok(password)
}

/// CharsetBuilder followed by PasswordGenerator for one configuration.
pub fn regenerate<R: RandomSource>(
    config: &Configuration,
    rng: &mut R,
) -> Result<Zeroizing<String>> {
    let alphabet = build_alphabet(config.classes);
    generate(&alphabet, config.length, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CharClasses;
    use crate::error::Error;
    use crate::random::KeystreamSource;
    use proptest::prelude::*;

    /// Replays a fixed list of indices, cycling when exhausted.
    struct Scripted {
        indices: Vec<usize>,
        pos: usize,
        calls: usize,
    }

    impl Scripted {
        fn new(indices: Vec<usize>) -> Self {
            Self {
                indices,
                pos: 0,
                calls: 0,
            }
        }
    }

    impl RandomSource for Scripted {
        fn next_index(&mut self, bound: usize) -> usize {
            let index = self.indices[self.pos % self.indices.len()] % bound;
            self.pos += 1;
            self.calls += 1;
            index
        }
    }

    fn only_symbols() -> CharClasses {
        CharClasses {
            symbols: true,
            ..CharClasses::NONE
        }
    }

    #[test]
    fn test_index_maps_to_alphabet_position() {
        let alphabet = build_alphabet(CharClasses::ALL);
        let mut rng = Scripted::new(vec![0, 25, 26, 51, 52, 61, 62, 90]);

        let password = generate(&alphabet, 8, &mut rng).unwrap();
        assert_eq!(*password, "AZaz09!=");
    }

    #[test]
    fn test_one_draw_per_character() {
        let alphabet = build_alphabet(CharClasses::default());
        let mut rng = Scripted::new(vec![3]);

        let password = generate(&alphabet, 20, &mut rng).unwrap();
        assert_eq!(rng.calls, 20);
        assert_eq!(*password, "DDDDDDDDDDDDDDDDDDDD");
    }

    #[test]
    fn test_empty_alphabet_yields_empty_password() {
        let alphabet = build_alphabet(CharClasses::NONE);
        let mut rng = Scripted::new(vec![0]);

        let password = generate(&alphabet, 12, &mut rng).unwrap();
        assert!(password.is_empty());
        assert_eq!(rng.calls, 0);
    }

    #[test]
    fn test_invalid_length_rejected() {
        let alphabet = build_alphabet(CharClasses::ALL);
        let mut rng = KeystreamSource::from_u64(0);

        for length in [0usize, 7, 33, 1000] {
            let result = generate(&alphabet, length, &mut rng);
            assert_eq!(
                result.map(|p| p.to_string()),
                Err(Error::InvalidLength {
                    length,
                    min: 8,
                    max: 32
                })
            );
        }
    }

    #[test]
    fn test_invalid_length_rejected_with_empty_alphabet() {
        let alphabet = build_alphabet(CharClasses::NONE);
        let mut rng = KeystreamSource::from_u64(0);
        assert!(generate(&alphabet, 4, &mut rng).is_err());
    }

    #[test]
    fn test_password_length() {
        let alphabet = build_alphabet(CharClasses::ALL);
        let mut rng = KeystreamSource::from_u64(42);

        for length in [8usize, 16, 20, 32] {
            let password = generate(&alphabet, length, &mut rng).unwrap();
            assert_eq!(password.len(), length);
        }
    }

    #[test]
    fn test_password_deterministic_with_seed() {
        let config = Configuration::new(32, CharClasses::ALL);

        let password1 = regenerate(&config, &mut KeystreamSource::from_u64(42)).unwrap();
        let password2 = regenerate(&config, &mut KeystreamSource::from_u64(42)).unwrap();
        assert_eq!(*password1, *password2);

        let password3 = regenerate(&config, &mut KeystreamSource::from_u64(43)).unwrap();
        assert_ne!(*password1, *password3);
    }

    #[test]
    fn test_regenerate_consumes_fresh_randomness() {
        let config = Configuration::default();
        let mut rng = KeystreamSource::from_u64(5);

        let first = regenerate(&config, &mut rng).unwrap();
        let second = regenerate(&config, &mut rng).unwrap();
        assert_ne!(*first, *second);
    }

    #[test]
    fn test_symbols_only_scenario() {
        let config = Configuration::new(8, only_symbols());
        let alphabet = build_alphabet(config.classes);
        assert_eq!(alphabet.len(), 29);

        let password = regenerate(&config, &mut KeystreamSource::from_u64(9)).unwrap();
        assert_eq!(password.len(), 8);
        for ch in password.chars() {
            assert!(
                crate::charset::SYMBOLS.contains(&(ch as u8)),
                "Password contains invalid character: \"{}\"",
                ch
            );
        }
    }

    fn any_classes() -> impl Strategy<Value = CharClasses> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(uppercase, lowercase, digits, symbols)| CharClasses {
                uppercase,
                lowercase,
                digits,
                symbols,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_characters_come_from_alphabet(
            classes in any_classes(),
            length in 8usize..=32,
            seed in any::<u64>(),
        ) {
            let alphabet = build_alphabet(classes);
            let password = generate(&alphabet, length, &mut KeystreamSource::from_u64(seed)).unwrap();

            if classes.is_empty() {
                prop_assert!(password.is_empty());
            } else {
                prop_assert_eq!(password.chars().count(), length);
                for ch in password.chars() {
                    prop_assert!(alphabet.contains(ch));
                }
            }
        }

        #[test]
        fn prop_same_seed_same_password(
            classes in any_classes(),
            length in 8usize..=32,
            seed in any::<u64>(),
        ) {
            let config = Configuration::new(length, classes);
            let a = regenerate(&config, &mut KeystreamSource::from_u64(seed)).unwrap();
            let b = regenerate(&config, &mut KeystreamSource::from_u64(seed)).unwrap();
            prop_assert_eq!(&*a, &*b);
        }
    }
}
