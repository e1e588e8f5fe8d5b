pub mod charset;
pub mod config;
pub mod error;
pub mod generator;
pub mod random;
pub mod strength;

pub use charset::{Alphabet, CharClass, alphabet_size, build_alphabet};
pub use config::{CharClasses, Configuration, DEFAULT_LENGTH, MAX_LENGTH, MIN_LENGTH};
pub use error::{Error, Result};
pub use generator::{generate, regenerate};
pub use random::{KeystreamSource, RandomSource};
pub use strength::{ColorTag, StrengthLabel, StrengthResult, entropy_bits, evaluate};
