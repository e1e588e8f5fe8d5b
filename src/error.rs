use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested length is outside the range the generator accepts.
    /// Callers are expected to clamp before reaching the core.
    #[error("Invalid password length {length} (must be between {min} and {max})")]
    InvalidLength {
        length: usize,
        min: usize,
        max: usize,
    },
}
