use thiserror::Error;

/// Errors returned by the strict accessors of `SoaMap`
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoaMapError {
    /// `at`/`at_mut` was called with a key that is not in the map
    #[error("key not found")]
    KeyNotFound,

    /// A positional accessor was called with `index >= len`
    #[error("index {index} out of range for map of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, SoaMapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(SoaMapError::KeyNotFound.to_string(), "key not found");
        assert_eq!(
            SoaMapError::IndexOutOfRange { index: 3, len: 2 }.to_string(),
            "index 3 out of range for map of length 2"
        );
    }
}
