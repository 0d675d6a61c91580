//! Error types for chainsplit.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("I/O error: {0}")] Io(String),
    #[error("serialization: {0}")] Serialization(String),
    #[error("corrupted entry: {0}")] CorruptedEntry(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChainError {
    #[error(transparent)] Store(#[from] StoreError),
    #[error("total must be finite, got {0}")] NonFiniteTotal(f64),
    #[error("participant id space exhausted")] IdsExhausted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_corrupted_entry() {
        let e = StoreError::CorruptedEntry("not an array".into());
        assert_eq!(e.to_string(), "corrupted entry: not an array");
    }

    #[test]
    fn display_non_finite_total() {
        let e = ChainError::NonFiniteTotal(f64::INFINITY);
        assert_eq!(e.to_string(), "total must be finite, got inf");
    }

    #[test]
    fn display_ids_exhausted() {
        assert_eq!(ChainError::IdsExhausted.to_string(), "participant id space exhausted");
    }

    #[test]
    fn from_store_error_is_transparent() {
        let e: ChainError = StoreError::Io("disk full".into()).into();
        assert_eq!(e, ChainError::Store(StoreError::Io("disk full".into())));
        assert_eq!(e.to_string(), "I/O error: disk full");
    }
}
