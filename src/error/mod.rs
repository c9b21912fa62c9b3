use crate::models::ItemId;
use thiserror::Error;

/// Rejected user input. The `Display` text is what the user is shown.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please add an item")]
    EmptyInput,

    #[error("Item already on the list!")]
    Duplicate(String),

    #[error("No more items can be added")]
    IdsExhausted,
}

/// A row that was expected in the list view could not be found.
///
/// Never fatal: callers log and skip.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingRowError {
    #[error("no row for item {0}")]
    Item(ItemId),

    #[error("row handle is stale")]
    StaleHandle,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("browser storage is unavailable")]
    Unavailable,

    #[error("failed to write key {key}")]
    Write { key: String },

    #[error("malformed json under key {key}: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_are_user_notices() {
        assert_eq!(ValidationError::EmptyInput.to_string(), "Please add an item");
        assert_eq!(
            ValidationError::Duplicate("milk".to_string()).to_string(),
            "Item already on the list!"
        );
    }

    #[test]
    fn test_malformed_error_names_the_key() {
        let source = serde_json::from_str::<Vec<u64>>("{").expect_err("should not parse");
        let err = StorageError::Malformed {
            key: "items".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("malformed json under key items"));
    }
}
