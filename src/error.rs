//! Error types for the gift engine

use thiserror::Error;

/// Main error type for the gift engine
#[derive(Error, Debug)]
pub enum GiftError {
    #[error("Malformed pack data in {pack}: {reason}")]
    MalformedPackData { pack: String, reason: String },

    #[error("Pack {pack} has no gift data")]
    MissingPackData { pack: String },

    #[error("Unresolvable item: {catalog} {name}")]
    UnresolvableItem { catalog: String, name: String },

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for the gift engine
pub type Result<T> = std::result::Result<T, GiftError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceCatalog;

    #[test]
    fn test_unresolvable_item_message() {
        let err = GiftError::UnresolvableItem {
            catalog: SourceCatalog::CatalogA.to_string(),
            name: "Frost Cake".to_string(),
        };
        assert_eq!(err.to_string(), "Unresolvable item: CatalogA Frost Cake");
    }
}
