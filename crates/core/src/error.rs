use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error returned by catalog operations running against a [`ProductReader`].
///
/// `E` is the reader's own error type, kept intact so the HTTP layer can
/// classify storage failures itself.
///
/// [`ProductReader`]: crate::reader::ProductReader
#[derive(Debug, thiserror::Error)]
pub enum CatalogError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Product store error: {0}")]
    Store(#[source] E),
}
