/// Durable store errors. A missing row is not an error: lookups return `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store backend error: {message}")]
    Backend { message: String },

    #[error("stored row is corrupt: {details}")]
    Corrupt { details: String },
}
