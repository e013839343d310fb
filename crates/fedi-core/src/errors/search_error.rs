/// Errors raised by the search entry point itself.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search query was empty string after trimming space")]
    EmptyQuery,

    #[error("search cancelled before any result was found")]
    Cancelled,
}
