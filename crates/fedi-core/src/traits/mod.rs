mod converter;
mod fetcher;
mod store;

pub use converter::ITypeConverter;
pub use fetcher::{FetchOptions, FetchTarget, IRemoteFetcher};
pub use store::ILocalStore;
