//! Classification helpers for raw search queries.

use fedi_core::constants::DEREFERENCEABLE_SCHEMES;
use url::Url;

/// Parse `query` as an absolute `http`/`https` URL with a host.
pub fn dereferenceable_uri(query: &str) -> Option<Url> {
    let uri = Url::parse(query).ok()?;
    if !DEREFERENCEABLE_SCHEMES.contains(&uri.scheme()) {
        return None;
    }
    uri.host_str()?;
    Some(uri)
}

/// `host[:port]` of `uri`, the form instance hosts are configured in.
///
/// The port is only present when it differs from the scheme default.
pub fn authority(uri: &Url) -> String {
    let host = uri.host_str().unwrap_or_default();
    match uri.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}
