/// Crate version, shared by every workspace member.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// URI schemes the search URI strategy will consider.
pub const DEREFERENCEABLE_SCHEMES: [&str; 2] = ["https", "http"];

/// Prefix of a mention namestring.
pub const MENTION_PREFIX: char = '@';

/// Environment variable consulted by the tracing subscriber.
pub const LOG_ENV_VAR: &str = "FEDI_LOG";
