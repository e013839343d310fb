//! Error policy table for the sub-calls a search makes.
//!
//! Each collaborator call has one fixed policy. Cancellation overrides the
//! table and always propagates.

use crate::errors::FediError;

/// A collaborator call made while resolving or filtering a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubCall {
    QueryValidation,
    LocalLookup,
    RemoteFetch,
    ThreadBackfill,
    BlockCheck,
    StatusVisibility,
    ApiConversion,
}

/// What to do with an error returned by a sub-call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Abort the whole operation.
    Propagate,
    /// Log and carry on as if the call succeeded.
    LogAndContinue,
    /// Log and treat the candidate as absent.
    LogAsNotFound,
}

/// The full table, one row per [`SubCall`] in declaration order.
pub const POLICY_TABLE: [(SubCall, ErrorPolicy); 7] = [
    (SubCall::QueryValidation, ErrorPolicy::Propagate),
    (SubCall::LocalLookup, ErrorPolicy::LogAsNotFound),
    (SubCall::RemoteFetch, ErrorPolicy::LogAsNotFound),
    (SubCall::ThreadBackfill, ErrorPolicy::LogAndContinue),
    (SubCall::BlockCheck, ErrorPolicy::LogAsNotFound),
    (SubCall::StatusVisibility, ErrorPolicy::LogAsNotFound),
    (SubCall::ApiConversion, ErrorPolicy::LogAsNotFound),
];

// Rows are indexed by discriminant.
const _: () = {
    let mut row = 0;
    while row < POLICY_TABLE.len() {
        assert!(POLICY_TABLE[row].0 as usize == row);
        row += 1;
    }
};

impl SubCall {
    /// This call's row of [`POLICY_TABLE`].
    pub const fn policy(self) -> ErrorPolicy {
        POLICY_TABLE[self as usize].1
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SubCall::QueryValidation => "query_validation",
            SubCall::LocalLookup => "local_lookup",
            SubCall::RemoteFetch => "remote_fetch",
            SubCall::ThreadBackfill => "thread_backfill",
            SubCall::BlockCheck => "block_check",
            SubCall::StatusVisibility => "status_visibility",
            SubCall::ApiConversion => "api_conversion",
        }
    }
}

/// Policy for `err` raised by `call`.
pub fn policy_for(call: SubCall, err: &FediError) -> ErrorPolicy {
    if err.is_cancelled() {
        ErrorPolicy::Propagate
    } else {
        call.policy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{FetchError, SearchError};

    #[test]
    fn policy_reads_the_table() {
        assert_eq!(SubCall::QueryValidation.policy(), ErrorPolicy::Propagate);
        assert_eq!(SubCall::ThreadBackfill.policy(), ErrorPolicy::LogAndContinue);
        assert_eq!(SubCall::ApiConversion.policy(), ErrorPolicy::LogAsNotFound);
    }

    #[test]
    fn only_validation_propagates_ordinary_errors() {
        let err: FediError = FetchError::NotFound {
            target: "x".into(),
        }
        .into();
        for (call, _) in POLICY_TABLE {
            let propagates = policy_for(call, &err) == ErrorPolicy::Propagate;
            assert_eq!(propagates, call == SubCall::QueryValidation);
        }
    }

    #[test]
    fn cancellation_always_propagates() {
        let err: FediError = SearchError::Cancelled.into();
        for (call, _) in POLICY_TABLE {
            assert_eq!(policy_for(call, &err), ErrorPolicy::Propagate);
        }
    }
}
