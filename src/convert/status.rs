//! Health state normalization.

use sapmon_types::HealthState;

/// Severity code for a sapcontrol health token.
///
/// `GREEN`→0, `YELLOW`→1, `RED`→2, `GRAY`→3, anything else →-1. One bad
/// token must not stop a conversion, so there is no error case.
///
/// The mappers never see raw tokens: the reader already parsed them into
/// [`HealthState`], and records take [`HealthState::severity`] directly.
/// This is the entry point for library callers holding an unparsed token.
pub fn normalize(state: &str) -> i64 {
    HealthState::from_token(state).severity()
}
