//! Uncertainty classifier.
//!
//! Decides whether a license issue downgrades to a warning by re-parsing
//! the expression embedded in its message. An issue is uncertain only when
//! every license token is an unresolved free-text reference — text the
//! scanner recognized as license-like but could not match to a known
//! license. Any concretely-known incompatible license keeps it blocking.

use super::{expression_tokens, LicenseFamilies};

/// Prefix the scanner uses for unresolved free-text references.
const UNRESOLVED_PREFIX: &str = "LicenseRef-scancode-";

/// The one unresolved reference that is always blocking on its own:
/// explicitly proprietary text is never merely "uncertain".
const PROPRIETARY_REF: &str = "LicenseRef-scancode-proprietary-license";

/// Returns `true` if the issue should be reported as a warning instead of
/// a blocking error.
pub fn is_uncertain_issue(message: &str, families: &LicenseFamilies) -> bool {
    let expression = if let Some(rest) = after(message, "Incompatible license added:") {
        rest
    } else if message.contains("License deleted:") && message.contains("and license added:") {
        // For license-change issues, only the newly-added expression counts.
        match after(message, "and license added:") {
            Some(rest) => rest,
            None => return false,
        }
    } else {
        // Unrecognized message forms are uncertain exactly when they
        // mention an unresolved reference anywhere.
        return message.contains(UNRESOLVED_PREFIX);
    };

    let tokens = expression_tokens(expression);
    if tokens.is_empty() {
        return false;
    }

    if tokens.len() == 1 && tokens[0] == PROPRIETARY_REF {
        return false;
    }

    tokens
        .iter()
        .all(|t| t.starts_with(UNRESOLVED_PREFIX) && !families.is_permissive_member(t))
}

fn after<'a>(message: &'a str, prefix: &str) -> Option<&'a str> {
    message
        .split_once(prefix)
        .map(|(_, rest)| rest.trim())
}
