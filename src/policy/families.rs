//! License family tables.
//!
//! Immutable configuration data injected into the policy engines, so tests
//! can supply alternate tables. Membership follows the compliance policy's
//! approved lists; identifiers are exact SPDX strings as emitted by the
//! scanner, including `LicenseRef-` entries.

/// Licenses pre-approved as compliance-safe by default policy.
const PERMISSIVE: &[&str] = &[
    "BSD-3-Clause",
    "MIT",
    "Apache-1.0",
    "Apache-1.1",
    "Apache-2.0",
    "BSD-3-Clause-Clear",
    "FreeBSD-DOC",
    "Zlib",
    "BSD-1-Clause",
    "BSD-2-Clause",
    "BSD-2-Clause-first-lines",
    "BSD-2-Clause-Views",
    "BSD-3-Clause-Sun",
    "BSD-4-Clause-Shortened",
    "BSD-3-Clause-Attribution",
    "BSD-4-Clause",
    "ISC",
    "CC0-1.0",
    "ICU",
    "LicenseRef-scancode-unicode",
];

/// Reciprocal-obligation licenses, approved as their own family.
const COPYLEFT: &[&str] = &[
    "GPL-1.0-only",
    "GPL-1.0-or-later",
    "GPL-2.0-only",
    "GPL-2.0-or-later",
    "GPL-3.0-only",
    "GPL-3.0",
    "GPL-3.0-or-later",
    "AGPL-3.0",
    "LGPL-3.0",
    "GPL-2.0",
    "GPL-2.0+",
    "GPL-2.0-only WITH Linux-syscall-note",
    "AGPL-1.0-only",
    "AGPL-1.0-or-later",
    "LicenseRef-scancode-agpl-2.0",
    "AGPL-3.0-only",
    "AGPL-3.0-or-later",
];

/// The permissive and copyleft family tables.
#[derive(Debug, Clone)]
pub struct LicenseFamilies {
    pub permissive: Vec<String>,
    pub copyleft: Vec<String>,
}

impl Default for LicenseFamilies {
    fn default() -> Self {
        Self {
            permissive: PERMISSIVE.iter().map(|s| s.to_string()).collect(),
            copyleft: COPYLEFT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl LicenseFamilies {
    pub fn is_permissive_member(&self, license: &str) -> bool {
        self.permissive.iter().any(|l| l == license)
    }

    pub fn is_copyleft_member(&self, license: &str) -> bool {
        self.copyleft.iter().any(|l| l == license)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_membership() {
        let families = LicenseFamilies::default();
        assert!(families.is_permissive_member("MIT"));
        assert!(families.is_permissive_member("BSD-3-Clause-Clear"));
        assert!(families.is_permissive_member("LicenseRef-scancode-unicode"));
        assert!(families.is_copyleft_member("GPL-2.0-only"));
        assert!(!families.is_permissive_member("GPL-2.0-only"));
        assert!(!families.is_copyleft_member("MIT"));
    }

    #[test]
    fn gpl3_entries_are_distinct() {
        let families = LicenseFamilies::default();
        assert!(families.is_copyleft_member("GPL-3.0-only"));
        assert!(families.is_copyleft_member("GPL-3.0"));
        assert!(!families.is_copyleft_member("GPL-3.0-onlyGPL-3.0"));
    }
}
