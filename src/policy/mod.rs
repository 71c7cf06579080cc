//! Policy engines: allow-list resolution, license and copyright evaluation,
//! uncertainty classification.

pub mod copyright;
pub mod families;
pub mod license;
pub mod uncertainty;

use indexmap::IndexSet;

pub use copyright::CopyrightChecker;
pub use families::LicenseFamilies;
pub use license::LicenseChecker;

/// The allow-list of SPDX identifiers for one run.
///
/// Ordered and unique so that report messages are deterministic.
#[derive(Debug, Clone)]
pub struct LicensePolicy {
    pub allowed: IndexSet<String>,
}

impl LicensePolicy {
    /// Resolve the allow-list from a repository's declared license.
    ///
    /// A declared license belonging to the permissive family allows the
    /// whole family (intra-family relicensing needs no flags); likewise for
    /// the copyleft family. Anything else allows only itself.
    pub fn resolve(declared: &str, families: &LicenseFamilies) -> Self {
        let allowed: IndexSet<String> = if families.is_permissive_member(declared) {
            families.permissive.iter().cloned().collect()
        } else if families.is_copyleft_member(declared) {
            families.copyleft.iter().cloned().collect()
        } else {
            IndexSet::from([declared.to_string()])
        };
        Self { allowed }
    }

    /// Whether a single license identifier is on the allow-list.
    pub fn allows(&self, license: &str) -> bool {
        self.allowed.contains(license)
    }
}

/// Split an SPDX-style expression into bare license tokens.
///
/// Parentheses, brackets, and quotes are stripped before splitting on the
/// AND/OR connectives, so tokens survive both plain expressions and the
/// list-style renderings that appear inside issue messages.
pub(crate) fn expression_tokens(expression: &str) -> Vec<String> {
    let cleaned: String = expression
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '[' | ']' | '\'' | '"'))
        .collect();

    let mut tokens = Vec::new();
    for part in cleaned.split(" AND ") {
        for lic in part.split(" OR ") {
            let lic = lic.trim();
            if !lic.is_empty() {
                tokens.push(lic.to_string());
            }
        }
    }
    tokens
}
