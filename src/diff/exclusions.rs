//! Path exclusion policy.
//!
//! Two layers: a fixed set of non-source suffixes that are never scanned
//! (patch bundles, build recipes, docs, structured data), and
//! gitignore-style patterns supplied through `[exclusions]` in config.

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use super::DiffError;

/// Suffixes exempt from scanning regardless of configuration.
const EXCLUDED_SUFFIXES: &[&str] = &[".patch", ".bb", ".md", ".json", ".yml"];

/// Decides whether a path is exempt from compliance scanning.
pub struct Exclusions {
    matcher: Gitignore,
}

impl Exclusions {
    /// Build the exclusion matcher from configured gitignore-style patterns.
    pub fn new(patterns: &[String]) -> Result<Self, DiffError> {
        let mut builder = GitignoreBuilder::new("");
        for pattern in patterns {
            builder.add_line(None, pattern)?;
        }
        let matcher = builder.build()?;
        Ok(Self { matcher })
    }

    /// An empty policy that only applies the fixed suffix list.
    pub fn none() -> Self {
        Self {
            matcher: Gitignore::empty(),
        }
    }

    /// Returns `true` if the path must not be scanned.
    pub fn is_excluded(&self, path: &str) -> bool {
        if EXCLUDED_SUFFIXES.iter().any(|s| path.ends_with(s)) {
            return true;
        }
        self.matcher
            .matched_path_or_any_parents(path, false)
            .is_ignore()
    }
}
