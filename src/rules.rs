/*!
 * Ignore rules and path classification
 */

use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use glob_match::glob_match;

use crate::utils::{DEFAULT_IGNORE, SOURCE_ROOTS};

/// Characters that route a rule to the wildcard collection
const GLOB_META: [char; 3] = ['*', '?', '['];

/// Ignore rules split into exact and wildcard collections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreRuleSet {
    exact: BTreeSet<String>,
    wildcard: BTreeSet<String>,
}

impl IgnoreRuleSet {
    /// Build a rule set from raw rule strings
    pub fn new<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        set.extend(rules);
        set
    }

    /// The built-in rule list
    pub fn defaults() -> Self {
        Self::new(DEFAULT_IGNORE.iter().copied())
    }

    /// Add more rules, routing each to exactly one collection
    pub fn extend<I, S>(&mut self, rules: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for rule in rules {
            let rule = rule.into();
            if rule.is_empty() {
                continue;
            }
            if rule.contains(GLOB_META) {
                self.wildcard.insert(rule);
            } else {
                self.exact.insert(rule);
            }
        }
    }

    /// Rules compared for equality against segments or the full path
    pub fn exact(&self) -> impl Iterator<Item = &str> {
        self.exact.iter().map(String::as_str)
    }

    /// Glob rules compared against base names and full paths
    pub fn wildcard(&self) -> impl Iterator<Item = &str> {
        self.wildcard.iter().map(String::as_str)
    }

    /// Total number of rules
    pub fn len(&self) -> usize {
        self.exact.len() + self.wildcard.len()
    }

    /// Whether the set holds no rules at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decides whether a path below the project root is kept
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    root: PathBuf,
    rules: IgnoreRuleSet,
}

impl PatternMatcher {
    /// Create a matcher for `root`; `root` should already be canonical
    pub fn new(root: impl Into<PathBuf>, rules: IgnoreRuleSet) -> Self {
        Self {
            root: root.into(),
            rules,
        }
    }

    /// Project root the matcher resolves paths against
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Rules in use
    pub fn rules(&self) -> &IgnoreRuleSet {
        &self.rules
    }

    /// Check if a path should be ignored, asking the filesystem whether it is a file
    pub fn should_ignore(&self, path: &Path) -> bool {
        let is_file = fs::metadata(path).map(|m| m.is_file()).unwrap_or(false);
        self.should_ignore_kind(path, is_file)
    }

    /// Check if a path should be ignored when the caller already knows its kind
    pub fn should_ignore_kind(&self, path: &Path, is_file: bool) -> bool {
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return true;
        };

        let parts: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        if parts.is_empty() {
            return false;
        }

        let relative_str = parts.join("/");

        if self.rules.exact.contains(&relative_str) {
            return true;
        }

        if parts.iter().any(|part| self.rules.exact.contains(part)) {
            return !(is_file && is_source_cjs(path, &parts[0]));
        }

        let name = &parts[parts.len() - 1];
        if self.rules.wildcard().any(|pattern| glob_match(pattern, name)) {
            return true;
        }

        self.rules
            .wildcard()
            .any(|pattern| glob_match(pattern, &relative_str))
    }
}

/// `.cjs` files under one of the source roots
fn is_source_cjs(path: &Path, first_segment: &str) -> bool {
    let is_cjs = path
        .extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("cjs"))
        .unwrap_or(false);
    is_cjs && SOURCE_ROOTS.contains(&first_segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(rules: &[&str]) -> PatternMatcher {
        PatternMatcher::new("/project", IgnoreRuleSet::new(rules.iter().copied()))
    }

    #[test]
    fn test_rules_are_routed_by_wildcard() {
        let rules = IgnoreRuleSet::new(["node_modules", "*.png", "out/*", "a?c", "[ab].txt"]);
        assert_eq!(rules.exact().collect::<Vec<_>>(), vec!["node_modules"]);
        assert_eq!(rules.wildcard().count(), 4);
        assert_eq!(rules.len(), 5);
    }

    #[test]
    fn test_paths_outside_root_are_ignored() {
        let m = matcher(&[]);
        assert!(m.should_ignore_kind(Path::new("/elsewhere/file.rs"), true));
        assert!(m.should_ignore_kind(Path::new("/projectx/file.rs"), true));
        assert!(m.should_ignore_kind(Path::new("relative/file.rs"), true));
    }

    #[test]
    fn test_root_is_never_ignored() {
        let m = matcher(&["project", "*"]);
        assert!(!m.should_ignore_kind(Path::new("/project"), false));
    }

    #[test]
    fn test_exact_full_relative_path() {
        let m = matcher(&["docs/generated.md"]);
        assert!(m.should_ignore_kind(Path::new("/project/docs/generated.md"), true));
        assert!(!m.should_ignore_kind(Path::new("/project/docs/other.md"), true));
    }

    #[test]
    fn test_exact_rule_matches_any_segment() {
        let m = matcher(&["node_modules"]);
        assert!(m.should_ignore_kind(Path::new("/project/node_modules"), false));
        assert!(m.should_ignore_kind(Path::new("/project/node_modules/x.js"), true));
        assert!(m.should_ignore_kind(Path::new("/project/web/node_modules/y/z.js"), true));
        assert!(!m.should_ignore_kind(Path::new("/project/node_modules_backup"), false));
    }

    #[test]
    fn test_cjs_exception_under_source_roots() {
        let m = matcher(&["dist"]);
        assert!(!m.should_ignore_kind(Path::new("/project/electron/dist/main.cjs"), true));
        assert!(!m.should_ignore_kind(Path::new("/project/backend/dist/server.CJS"), true));
        assert!(!m.should_ignore_kind(Path::new("/project/frontend/dist/app.cjs"), true));
        assert!(m.should_ignore_kind(Path::new("/project/other/dist/main.cjs"), true));
        assert!(m.should_ignore_kind(Path::new("/project/electron/dist/main.js"), true));
        // The exception only applies to files
        assert!(m.should_ignore_kind(Path::new("/project/electron/dist/dir.cjs"), false));
    }

    #[test]
    fn test_wildcard_on_base_name() {
        let m = matcher(&["*.png", "*.log"]);
        assert!(m.should_ignore_kind(Path::new("/project/image.png"), true));
        assert!(m.should_ignore_kind(Path::new("/project/assets/sub/image.png"), true));
        assert!(m.should_ignore_kind(Path::new("/project/logs/app.log"), true));
        assert!(!m.should_ignore_kind(Path::new("/project/image.pngx"), true));
    }

    #[test]
    fn test_wildcard_is_case_sensitive() {
        let m = matcher(&["*.png"]);
        assert!(!m.should_ignore_kind(Path::new("/project/assets/sub/image.PNG"), true));
    }

    #[test]
    fn test_wildcard_on_full_relative_path() {
        let m = matcher(&["out/*", "*/package-lock.json"]);
        assert!(m.should_ignore_kind(Path::new("/project/out/bundle.js"), true));
        assert!(!m.should_ignore_kind(Path::new("/project/out"), false));
        assert!(m.should_ignore_kind(Path::new("/project/web/package-lock.json"), true));
        assert!(!m.should_ignore_kind(Path::new("/project/package-lock.json"), true));
    }

    #[test]
    fn test_single_segment_wildcard_prefix() {
        let m = matcher(&["*/.pytest_cache"]);
        assert!(m.should_ignore_kind(Path::new("/project/a/.pytest_cache"), false));
        assert!(!m.should_ignore_kind(Path::new("/project/a/b/.pytest_cache"), false));
        assert!(!m.should_ignore_kind(Path::new("/project/.pytest_cache"), false));
    }

    #[test]
    fn test_default_rules_keep_sources() {
        let m = PatternMatcher::new("/project", IgnoreRuleSet::defaults());
        assert!(!m.should_ignore_kind(Path::new("/project/src/main.rs"), true));
        assert!(!m.should_ignore_kind(Path::new("/project/README.md"), true));
        assert!(m.should_ignore_kind(Path::new("/project/.git"), false));
        assert!(m.should_ignore_kind(Path::new("/project/logo.svg"), true));
    }
}
