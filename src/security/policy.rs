use regex::Regex;
use tracing::warn;

/// A directory pattern from the regex allow-list
///
/// Patterns are compiled once when the policy is built. A pattern that does
/// not compile is kept so the configured order is preserved, but it never
/// matches.
#[derive(Debug, Clone)]
pub struct DirectoryPattern {
    source: String,
    compiled: Option<Regex>,
}

impl DirectoryPattern {
    pub fn new(source: &str) -> Self {
        let compiled = match Regex::new(source) {
            Ok(regex) => Some(regex),
            Err(e) => {
                warn!(pattern = source, error = %e, "Ignoring invalid directory regex");
                None
            }
        };

        Self {
            source: source.to_string(),
            compiled,
        }
    }

    /// Unanchored search; the pattern supplies its own `^` or `$` if it wants them.
    pub fn is_match(&self, remainder: &str) -> bool {
        self.compiled
            .as_ref()
            .is_some_and(|regex| regex.is_match(remainder))
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_valid(&self) -> bool {
        self.compiled.is_some()
    }
}

/// Immutable push policy, built once at startup
#[derive(Debug, Clone, Default)]
pub struct Policy {
    protocol_and_domain_allow_list: Vec<String>,
    directory_allow_list: Vec<String>,
    directory_regex_allow_list: Vec<DirectoryPattern>,
    protected_branches: Vec<String>,
}

impl Policy {
    pub fn new<S: AsRef<str>>(
        protocol_and_domain_allow_list: &[S],
        directory_allow_list: &[S],
        directory_regex_allow_list: &[S],
        protected_branches: &[S],
    ) -> Self {
        let owned = |items: &[S]| -> Vec<String> {
            items.iter().map(|s| s.as_ref().to_string()).collect()
        };

        Self {
            protocol_and_domain_allow_list: owned(protocol_and_domain_allow_list),
            directory_allow_list: owned(directory_allow_list),
            directory_regex_allow_list: directory_regex_allow_list
                .iter()
                .map(|s| DirectoryPattern::new(s.as_ref()))
                .collect(),
            protected_branches: owned(protected_branches),
        }
    }

    /// Build a policy from the four comma-separated configuration strings
    pub fn from_comma_lists(
        protocol_and_domain_allow_list: &str,
        directory_allow_list: &str,
        directory_regex_allow_list: &str,
        protected_branches: &str,
    ) -> Self {
        Self::new(
            &split_list(protocol_and_domain_allow_list),
            &split_list(directory_allow_list),
            &split_list(directory_regex_allow_list),
            &split_list(protected_branches),
        )
    }

    pub fn protocol_and_domain_allow_list(&self) -> &[String] {
        &self.protocol_and_domain_allow_list
    }

    pub fn directory_allow_list(&self) -> &[String] {
        &self.directory_allow_list
    }

    pub fn directory_regex_allow_list(&self) -> &[DirectoryPattern] {
        &self.directory_regex_allow_list
    }

    pub fn protected_branches(&self) -> &[String] {
        &self.protected_branches
    }

    pub fn is_protected_branch(&self, branch: &str) -> bool {
        self.protected_branches.iter().any(|b| b == branch)
    }
}

/// Split a comma-separated list, dropping empty items
///
/// `""` becomes an empty list rather than a list holding one empty string.
/// An empty protocol prefix would otherwise allow every destination.
pub fn split_list(value: &str) -> Vec<&str> {
    value.split(',').filter(|item| !item.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("a,b,c"), vec!["a", "b", "c"]);
        assert_eq!(split_list("github.com:"), vec!["github.com:"]);
    }

    #[test]
    fn test_split_empty_string_is_empty_list() {
        assert!(split_list("").is_empty());
        assert!(split_list(",,").is_empty());
    }

    #[test]
    fn test_split_keeps_whitespace() {
        assert_eq!(split_list("a, b"), vec!["a", " b"]);
    }

    #[test]
    fn test_from_comma_lists() {
        let policy = Policy::from_comma_lists(
            "github.com:,https://github.com/",
            "my-org",
            "^[a-z]+_corp/",
            "main,release",
        );

        assert_eq!(policy.protocol_and_domain_allow_list().len(), 2);
        assert_eq!(policy.directory_allow_list(), ["my-org"]);
        assert_eq!(policy.directory_regex_allow_list()[0].as_str(), "^[a-z]+_corp/");
        assert!(policy.is_protected_branch("release"));
        assert!(!policy.is_protected_branch("feature"));
    }

    #[test]
    fn test_empty_configuration_has_no_entries() {
        let policy = Policy::from_comma_lists("", "", "", "");
        assert!(policy.protocol_and_domain_allow_list().is_empty());
        assert!(policy.directory_allow_list().is_empty());
        assert!(policy.directory_regex_allow_list().is_empty());
        assert!(policy.protected_branches().is_empty());
    }

    #[test]
    fn test_invalid_pattern_never_matches() {
        let pattern = DirectoryPattern::new("([unclosed");
        assert!(!pattern.is_valid());
        assert!(!pattern.is_match("([unclosed"));
        assert!(!pattern.is_match(""));
    }

    #[test]
    fn test_pattern_is_unanchored() {
        let pattern = DirectoryPattern::new("_corp/");
        assert!(pattern.is_match("team_corp/repo.git"));

        let anchored = DirectoryPattern::new("^_corp/");
        assert!(!anchored.is_match("team_corp/repo.git"));
    }
}
