// Remote allow-list behaviour across the URL shapes git accepts

use push_guard::config::{EmbeddedConfig, Settings};
use push_guard::{Policy, RemoteMatcher};

fn github_policy() -> Policy {
    Policy::new(
        &[
            "github.com:",
            "git@github.com:",
            "https://github.com/",
            "ssh://git@github.com/",
        ],
        &["allowed-organization", "allowed-user-account"],
        &["^[a-z,0-9]+_allowed_suffix/"],
        &[],
    )
}

#[test]
fn test_remote_matrix() {
    let policy = github_policy();
    let matcher = RemoteMatcher::new(&policy);

    let cases = [
        ("github.com:blocked-organization/test.git", false),
        ("git@github.com:blocked-organization/test.git", false),
        ("gitlab.com:allowed-organization/test.git", false),
        ("git@gitlab.com:allowed-organization/test.git", false),
        ("http://gitlab.com/allowed-organization/test.git", false),
        ("https://gitlab.com/allowed-organization/test.git", false),
        ("git@bitbucket.org:allowed-organization/test.git", false),
        ("https://bitbucket.org/allowed-organization/test.git", false),
        ("https://github.com/allowed-user-account/test.git", true),
        ("https://github.com/allowed-organization/test", true),
        ("github.com:allowed-organization/test.git", true),
        ("github.com:allowed-user-account/test.git", true),
        ("http://github.com/account123_allowed_suffix/test.git", false),
        ("https://github.com/account123_allowed_suffix/test.git", true),
        ("git@github.com:account123_allowed_suffix/test.git", true),
        ("https://github.com/account123_allowed_suffix_test.git", false),
        ("git@github.com:account123/test.git", false),
        ("git@github.com:_allowed_suffix/test.git", false),
        ("git@github.com:allowed-organization/*.git", true),
        ("ssh://git@github.com/allowed-organization/test.git", true),
        ("https://github.com/allowed-organization/private-repo.git", true),
        ("git@github.com:allowed-organization/private-repo.git", true),
    ];

    for (remote, expected) in cases {
        assert_eq!(
            matcher.is_safe(remote),
            expected,
            "Unexpected verdict for remote: {}",
            remote
        );
    }
}

#[test]
fn test_remote_edge_cases() {
    let policy = github_policy();
    let matcher = RemoteMatcher::new(&policy);

    assert!(!matcher.is_safe(""));
    assert!(!matcher.is_safe("ftp://github.com/allowed-organization/test.git"));
    // No colon or scheme
    assert!(!matcher.is_safe("github.com"));
    assert!(!matcher.is_safe("allowed-organization/test.git"));
}

#[test]
fn test_directory_prefix_is_literal() {
    // Directory entries are plain prefixes, so a longer organization name
    // sharing the prefix is also accepted
    let policy = Policy::new(&["github.com:"], &["allowed-org"], &[], &[]);
    let matcher = RemoteMatcher::new(&policy);

    assert!(matcher.is_safe("github.com:allowed-org/repo.git"));
    assert!(matcher.is_safe("github.com:allowed-org-fork/repo.git"));
    assert!(!matcher.is_safe("github.com:other-org/repo.git"));

    let strict = Policy::new(&["github.com:"], &["allowed-org/"], &[], &[]);
    let matcher = RemoteMatcher::new(&strict);
    assert!(!matcher.is_safe("github.com:allowed-org-fork/repo.git"));
}

#[test]
fn test_policy_from_embedded_lists() {
    let embedded = EmbeddedConfig {
        protocol_and_domain_allow_list: "github.com:,https://github.com/",
        directory_allow_list: "allowed-org/",
        directory_regex_allow_list: "^[a-z0-9]+_corp/",
        ..EmbeddedConfig::default()
    };
    let policy = Settings::from_embedded(&embedded).policy();
    let matcher = RemoteMatcher::new(&policy);

    assert!(matcher.is_safe("https://github.com/allowed-org/repo.git"));
    assert!(matcher.is_safe("github.com:team7_corp/repo.git"));
    assert!(!matcher.is_safe("github.com:team7/repo.git"));
}

#[test]
fn test_unconfigured_policy_allows_nothing() {
    let policy = Settings::from_embedded(&EmbeddedConfig::default()).policy();
    let matcher = RemoteMatcher::new(&policy);

    assert!(!matcher.is_safe("https://github.com/allowed-org/repo.git"));
    assert!(!matcher.is_safe(""));
}
