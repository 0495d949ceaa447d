use crate::security::policy::Policy;
use tracing::debug;

/// Decides whether a push destination is covered by the allow-lists
///
/// A destination is safe only when a protocol+domain prefix matches and the
/// rest of the string is then matched by a directory prefix or a directory
/// regex. Neither half is enough on its own.
#[derive(Debug, Clone, Copy)]
pub struct RemoteMatcher<'a> {
    policy: &'a Policy,
}

impl<'a> RemoteMatcher<'a> {
    pub fn new(policy: &'a Policy) -> Self {
        Self { policy }
    }

    pub fn is_safe(&self, destination: &str) -> bool {
        for protocol_and_domain in self.policy.protocol_and_domain_allow_list() {
            let Some(remainder) = destination.strip_prefix(protocol_and_domain.as_str()) else {
                continue;
            };

            if self.directory_allowed(remainder) {
                debug!(destination, protocol_and_domain = %protocol_and_domain, "Remote allowed");
                return true;
            }
            // A later entry may share this prefix, keep scanning
        }

        debug!(destination, "Remote not covered by allow-list");
        false
    }

    fn directory_allowed(&self, remainder: &str) -> bool {
        if self
            .policy
            .directory_allow_list()
            .iter()
            .any(|directory| remainder.starts_with(directory.as_str()))
        {
            return true;
        }

        self.policy
            .directory_regex_allow_list()
            .iter()
            .any(|pattern| pattern.is_match(remainder))
    }
}
