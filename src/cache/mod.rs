//! Query cache for server data
//!
//! Entries are keyed by a sequence of path-like segments. The acceptance
//! flow invalidates organization-scoped entries once a new session is
//! active.

mod memory;
mod refetch;

use async_trait::async_trait;
use std::fmt;

use crate::config::api;
use crate::error::Result;

pub use memory::MemoryQueryCache;
pub use refetch::RefetchingQueryCache;

/// Identifier of a cached query
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Key of the organizations listing
    pub fn organizations() -> Self {
        Self::new([api::ORGANIZATIONS])
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// True if any segment equals `segment`
    pub fn contains(&self, segment: &str) -> bool {
        self.0.iter().any(|s| s == segment)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// Predicate over query keys
pub type QueryPredicate<'a> = &'a (dyn Fn(&QueryKey) -> bool + Send + Sync);

/// Matches every query that identifies organization-scoped data
pub fn is_organization_query(key: &QueryKey) -> bool {
    key.contains(api::ORGANIZATIONS)
}

/// Cache of server queries
#[async_trait]
pub trait QueryCache: Send + Sync {
    /// Invalidate every entry whose key matches, returning how many matched
    ///
    /// Resolves once the refetches for matching entries have been triggered.
    /// The predicate runs over a snapshot of the keys present at call time.
    async fn invalidate_matching(&self, predicate: QueryPredicate<'_>) -> Result<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organization_predicate() {
        assert!(is_organization_query(&QueryKey::organizations()));
        assert!(is_organization_query(&QueryKey::new([
            "/v1/organizations",
            "org-1",
            "members"
        ])));
        assert!(!is_organization_query(&QueryKey::new(["/v1/templates"])));
        // Segment match, not substring
        assert!(!is_organization_query(&QueryKey::new([
            "/v1/organizations/org-1"
        ])));
    }

    #[test]
    fn test_query_key_display() {
        let key = QueryKey::new(["/v1/organizations", "org-1"]);
        assert_eq!(key.to_string(), "[/v1/organizations, org-1]");
        assert_eq!(key.segments().len(), 2);
    }
}
