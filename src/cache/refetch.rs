//! Query cache that refetches invalidated organization data

use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use crate::api::{ApiClient, Organization};
use crate::error::{InviteError, Result};

use super::{MemoryQueryCache, QueryCache, QueryKey, QueryPredicate};

/// Memory cache that reloads the organizations listing when it is invalidated
pub struct RefetchingQueryCache {
    client: Arc<ApiClient>,
    entries: MemoryQueryCache,
}

impl RefetchingQueryCache {
    pub fn new(client: Arc<ApiClient>) -> Self {
        let entries = MemoryQueryCache::new();
        entries.register(QueryKey::organizations());
        Self { client, entries }
    }

    /// Last fetched organizations (empty until a refetch has run)
    pub fn organizations(&self) -> Vec<Organization> {
        self.entries
            .get(&QueryKey::organizations())
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }

    async fn refetch(&self, key: &QueryKey) -> Result<()> {
        if *key != QueryKey::organizations() {
            debug!("No fetcher for {}, left stale", key);
            return Ok(());
        }

        let organizations = self.client.get_organizations().await.map_err(|e| {
            InviteError::Cache(format!("Failed to refetch organizations: {}", e))
        })?;
        let value = serde_json::to_value(&organizations)?;
        self.entries.insert(key.clone(), value);
        Ok(())
    }
}

#[async_trait]
impl QueryCache for RefetchingQueryCache {
    async fn invalidate_matching(&self, predicate: QueryPredicate<'_>) -> Result<usize> {
        let matched = self.entries.mark_stale(predicate);
        for key in &matched {
            self.refetch(key).await?;
        }
        debug!("Invalidated and refetched {} cached queries", matched.len());
        Ok(matched.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::is_organization_query;
    use crate::session::Credential;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_refetches_organizations_with_current_authorization() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/organizations"))
            .and(header("Authorization", "Bearer session-xyz"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": "org-1", "name": "Acme" }
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = Arc::new(ApiClient::new(mock_server.uri()));
        client.set_authorization(&Credential::new("session-xyz"));
        let cache = RefetchingQueryCache::new(client);

        let count = cache
            .invalidate_matching(&is_organization_query)
            .await
            .unwrap();

        assert_eq!(count, 1);
        let orgs = cache.organizations();
        assert_eq!(orgs.len(), 1);
        assert_eq!(orgs[0].name, "Acme");
    }

    #[tokio::test]
    async fn test_non_matching_predicate_makes_no_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let cache = RefetchingQueryCache::new(Arc::new(ApiClient::new(mock_server.uri())));
        let count = cache.invalidate_matching(&|_: &QueryKey| false).await.unwrap();
        assert_eq!(count, 0);
        assert!(cache.organizations().is_empty());
    }

    #[tokio::test]
    async fn test_refetch_failure_is_cache_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/organizations"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let cache = RefetchingQueryCache::new(Arc::new(ApiClient::new(mock_server.uri())));
        let err = cache
            .invalidate_matching(&is_organization_query)
            .await
            .unwrap_err();
        assert!(matches!(err, InviteError::Cache(_)));
    }
}
