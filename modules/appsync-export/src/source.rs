// Listing seam between the export driver and AppSync.
//
// AppSyncClient is the production implementation; testing::MockSource serves
// canned pages so the driver and writer can be exercised without AWS.

use appsync_client::{AppSyncClient, ResolverPage, Result, TypePage};
use async_trait::async_trait;

#[async_trait]
pub trait ResolverSource: Send + Sync {
    /// One page of type names, with the token for the next page if any.
    async fn list_types(&self, api_id: &str, next_token: Option<&str>) -> Result<TypePage>;

    /// One page of resolvers attached to `type_name`.
    async fn list_resolvers(
        &self,
        api_id: &str,
        type_name: &str,
        next_token: Option<&str>,
    ) -> Result<ResolverPage>;
}

#[async_trait]
impl ResolverSource for AppSyncClient {
    async fn list_types(&self, api_id: &str, next_token: Option<&str>) -> Result<TypePage> {
        AppSyncClient::list_types(self, api_id, next_token).await
    }

    async fn list_resolvers(
        &self,
        api_id: &str,
        type_name: &str,
        next_token: Option<&str>,
    ) -> Result<ResolverPage> {
        AppSyncClient::list_resolvers(self, api_id, type_name, next_token).await
    }
}
