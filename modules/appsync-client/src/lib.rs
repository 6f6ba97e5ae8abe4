pub mod error;
pub mod types;

pub use error::{AppSyncError, Result};
pub use types::{Credentials, Resolver, ResolverPage, TypePage};

use aws_config::BehaviorVersion;
use aws_sdk_appsync::config::Region;
use aws_sdk_appsync::error::DisplayErrorContext;
use aws_sdk_appsync::types::TypeDefinitionFormat;

/// Page size for both list operations.
pub const PAGE_SIZE: i32 = 25;

/// Name reported by the static credentials provider.
const PROVIDER_NAME: &str = "appsync-export";

pub struct AppSyncClient {
    client: aws_sdk_appsync::Client,
}

impl AppSyncClient {
    /// Build a client from explicit credentials. No network traffic happens
    /// until the first list call.
    pub async fn new(credentials: &Credentials) -> Self {
        let provider = aws_sdk_appsync::config::Credentials::new(
            credentials.access_key.clone(),
            credentials.secret_key.clone(),
            None,
            None,
            PROVIDER_NAME,
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(credentials.region.clone()))
            .credentials_provider(provider)
            .load()
            .await;

        Self {
            client: aws_sdk_appsync::Client::new(&sdk_config),
        }
    }

    /// List one page of the types declared on `api_id`.
    pub async fn list_types(&self, api_id: &str, next_token: Option<&str>) -> Result<TypePage> {
        let output = self
            .client
            .list_types()
            .api_id(api_id)
            .format(TypeDefinitionFormat::Json)
            .max_results(PAGE_SIZE)
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .map_err(|e| AppSyncError::ListTypes {
                api_id: api_id.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        let mut types = Vec::with_capacity(output.types().len());
        for ty in output.types() {
            match ty.name() {
                Some(name) => types.push(name.to_string()),
                None => tracing::warn!(api_id, "Skipping type without a name"),
            }
        }

        tracing::debug!(api_id, count = types.len(), "Listed types");

        Ok(TypePage {
            types,
            next_token: output.next_token().map(str::to_string),
        })
    }

    /// List one page of resolvers for `type_name`.
    pub async fn list_resolvers(
        &self,
        api_id: &str,
        type_name: &str,
        next_token: Option<&str>,
    ) -> Result<ResolverPage> {
        let output = self
            .client
            .list_resolvers()
            .api_id(api_id)
            .type_name(type_name)
            .max_results(PAGE_SIZE)
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .map_err(|e| AppSyncError::ListResolvers {
                api_id: api_id.to_string(),
                type_name: type_name.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        let mut resolvers = Vec::with_capacity(output.resolvers().len());
        for resolver in output.resolvers() {
            let Some(field_name) = resolver.field_name() else {
                tracing::warn!(api_id, type_name, "Skipping resolver without a field name");
                continue;
            };
            // JS and pipeline-function resolvers may carry no VTL at all.
            resolvers.push(Resolver::new(
                field_name,
                resolver.request_mapping_template().unwrap_or_default(),
                resolver.response_mapping_template().unwrap_or_default(),
            ));
        }

        tracing::debug!(api_id, type_name, count = resolvers.len(), "Listed resolvers");

        Ok(ResolverPage {
            resolvers,
            next_token: output.next_token().map(str::to_string),
        })
    }
}
