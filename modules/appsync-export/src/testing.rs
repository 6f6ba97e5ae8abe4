// In-memory ResolverSource for driving the exporter without AWS.
//
// Types are served in pages of PAGE_SIZE with the page index as the
// continuation token; resolvers likewise, with the offset as the token.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use appsync_client::{AppSyncError, Resolver, ResolverPage, Result, TypePage, PAGE_SIZE};
use async_trait::async_trait;

use crate::source::ResolverSource;

const PAGE: usize = PAGE_SIZE as usize;

/// Builder-style mock: `.with_types()`, `.on_resolvers()`, `.fail_type_page()`,
/// `.fail_type()`. Every call is recorded for later assertions.
#[derive(Default)]
pub struct MockSource {
    types: Vec<String>,
    resolvers: HashMap<String, Vec<Resolver>>,
    failing_type_pages: HashSet<usize>,
    failing_types: HashSet<String>,
    looping_types: HashSet<String>,
    type_calls: Mutex<Vec<Option<String>>>,
    resolver_calls: Mutex<Vec<(String, Option<String>)>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_types<I, T>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.types.extend(types.into_iter().map(Into::into));
        self
    }

    pub fn on_resolvers(mut self, type_name: &str, resolvers: Vec<Resolver>) -> Self {
        self.resolvers.insert(type_name.to_string(), resolvers);
        self
    }

    /// Fail the `ListTypes` call for the zero-based page `index`.
    pub fn fail_type_page(mut self, index: usize) -> Self {
        self.failing_type_pages.insert(index);
        self
    }

    /// Fail every `ListResolvers` call for `type_name`.
    pub fn fail_type(mut self, type_name: &str) -> Self {
        self.failing_types.insert(type_name.to_string());
        self
    }

    /// Serve the first resolver page for `type_name` as usual, then answer
    /// every token with an empty page carrying that same token again.
    pub fn loop_resolver_token(mut self, type_name: &str) -> Self {
        self.looping_types.insert(type_name.to_string());
        self
    }

    pub fn type_calls(&self) -> usize {
        self.type_calls.lock().unwrap().len()
    }

    pub fn type_tokens(&self) -> Vec<Option<String>> {
        self.type_calls.lock().unwrap().clone()
    }

    /// Type names in the order their resolvers were first listed.
    pub fn listed_types(&self) -> Vec<String> {
        let calls = self.resolver_calls.lock().unwrap();
        calls
            .iter()
            .filter(|(_, token)| token.is_none())
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn resolver_calls_for(&self, type_name: &str) -> usize {
        self.resolver_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == type_name)
            .count()
    }
}

fn parse_token(token: Option<&str>) -> usize {
    token.map_or(0, |t| t.parse().expect("mock tokens are numeric"))
}

#[async_trait]
impl ResolverSource for MockSource {
    async fn list_types(&self, api_id: &str, next_token: Option<&str>) -> Result<TypePage> {
        self.type_calls
            .lock()
            .unwrap()
            .push(next_token.map(str::to_string));

        let index = parse_token(next_token);
        if self.failing_type_pages.contains(&index) {
            return Err(AppSyncError::ListTypes {
                api_id: api_id.to_string(),
                message: format!("mock failure on type page {index}"),
            });
        }

        let start = index * PAGE;
        let end = (start + PAGE).min(self.types.len());
        let types = self.types.get(start..end).unwrap_or_default().to_vec();
        let next_token = (end < self.types.len()).then(|| (index + 1).to_string());

        Ok(TypePage { types, next_token })
    }

    async fn list_resolvers(
        &self,
        api_id: &str,
        type_name: &str,
        next_token: Option<&str>,
    ) -> Result<ResolverPage> {
        self.resolver_calls
            .lock()
            .unwrap()
            .push((type_name.to_string(), next_token.map(str::to_string)));

        if self.failing_types.contains(type_name) {
            return Err(AppSyncError::ListResolvers {
                api_id: api_id.to_string(),
                type_name: type_name.to_string(),
                message: "mock failure".to_string(),
            });
        }

        let all = self.resolvers.get(type_name).map(Vec::as_slice).unwrap_or_default();

        if self.looping_types.contains(type_name) {
            let resolvers = match next_token {
                None => all.iter().take(PAGE).cloned().collect(),
                Some(_) => Vec::new(),
            };
            return Ok(ResolverPage {
                resolvers,
                next_token: Some("0".to_string()),
            });
        }

        let start = parse_token(next_token);
        let end = (start + PAGE).min(all.len());
        let resolvers = all.get(start..end).unwrap_or_default().to_vec();
        let next_token = (end < all.len()).then(|| end.to_string());

        Ok(ResolverPage {
            resolvers,
            next_token,
        })
    }
}

/// `count` resolvers named `field0..` with bodies derived from the field.
pub fn resolvers(count: usize) -> Vec<Resolver> {
    (0..count)
        .map(|i| {
            let field = format!("field{i}");
            Resolver::new(
                field.clone(),
                format!("## request {field}\n{{\"version\": \"2018-05-29\"}}"),
                format!("## response {field}\n$util.toJson($ctx.result)"),
            )
        })
        .collect()
}
