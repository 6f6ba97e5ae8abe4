use std::collections::HashSet;
use std::fmt;

use appsync_client::Resolver;
use futures::future::try_join_all;
use tracing::{info, warn};

use crate::error::Result;
use crate::source::ResolverSource;
use crate::writer::TemplateWriter;

/// How many resolver pages to read per type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolverPaging {
    /// Only the first page (at most 25 resolvers). Types with more
    /// resolvers lose the rest.
    #[default]
    FirstPage,
    /// Follow continuation tokens until the type is exhausted.
    AllPages,
}

/// Counters for a completed export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub pages: usize,
    pub types: usize,
    pub resolvers: usize,
    pub files: usize,
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} type pages, {} types, {} resolvers, {} files",
            self.pages, self.types, self.resolvers, self.files
        )
    }
}

/// Drives the export: type pages in order, and within a page every type and
/// every resolver concurrently. The first error stops the run; files already
/// written stay on disk.
pub struct Exporter<S> {
    source: S,
    writer: TemplateWriter,
    api_id: String,
    resolver_paging: ResolverPaging,
}

impl<S: ResolverSource> Exporter<S> {
    pub fn new(
        source: S,
        writer: TemplateWriter,
        api_id: impl Into<String>,
        resolver_paging: ResolverPaging,
    ) -> Self {
        Self {
            source,
            writer,
            api_id: api_id.into(),
            resolver_paging,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn run(&self) -> Result<ExportSummary> {
        let mut summary = ExportSummary::default();
        let mut next_token: Option<String> = None;

        loop {
            let page = self
                .source
                .list_types(&self.api_id, next_token.as_deref())
                .await?;
            summary.pages += 1;
            info!(
                page = summary.pages,
                types = page.types.len(),
                "Processing type page"
            );

            let exported = try_join_all(page.types.iter().map(|t| self.export_type(t))).await?;
            summary.types += page.types.len();
            summary.resolvers += exported.iter().sum::<usize>();

            match page.next_token {
                Some(token) => next_token = Some(token),
                None => break,
            }
        }

        summary.files = summary.resolvers * 2;
        Ok(summary)
    }

    /// Export every resolver of one type. Returns how many were written.
    async fn export_type(&self, type_name: &str) -> Result<usize> {
        let resolvers = self.fetch_resolvers(type_name).await?;
        if resolvers.is_empty() {
            info!(type_name, "No resolvers for type");
            return Ok(0);
        }

        try_join_all(
            resolvers
                .iter()
                .map(|r| self.writer.write_templates(type_name, r)),
        )
        .await?;

        Ok(resolvers.len())
    }

    async fn fetch_resolvers(&self, type_name: &str) -> Result<Vec<Resolver>> {
        let mut page = self
            .source
            .list_resolvers(&self.api_id, type_name, None)
            .await?;
        let mut resolvers = std::mem::take(&mut page.resolvers);

        match self.resolver_paging {
            ResolverPaging::FirstPage => {
                if page.next_token.is_some() {
                    warn!(
                        type_name,
                        exported = resolvers.len(),
                        "Type has more resolvers than one page, only the first page is exported \
                         (use --all-resolver-pages to follow)"
                    );
                }
            }
            ResolverPaging::AllPages => {
                let mut seen = HashSet::new();
                while let Some(token) = page.next_token.take() {
                    if !seen.insert(token.clone()) {
                        warn!(
                            type_name,
                            token = token.as_str(),
                            "Resolver continuation token repeated, stopping"
                        );
                        break;
                    }
                    page = self
                        .source
                        .list_resolvers(&self.api_id, type_name, Some(&token))
                        .await?;
                    resolvers.append(&mut page.resolvers);
                }
            }
        }

        Ok(resolvers)
    }
}
