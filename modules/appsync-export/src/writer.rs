use std::fmt;
use std::path::{Path, PathBuf};

use appsync_client::Resolver;
use tracing::{info, warn};

use crate::error::{ExportError, Result};

/// Extension given to every exported template.
pub const TEMPLATE_EXTENSION: &str = "vtl";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Request,
    Response,
}

impl TemplateKind {
    fn as_str(self) -> &'static str {
        match self {
            TemplateKind::Request => "request",
            TemplateKind::Response => "response",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Writes a resolver's two templates under `{output_dir}/{type_name}/`.
#[derive(Debug, Clone)]
pub struct TemplateWriter {
    output_dir: PathBuf,
}

impl TemplateWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn type_dir(&self, type_name: &str) -> PathBuf {
        self.output_dir.join(type_name)
    }

    /// `{output_dir}/{type}/{field}-{kind}-mapping-template.vtl`
    pub fn template_path(&self, type_name: &str, field_name: &str, kind: TemplateKind) -> PathBuf {
        self.type_dir(type_name).join(format!(
            "{field_name}-{kind}-mapping-template.{TEMPLATE_EXTENSION}"
        ))
    }

    /// Create the type directory if needed and overwrite both templates.
    ///
    /// Both files are always attempted; if either fails the resolver is
    /// reported as failed, request error first.
    pub async fn write_templates(&self, type_name: &str, resolver: &Resolver) -> Result<()> {
        let dir = self.type_dir(type_name);
        // create_dir_all treats a directory created concurrently by a sibling
        // resolver as success.
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| ExportError::CreateDir {
                type_name: type_name.to_string(),
                field_name: resolver.field_name.clone(),
                path: dir,
                source,
            })?;

        let (request, response) = tokio::join!(
            self.write_one(type_name, resolver, TemplateKind::Request),
            self.write_one(type_name, resolver, TemplateKind::Response),
        );
        request?;
        response
    }

    async fn write_one(
        &self,
        type_name: &str,
        resolver: &Resolver,
        kind: TemplateKind,
    ) -> Result<()> {
        let body = match kind {
            TemplateKind::Request => &resolver.request_mapping_template,
            TemplateKind::Response => &resolver.response_mapping_template,
        };
        let path = self.template_path(type_name, &resolver.field_name, kind);

        match tokio::fs::write(&path, body).await {
            Ok(()) => {
                info!(
                    type_name,
                    field_name = resolver.field_name.as_str(),
                    "Wrote {kind} mapper"
                );
                Ok(())
            }
            Err(source) => {
                warn!(
                    type_name,
                    field_name = resolver.field_name.as_str(),
                    path = %path.display(),
                    error = %source,
                    "Failed writing {kind} mapper"
                );
                Err(ExportError::WriteTemplate {
                    type_name: type_name.to_string(),
                    field_name: resolver.field_name.clone(),
                    kind,
                    source,
                })
            }
        }
    }
}
