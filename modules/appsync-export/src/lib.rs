pub mod config;
pub mod error;
pub mod exporter;
pub mod source;
pub mod writer;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use config::{Cli, Config, ConfigError, DEFAULT_OUTPUT_DIR};
pub use error::{ExportError, Result};
pub use exporter::{ExportSummary, Exporter, ResolverPaging};
pub use source::ResolverSource;
pub use writer::{TemplateKind, TemplateWriter, TEMPLATE_EXTENSION};
