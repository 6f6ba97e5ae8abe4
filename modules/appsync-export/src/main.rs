use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use appsync_client::AppSyncClient;
use appsync_export::{Config, Exporter, TemplateWriter};

#[tokio::main]
async fn main() -> Result<()> {
    // Validate before touching logging or AWS so a bad invocation exits 1
    // without any network activity.
    let config = match Config::from_args() {
        Ok(config) => config,
        Err(err) => {
            err.report();
            std::process::exit(err.exit_code());
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("appsync_export=info".parse()?)
                .add_directive("appsync_client=info".parse()?),
        )
        .init();

    config.log_redacted();

    let client = AppSyncClient::new(&config.credentials).await;
    let writer = TemplateWriter::new(&config.output_dir);
    let exporter = Exporter::new(client, writer, &config.api_id, config.resolver_paging);

    match exporter.run().await {
        Ok(summary) => {
            info!("Export complete. {summary}");
            println!(
                "Done exporting resolvers for {}, saved resolvers under {}",
                config.api_id,
                config.output_dir.display()
            );
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "Error while processing resolvers");
            Err(err.into())
        }
    }
}
