use std::ffi::OsString;
use std::path::PathBuf;

use appsync_client::Credentials;
use clap::error::ErrorKind;
use clap::Parser;
use tracing::info;

use crate::exporter::ResolverPaging;

pub const DEFAULT_OUTPUT_DIR: &str = "./mappingTemplates";

const EXIT_STATUS_HELP: &str = "\
Exit status:
  0  all type pages exported
  1  missing or malformed option, AWS error, or filesystem error

Earlier releases exited 0 after printing an AWS or filesystem error; any
failed export now exits 1.";

/// Raw command line. The required options are `Option`s here so that a
/// missing one is reported by [`Config::try_from`] with exit code 1 rather
/// than by clap's own usage error (code 2).
#[derive(Debug, Parser)]
#[command(
    name = "appsync-export",
    version = "0.0.1 Beta",
    about = "Export AppSync resolvers from an AWS account as VTL files",
    after_help = EXIT_STATUS_HELP
)]
pub struct Cli {
    /// API ID of the AppSync API
    #[arg(short = 'a', long = "api-id", value_name = "ID")]
    pub api_id: Option<String>,

    /// AWS access key
    #[arg(short = 'k', long = "aws-key", value_name = "KEY")]
    pub aws_key: Option<String>,

    /// AWS secret access key
    #[arg(short = 's', long = "aws-secret", value_name = "SECRET")]
    pub aws_secret: Option<String>,

    /// AWS region
    #[arg(short = 'r', long = "aws-region", value_name = "REGION")]
    pub aws_region: Option<String>,

    /// Directory to save resolvers to
    #[arg(short = 'o', long = "output-dir", value_name = "PATH", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Follow resolver continuation tokens instead of exporting only the
    /// first 25 resolvers of each type
    #[arg(long = "all-resolver-pages")]
    pub all_resolver_pages: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required option {0}, run -h for help")]
    MissingOption(&'static str),

    /// Rejected by clap, or a help/version request.
    #[error(transparent)]
    Args(#[from] clap::Error),
}

impl ConfigError {
    /// Process exit status for a rejected invocation: 0 for `--help` and
    /// `--version`, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConfigError::Args(err)
                if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) =>
            {
                0
            }
            _ => 1,
        }
    }

    /// Print the diagnostic the way the CLI reports it.
    pub fn report(&self) {
        match self {
            // clap routes help/version to stdout and errors to stderr.
            ConfigError::Args(err) => {
                let _ = err.print();
            }
            ConfigError::MissingOption(_) => eprintln!("ERROR! {self}"),
        }
    }
}

/// Validated run configuration, built once before any network activity.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_id: String,
    pub credentials: Credentials,
    pub output_dir: PathBuf,
    pub resolver_paging: ResolverPaging,
}

impl Config {
    /// Parse and validate the process arguments.
    pub fn from_args() -> Result<Self, ConfigError> {
        Self::try_from_args(std::env::args_os())
    }

    /// Parse and validate `args`, the first item being the program name.
    pub fn try_from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        Self::try_from(cli)
    }

    pub fn log_redacted(&self) {
        info!(
            api_id = self.api_id.as_str(),
            access_key = self.credentials.access_key.as_str(),
            secret_key = "<redacted>",
            region = self.credentials.region.as_str(),
            output_dir = %self.output_dir.display(),
            resolver_paging = ?self.resolver_paging,
            "Loaded export config"
        );
    }
}

impl TryFrom<Cli> for Config {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let access_key = cli.aws_key.ok_or(ConfigError::MissingOption("aws-key"))?;
        let secret_key = cli
            .aws_secret
            .ok_or(ConfigError::MissingOption("aws-secret"))?;
        let api_id = cli.api_id.ok_or(ConfigError::MissingOption("api-id"))?;
        let region = cli
            .aws_region
            .ok_or(ConfigError::MissingOption("aws-region"))?;

        let resolver_paging = if cli.all_resolver_pages {
            ResolverPaging::AllPages
        } else {
            ResolverPaging::FirstPage
        };

        Ok(Self {
            api_id,
            credentials: Credentials {
                access_key,
                secret_key,
                region,
            },
            output_dir: cli.output_dir,
            resolver_paging,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [(&str, &str); 4] = [
        ("aws-key", "--aws-key"),
        ("aws-secret", "--aws-secret"),
        ("api-id", "--api-id"),
        ("aws-region", "--aws-region"),
    ];

    fn parse(args: &[&str]) -> Result<Config, ConfigError> {
        let argv = std::iter::once("appsync-export").chain(args.iter().copied());
        Config::try_from_args(argv)
    }

    #[test]
    fn full_arguments_build_config_with_default_output_dir() {
        let config = parse(&[
            "--api-id", "abc123", "--aws-key", "AKIA", "--aws-secret", "shh", "--aws-region",
            "eu-west-1",
        ])
        .unwrap();

        assert_eq!(config.api_id, "abc123");
        assert_eq!(config.credentials.access_key, "AKIA");
        assert_eq!(config.credentials.secret_key, "shh");
        assert_eq!(config.credentials.region, "eu-west-1");
        assert_eq!(config.output_dir, PathBuf::from("./mappingTemplates"));
        assert_eq!(config.resolver_paging, ResolverPaging::FirstPage);
    }

    #[test]
    fn short_flags_and_output_dir_override() {
        let config = parse(&[
            "-a", "abc", "-k", "k", "-s", "s", "-r", "us-east-1", "-o", "/tmp/vtl",
        ])
        .unwrap();

        assert_eq!(config.api_id, "abc");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/vtl"));
    }

    #[test]
    fn all_resolver_pages_is_opt_in() {
        let config = parse(&[
            "-a", "abc", "-k", "k", "-s", "s", "-r", "us-east-1", "--all-resolver-pages",
        ])
        .unwrap();

        assert_eq!(config.resolver_paging, ResolverPaging::AllPages);
    }

    #[test]
    fn region_is_not_validated() {
        let config = parse(&["-a", "abc", "-k", "k", "-s", "s", "-r", "not a region"]).unwrap();
        assert_eq!(config.credentials.region, "not a region");
    }

    #[test]
    fn every_missing_subset_reports_first_missing_option() {
        // Each bit of `mask` marks a required option as present.
        for mask in 0u8..15 {
            let mut args = Vec::new();
            for (i, (_, flag)) in REQUIRED.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    args.push(*flag);
                    args.push("value");
                }
            }

            let expected = REQUIRED
                .iter()
                .enumerate()
                .find(|(i, _)| mask & (1 << *i) == 0)
                .map(|(_, (name, _))| *name)
                .unwrap();

            let err = parse(&args).unwrap_err();
            assert!(
                matches!(err, ConfigError::MissingOption(name) if name == expected),
                "mask {mask:04b}: {err:?}"
            );
            assert_eq!(err.exit_code(), 1);
        }
    }

    #[test]
    fn missing_option_message_points_at_help() {
        let err = parse(&["-k", "k", "-s", "s", "-r", "r"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing required option api-id, run -h for help"
        );
    }

    #[test]
    fn option_without_value_exits_one() {
        let err = parse(&["-k", "k", "-s", "s", "-r", "r", "--api-id"]).unwrap_err();

        assert!(matches!(err, ConfigError::Args(_)), "{err:?}");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn unknown_flag_exits_one() {
        let err = parse(&["--no-such-flag"]).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn help_and_version_exit_zero() {
        for flag in ["-h", "--help", "-V", "--version"] {
            let err = parse(&[flag]).unwrap_err();
            assert_eq!(err.exit_code(), 0, "{flag}");
        }
    }

    #[test]
    fn help_documents_exit_status() {
        use clap::CommandFactory;

        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("Exit status:"), "{help}");
        assert!(help.contains("failed export now exits 1"), "{help}");
    }
}
