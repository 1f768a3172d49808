use anyhow::Result;
use clap::Parser;
use outcomemap::cli::{self, Cli, Commands};
use outcomemap::commands::{self, ConvertConfig, UploadPlanConfig, ValidateConfig};
use outcomemap::io::UploadTarget;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match cli.command {
        Commands::Validate {
            path,
            format,
            output,
        } => {
            let passed = commands::validate_plan(ValidateConfig {
                path,
                config: cli.config,
                format,
                output,
            })?;
            if !passed {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Convert {
            path,
            format,
            output,
        } => commands::convert_plan(ConvertConfig {
            path,
            config: cli.config,
            format,
            output,
        }),
        Commands::Upload {
            path,
            course_id,
            curr_id,
            period_id,
            url,
            token,
            as_csv,
        } => commands::upload_plan(UploadPlanConfig {
            path,
            config: cli.config,
            target: UploadTarget {
                course_id,
                curr_id,
                period_id,
            },
            url,
            token,
            as_csv,
        }),
        Commands::Init { force } => commands::init_config(force),
    }
}

fn init_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(cli::log_level(verbosity));
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.format_timestamp(None).init();
}
