use anyhow::Context;
use clap::Parser;
use clap::builder::BoolishValueParser;
use podspec_merge::{MergeOptions, ModuleFilter};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "merge-podspec")]
#[command(about = "Merge podspec JSON fragments into a base podspec", long_about = None)]
struct Cli {
    /// Base podspec JSON; must contain a top-level `subspecs` array.
    #[arg(short = 'b', long = "base_file_path")]
    base_file_path: PathBuf,

    /// Directory scanned recursively for fragment `.json` files.
    #[arg(short = 'r', long = "root_path")]
    root_path: PathBuf,

    #[arg(short = 'o', long = "output_path")]
    output_path: PathBuf,

    /// Only merge fragments whose `module_name` carries `--module_name`.
    #[arg(
        short = 'c',
        long = "check_module",
        action = clap::ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true"
    )]
    check_module: bool,

    #[arg(short = 'm', long = "module_name", default_value = "")]
    module_name: String,

    /// Log filter directive, e.g. `debug` or `podspec_merge=debug`.
    #[arg(long = "log_level", default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let options = MergeOptions {
        base: cli.base_file_path,
        root: cli.root_path,
        output: cli.output_path,
        filter: cli.check_module.then(|| ModuleFilter::new(cli.module_name)),
    };

    let report = podspec_merge::run(&options).with_context(|| {
        format!(
            "merging fragments from {} into {}",
            options.root.display(),
            options.base.display()
        )
    })?;

    for warning in &report.warnings {
        warn!(%warning, "merge skipped; field left unchanged");
    }
    info!(
        podspec = report.podspec.as_deref().unwrap_or("<unnamed>"),
        seen = report.fragments_seen,
        skipped = report.fragments_skipped,
        merged = report.nodes_merged,
        attached = report.nodes_attached,
        warnings = report.warnings.len(),
        "wrote {}",
        options.output.display()
    );

    Ok(())
}
