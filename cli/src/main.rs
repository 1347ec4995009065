use clap::Parser;
use std::path::PathBuf;
use studio_cli::config::StudioConfig;
use studio_cli::contact::ContactCli;
use studio_cli::perf::PerfCli;
use studio_cli::projects::ProjectsCli;
use tracing_subscriber::EnvFilter;

/// Portfolio studio tooling.
#[derive(Debug, Parser)]
#[command(name = "studio", version)]
struct Cli {
    /// Path to a TOML config file (defaults to ./studio.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Query and manage portfolio projects.
    Projects(ProjectsCli),
    /// Contact form intake.
    Contact(ContactCli),
    /// Animation budget tools.
    Perf(PerfCli),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so JSON on stdout stays clean. Override with RUST_LOG.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let config = StudioConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Projects(cmd) => studio_cli::projects::run(cmd, &config),
        Command::Contact(cmd) => studio_cli::contact::run(cmd, &config),
        Command::Perf(cmd) => studio_cli::perf::run(cmd, &config),
    }
}
