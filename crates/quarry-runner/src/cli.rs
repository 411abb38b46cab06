use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "quarry")]
#[command(about = "Quarry retrieval service CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Validate a pipeline file and print its execution order.
    Validate(ValidateCommand),
    /// Resolve overrides locally and print the run request body.
    Plan(PlanCommand),
    Deploy(DeployCommand),
    Run(RunCommand),
    Query(QueryCommand),
    Upload(UploadCommand),
}

#[derive(Debug, Clone, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ValidateCommand {
    #[arg(long)]
    pub pipeline: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, clap::Args)]
pub struct PlanCommand {
    #[arg(long)]
    pub pipeline: PathBuf,
    #[arg(long)]
    pub overrides: Option<PathBuf>,
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct DeployCommand {
    #[arg(long)]
    pub pipeline: PathBuf,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct RunCommand {
    #[arg(long)]
    pub pipeline: PathBuf,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub overrides: Option<PathBuf>,
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct QueryCommand {
    #[arg(long)]
    pub context: String,
    #[arg(long)]
    pub query: String,
    #[arg(long)]
    pub filter: Option<PathBuf>,
    #[arg(long, default_value_t = 10)]
    pub top_k: u32,
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct UploadCommand {
    #[arg(long)]
    pub context: String,
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
    #[arg(long)]
    pub metadata: Option<PathBuf>,
    #[arg(long, default_value_t = 600)]
    pub max_chunk_size: u32,
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
