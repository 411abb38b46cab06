mod cli;
mod config;
mod run;

pub use cli::{
    Cli, Commands, DeployCommand, OutputFormat, PlanCommand, QueryCommand, RunCommand,
    UploadCommand, ValidateCommand,
};
pub use config::{client_config, load_runner_config, RunnerConfig, RunnerConfigError};
pub use run::{
    execute_deploy, execute_plan, execute_query, execute_run, execute_upload, execute_validate,
    RunnerError,
};
