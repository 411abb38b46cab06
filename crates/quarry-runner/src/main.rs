use clap::Parser;
use quarry_runner::{
    execute_deploy, execute_plan, execute_query, execute_run, execute_upload, execute_validate,
    Cli, Commands,
};

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Validate(command) => execute_validate(&command),
        Commands::Plan(command) => execute_plan(&command),
        Commands::Deploy(command) => execute_deploy(&command),
        Commands::Run(command) => execute_run(&command),
        Commands::Query(command) => execute_query(&command),
        Commands::Upload(command) => execute_upload(&command),
    };

    match result {
        Ok(output) => {
            println!("{output}");
        }
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
