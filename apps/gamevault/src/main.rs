//! # GameVault Entry Point
//!
//! ## Startup Sequence
//! 1. Parse command line
//! 2. Initialize tracing (logging, to stderr)
//! 3. Load configuration
//! 4. Open the database & run migrations
//! 5. Rehydrate the AuthStore, build the CatalogStore
//! 6. Run the command and render its result

use std::process::ExitCode;

use clap::Parser;
use gamevault_app::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    gamevault_app::init_tracing();

    let json = cli.json;
    match gamevault_app::run(cli).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            if json {
                match serde_json::to_string_pretty(&err) {
                    Ok(body) => eprintln!("{}", body),
                    Err(_) => eprintln!("{}", err.message),
                }
            } else {
                eprintln!("error: {}", err.message);
            }
            ExitCode::FAILURE
        }
    }
}
