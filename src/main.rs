//
//  chatbridge
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use chatbridge::api::resources::{Audiences, Campaigns, Contacts, Templates};
use chatbridge::cli::{Cli, Commands};
use chatbridge::output::OutputWriter;
use chatbridge::{exit_codes, ApiError};

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.global.debug);

    // Execute command and exit
    match run(cli) {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => std::process::exit(report(&e)),
    }
}

/// Initialize logging from `CHATBRIDGE_LOG`, falling back to `--debug`
///
/// Wire logs are only emitted when the client config has `debug = true`, so
/// they stay enabled by default and the config file alone can turn them on.
fn init_logging(debug: bool) {
    let filter = EnvFilter::try_from_env("CHATBRIDGE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if debug {
            "chatbridge=debug"
        } else {
            "warn,chatbridge::wire=info"
        })
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Prints an error and returns the exit code for it
fn report(error: &anyhow::Error) -> i32 {
    let output = OutputWriter::table();

    let Some(api_error) = error.downcast_ref::<ApiError>() else {
        output.write_error(&format!("{error:#}"));
        return exit_codes::ERROR;
    };

    output.write_error(&api_error.to_string());
    match api_error {
        ApiError::Validation { errors, .. } => {
            for (field, messages) in errors {
                for message in messages {
                    eprintln!("  {}: {}", field, message);
                }
            }
        }
        ApiError::RateLimit { retry_after, .. } => {
            eprintln!("  retry after {} seconds", retry_after);
        }
        _ => {}
    }

    exit_codes::for_error(api_error)
}

/// Main command dispatcher
fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Contacts(cmd) => cmd.run::<Contacts>(&cli.global),
        Commands::Audiences(cmd) => cmd.run::<Audiences>(&cli.global),
        Commands::Templates(cmd) => cmd.run::<Templates>(&cli.global),
        Commands::Campaigns(cmd) => cmd.run::<Campaigns>(&cli.global),
        Commands::Whatsapp(cmd) => cmd.run(&cli.global),
        Commands::Import(cmd) => cmd.run(&cli.global),
        Commands::Config(cmd) => cmd.run(&cli.global),
        Commands::Version => {
            println!("chatbridge version {}", chatbridge::VERSION);
            Ok(())
        }
    }
}
