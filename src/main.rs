// oss-purge: Interactively delete Alibaba Cloud OSS buckets and everything
// in them.
#![forbid(unsafe_code)]
use std::io::{
    self,
    Write,
};
use std::process::ExitCode;
use tracing::{
    debug,
    error,
};
use tracing_subscriber::EnvFilter;

mod cli;
mod common;
mod enumerator;
mod oss;
mod selector;
mod teardown;

#[cfg(test)]
mod testing;

use common::{
    CredentialError,
    ACCESS_KEY_ID_ENV,
    ACCESS_KEY_SECRET_ENV,
};
use selector::Selector;
use teardown::Sequencer;

// Log filter used when RUST_LOG isn't set.
const DEFAULT_LOG_FILTER: &str = "oss_purge=info";

// Logs go to stderr so they don't interleave with the prompts on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

// Tell the user how to provide credentials.
fn credentials_usage(err: &CredentialError) {
    eprintln!("Error: {}", err);
    eprintln!();
    eprintln!("Provide credentials as arguments or set environment variables:");
    eprintln!("  export {}=your_key_id", ACCESS_KEY_ID_ENV);
    eprintln!("  export {}=your_key_secret", ACCESS_KEY_SECRET_ENV);
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let matches = match cli::parse_args() {
        Ok(matches) => matches,
        Err(err)    => {
            // Help and version are "errors" too, clap knows where they go.
            let _ = err.print();

            return if err.use_stderr() {
                ExitCode::FAILURE
            }
            else {
                ExitCode::SUCCESS
            };
        },
    };

    let config = match cli::client_config(&matches) {
        Ok(config) => config,
        Err(err)   => {
            credentials_usage(&err);

            return ExitCode::FAILURE;
        },
    };

    let client = oss::Client::new(config).await;

    println!("Fetching buckets from all regions...");

    let buckets = enumerator::buckets(&client).await;

    debug!("Found {} buckets", buckets.len());

    let sequencer = Sequencer::new(&client);

    let stdin  = io::stdin();
    let stdout = io::stdout();

    let mut selector = Selector::new(stdin.lock(), stdout.lock());

    let ret = selector.run(&buckets, &sequencer).await;

    // Make sure everything reaches the terminal before we exit.
    let _ = io::stdout().flush();

    match ret {
        Ok(summary) => {
            debug!("Selector finished: {:?}", summary.ending);

            ExitCode::SUCCESS
        },
        Err(err) => {
            error!("{:#}", err);

            ExitCode::FAILURE
        },
    }
}
