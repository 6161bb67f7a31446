/**
 * Serbian eID reader
 * Reads the card in the configured reader through CelikApi.
 *
 * Modes:
 * - console (default): one read, JSON and field listing on stdout
 * - http: every POST performs one read and returns the JSON document
 */

use std::io;
use std::process::ExitCode;

use clap::Parser;
use srbid_reader::config::Args;
use srbid_reader::native::CelikApi;
use srbid_reader::report::{self, EXIT_FAILURE};
use srbid_reader::{server, ReaderHandle};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout only carries the report.
    // Set RUST_LOG=debug to trace every driver call.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    let reader_id = match args.reader_id() {
        Ok(id) => id,
        Err(err) => {
            println!("Error: {}", err);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let Some(mut driver) = CelikApi::acquire() else {
        println!("Error: CelikApi is already in use");
        return ExitCode::from(EXIT_FAILURE);
    };

    match args.mode {
        None => {
            let format = args.format;
            let status = tokio::task::spawn_blocking(move || {
                report::run(&mut driver, &reader_id, format, &mut io::stdout().lock())
            })
            .await;

            match status {
                Ok(Ok(code)) => ExitCode::from(code),
                Ok(Err(err)) => {
                    error!("Failed to write report: {}", err);
                    ExitCode::from(EXIT_FAILURE)
                }
                Err(err) => {
                    error!("Read task failed: {}", err);
                    ExitCode::from(EXIT_FAILURE)
                }
            }
        }
        Some(mode) => {
            let addr = mode.listen_addr();
            let allow_origins = mode.allow_origins().to_vec();
            let reader = ReaderHandle::spawn(driver, reader_id);

            match server::serve(addr, reader, allow_origins).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    error!("Failed to serve on {}: {}", addr, err);
                    ExitCode::from(EXIT_FAILURE)
                }
            }
        }
    }
}
