use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use patrick_db_cgi::config::{DEFAULT_MAX_CONTENT_LENGTH, DEFAULT_STORAGE_DIR};
use patrick_db_cgi::{CgiRequest, Config, Handler, Response};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = DEFAULT_STORAGE_DIR)]
    storage_dir: String,
    #[arg(short, long, default_value_t = DEFAULT_MAX_CONTENT_LENGTH)]
    max_content_length: u64,
}

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let status = match run() {
        Ok(_) => 0,
        Err(e) => {
            log::error!("Failed to write response: {:?}", e);
            1
        }
    };
    ::std::process::exit(status);
}

fn run() -> Result<()> {
    let config = load_config();
    let handler = Handler::new(config);

    let response = match CgiRequest::from_env() {
        Ok(request) => handler.handle(&request, &mut io::stdin().lock()),
        Err(e) => {
            log::warn!("Could not decode request environment: {}", e);
            Response::from(e)
        }
    };

    let mut stdout = io::stdout().lock();
    response.write_to(&mut stdout).context("writing response to stdout")?;
    stdout.flush().context("flushing stdout")?;

    Ok(())
}

fn load_config() -> Config {
    // Web servers may pass query words as argv; never let clap print usage into the response
    let args = Args::try_parse().unwrap_or_else(|e| {
        log::warn!("Ignoring command line arguments: {}", e);
        Args::parse_from([env!("CARGO_PKG_NAME")])
    });

    let storage_dir = env::var("STORAGE_DIR").ok().unwrap_or(args.storage_dir);
    let max_content_length = env::var("MAX_CONTENT_LENGTH")
        .ok()
        .and_then(|raw| match raw.parse::<u64>() {
            Ok(length) => Some(length),
            Err(e) => {
                log::warn!("Ignoring MAX_CONTENT_LENGTH={:?}: {}", raw, e);
                None
            }
        })
        .unwrap_or(args.max_content_length);

    Config::new(PathBuf::from(storage_dir)).with_max_content_length(max_content_length)
}
