//! Resolve a three-word address to coordinates.
//!
//! ```sh
//! W3W_API_KEY=... cargo run -p w3w-core --example convert_to_coordinates -- filled.count.soap
//! ```
//!
//! Set `W3W_API_URL` to point at another endpoint, e.g. a local `mock-server`.

use std::env;
use std::process::ExitCode;

use log::{error, info, LevelFilter};
use w3w_core::{ConversionOptions, ThreeWordAddress, W3wClient};

fn init_logging() -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .level(LevelFilter::Info)
        .level_for("w3w_core", LevelFilter::Debug)
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .chain(std::io::stderr())
        .apply()
}

fn main() -> ExitCode {
    if let Err(e) = init_logging() {
        eprintln!("failed to initialize logging: {e}");
    }

    let api_key = env::var("W3W_API_KEY").unwrap_or_default();
    let raw_words = env::args()
        .nth(1)
        .unwrap_or_else(|| "filled.count.soap".to_string());

    let words: ThreeWordAddress = match raw_words.parse() {
        Ok(words) => words,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut options = ConversionOptions::default();
    if let Ok(url) = env::var("W3W_API_URL") {
        options = options.with_base_url(url);
    }

    let result = W3wClient::new(api_key)
        .and_then(|client| client.convert_to_coordinates(&words, &options));

    match result {
        Ok(result) => {
            info!("converted {words}");
            match serde_json::to_string_pretty(&result) {
                Ok(body) => {
                    println!("Results");
                    println!("{body}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    error!("failed to render result: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            error!("Error occurred converting words to coordinates: {e}");
            ExitCode::FAILURE
        }
    }
}
