//! Resolve coordinates to a three-word address.
//!
//! ```sh
//! W3W_API_KEY=... cargo run -p w3w-core --example convert_to_words -- 51.432393 -0.348023 fr
//! ```
//!
//! Set `W3W_API_URL` to point at another endpoint, e.g. a local `mock-server`.

use std::env;
use std::process::ExitCode;

use log::{error, LevelFilter};
use w3w_core::{ConversionOptions, Coordinates, W3wClient};

const DEFAULT_LAT: f64 = 51.432393;
const DEFAULT_LNG: f64 = -0.348023;

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

fn parse_arg(args: &[String], index: usize, default: f64) -> Result<f64, String> {
    match args.get(index) {
        Some(raw) => raw
            .parse()
            .map_err(|e| format!("invalid coordinate {raw:?}: {e}")),
        None => Ok(default),
    }
}

fn main() -> ExitCode {
    if let Err(e) = init_logging() {
        eprintln!("failed to initialize logging: {e}");
    }

    let args: Vec<String> = env::args().collect();
    let coordinates = match (
        parse_arg(&args, 1, DEFAULT_LAT),
        parse_arg(&args, 2, DEFAULT_LNG),
    ) {
        (Ok(lat), Ok(lng)) => Coordinates::new(lat, lng),
        (Err(e), _) | (_, Err(e)) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut options = ConversionOptions::default();
    if let Some(language) = args.get(3) {
        options = options.with_language(language.as_str());
    }
    if let Ok(url) = env::var("W3W_API_URL") {
        options = options.with_base_url(url);
    }

    let api_key = env::var("W3W_API_KEY").unwrap_or_default();
    let result = W3wClient::new(api_key)
        .and_then(|client| client.convert_to_words(coordinates, &options));

    match result {
        Ok(result) => match serde_json::to_string_pretty(&result) {
            Ok(body) => {
                println!("Results");
                println!("{body}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("failed to render result: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            error!("Error occurred converting coordinates to words: {e}");
            ExitCode::FAILURE
        }
    }
}
