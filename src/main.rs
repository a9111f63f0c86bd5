use anyhow::{Context, Result};
use nutrilog_parser::parser_config::{LogFormat, OutputFormat};
use nutrilog_parser::{IngredientParser, ParserConfig};
use std::env;
use std::fs;
use std::io::{self, Read};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    match format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Text => subscriber.init(),
    }
}

fn read_input(path: Option<String>) -> Result<String> {
    match path {
        Some(path) => {
            info!("Reading ingredient lines from {}", path);
            fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path))
        }
        None => {
            info!("Reading ingredient lines from stdin");
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = ParserConfig::from_env().context("Invalid parser configuration")?;
    init_tracing(config.log_format);

    info!("Starting nutrilog ingredient parser");

    let vocabulary = config
        .load_vocabulary()
        .context("Failed to load vocabulary")?;
    let parser = IngredientParser::new(vocabulary);

    let input = read_input(env::args().nth(1))?;
    let document = parser.parse_document_with_workers(&input, config.workers);

    match config.output_format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&document)
                .context("Failed to serialize parsed document")?;
            println!("{}", json);
        }
        OutputFormat::Text => print!("{}", document),
    }

    Ok(())
}
