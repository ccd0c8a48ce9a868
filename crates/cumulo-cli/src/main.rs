use clap::{Parser, ValueEnum};
use cumulo_core::catalog::ImageCatalog;
use cumulo_core::scripting::register_cloud_api;
use rhai::{Dynamic, Engine};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the Rhai script
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// JSON image catalog backing the API (uses the built-in sample when omitted)
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
enum LogFormat {
    Pretty,
    Json,
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout is reserved for the script's result.
    let filter = EnvFilter::builder()
        .with_default_directive(cli.log_level.to_string().parse().unwrap())
        .from_env_lossy();

    let subscriber_builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match cli.log_format {
        LogFormat::Json => {
            subscriber_builder.json().init();
        }
        LogFormat::Pretty => {
            subscriber_builder.pretty().init();
        }
    }

    let catalog = match cli.catalog {
        Some(path) => match ImageCatalog::from_json_file(&path) {
            Ok(catalog) => catalog,
            Err(e) => {
                error!("Error loading image catalog: {:#}", e);
                std::process::exit(1);
            }
        },
        None => ImageCatalog::sample(),
    };
    info!("Catalog ready: {} images", catalog.len());

    let script = match fs::read_to_string(&cli.script) {
        Ok(s) => s,
        Err(e) => {
            error!("Error reading script file: {}", e);
            std::process::exit(1);
        }
    };

    let mut engine = Engine::new();
    register_cloud_api(&mut engine, Arc::new(catalog));

    match engine.eval::<Dynamic>(&script) {
        Ok(result) if result.is_unit() => info!("Script complete."),
        Ok(result) => println!("{}", result),
        Err(e) => {
            error!("Script Error: {}", e);
            std::process::exit(1);
        }
    }
}
