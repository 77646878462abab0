//! yield-stats entry point: CLI wiring, report printing, and optional API.

use std::path::Path;
use std::process;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use yield_stats::config::AppConfig;
use yield_stats::io::export::export_summary_csv;
use yield_stats::io::import::{CsvFile, WeeklySource};
use yield_stats::report::{Analysis, Summary};
use yield_stats::stats::{DenominatorMode, forecast_next_week};

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<String>,
    data_path: Option<String>,
    denominator: Option<DenominatorMode>,
    summary_out: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: Option<u16>,
}

fn print_help() {
    eprintln!("yield-stats: weekly yield correlations, summaries, and forecasts");
    eprintln!();
    eprintln!("Usage: yield-stats [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>          Load configuration from TOML file");
    eprintln!("  --data <path>            Weekly series CSV (overrides data.path)");
    eprintln!("  --denominator <mode>     per_predictor or shared_week");
    eprintln!("  --summary-out <path>     Export summary tables to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after the report");
        eprintln!("  --port <u16>             API server port (overrides server.port)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("Log verbosity follows RUST_LOG (default: yield_stats=info).");
}

fn fail(message: &str) -> ! {
    eprintln!("error: {message}");
    process::exit(1);
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        data_path: None,
        denominator: None,
        summary_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: None,
    };

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let mut value = |what: &str| -> String {
            i += 1;
            match args.get(i) {
                Some(v) => v.clone(),
                None => fail(&format!("{flag} requires {what}")),
            }
        };
        match flag {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => cli.config_path = Some(value("a path argument")),
            "--data" => cli.data_path = Some(value("a path argument")),
            "--denominator" => {
                let name = value("a mode argument");
                match name.parse() {
                    Ok(mode) => cli.denominator = Some(mode),
                    Err(e) => fail(&e),
                }
            }
            "--summary-out" => cli.summary_out = Some(value("a path argument")),
            #[cfg(feature = "api")]
            "--serve" => cli.serve = true,
            #[cfg(feature = "api")]
            "--port" => {
                let raw = value("a u16 argument");
                match raw.parse::<u16>() {
                    Ok(p) => cli.port = Some(p),
                    Err(_) => fail(&format!("--port value \"{raw}\" is not a valid u16")),
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "yield_stats=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = parse_args();

    // Load config: --config file, else defaults; then apply CLI overrides
    let mut config = match cli.config_path {
        Some(ref path) => AppConfig::from_toml_file(Path::new(path)).unwrap_or_else(|e| {
            eprintln!("{e}");
            process::exit(1);
        }),
        None => AppConfig::default(),
    };
    if let Some(path) = cli.data_path {
        config.data.path = path;
    }
    if let Some(mode) = cli.denominator {
        config.forecast.denominator = mode;
    }
    #[cfg(feature = "api")]
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let records = CsvFile::new(&config.data.path)
        .fetch_weekly()
        .unwrap_or_else(|e| fail(&e.to_string()));

    let summary = Summary::from_records(&records);
    println!("{}\n", Analysis::from_records(&records));
    println!("{summary}\n");

    let mode = config.forecast.denominator;
    match forecast_next_week(&records, mode) {
        Ok(Some(forecast)) => println!("{forecast}"),
        Ok(None) => println!("--- Forecast ---\ninsufficient data: need at least two weeks"),
        Err(e) => warn!(error = %e, %mode, "forecast unavailable"),
    }

    if let Some(ref path) = cli.summary_out {
        if let Err(e) = export_summary_csv(&summary, Path::new(path)) {
            fail(&format!("failed to write CSV: {e}"));
        }
        info!(path = %path, "summary written");
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::{IpAddr, SocketAddr};
        use std::sync::Arc;

        let host: IpAddr = config
            .server
            .host
            .parse()
            .unwrap_or_else(|_| fail("server.host is not an IP address"));
        let addr = SocketAddr::new(host, config.server.port);
        let state = Arc::new(yield_stats::api::AppState { config, records });
        let rt = tokio::runtime::Runtime::new()
            .unwrap_or_else(|e| fail(&format!("failed to create tokio runtime: {e}")));
        if let Err(e) = rt.block_on(yield_stats::api::serve(state, addr)) {
            fail(&format!("server error: {e}"));
        }
    }
}
