//! # Postcode CLI
//!
//! Parses each argument as a UK postcode and prints its decomposition.

use clap::Parser as ClapParser;
use log::{error, info, warn, LevelFilter};
use postcode_parser::config::parse_log_level;
use postcode_parser::logging::{self, LogEvent, LogLevel, Logger, LoggingService};
use postcode_parser::{
    FaultSelector, Parser, ParserConfig, Postcode, PostcodeError, RuleTable, SpecialCaseCatalog,
    WhitespacePolicy,
};
use serde_json::json;
use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(ClapParser)]
#[command(name = "postcode", version)]
#[command(about = "Parse and validate UK postcodes")]
struct Args {
    /// Postcodes to parse
    #[arg(required_unless_present = "self_test")]
    postcodes: Vec<String>,

    /// Check parsed postcodes against the area/district rule tables
    #[arg(long)]
    validate: bool,

    /// Separator matching: strict, tolerant or lenient
    #[arg(short = 'w', long, default_value = "tolerant")]
    whitespace: String,

    /// Postcode types to try, in order (standard, forces, special-case)
    #[arg(short = 't', long, value_delimiter = ',')]
    types: Vec<String>,

    /// Fault id or name that never fails validation (repeatable)
    #[arg(long = "ignore-fault")]
    ignore_faults: Vec<String>,

    /// Match input as written instead of uppercasing it
    #[arg(long)]
    no_force_case: bool,

    /// Keep leading and trailing whitespace
    #[arg(long)]
    no_trim: bool,

    /// Directory of extra special-case definitions (*.json)
    #[arg(long, value_name = "DIR")]
    special_cases: Option<PathBuf>,

    /// Check every special case's examples against the catalog grammar
    #[arg(long)]
    self_test: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Log level (debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn parser_config(&self) -> ParserConfig {
        let mut config = ParserConfig::default()
            .with_whitespace(&self.whitespace)
            .with_validate(self.validate)
            .with_force_case(!self.no_force_case)
            .with_trim_whitespace(!self.no_trim);
        if !self.types.is_empty() {
            config = config.with_postcode_types(&self.types);
        }
        for fault in &self.ignore_faults {
            config = config.with_ignored_fault(FaultSelector::parse(fault));
        }
        config
    }
}

/// Hands library events to the `log` facade so they reach stderr with ours
struct LogForwarder;

impl Logger for LogForwarder {
    fn log(&self, event: &LogEvent) {
        log::log!(target: "postcode_parser", forwarded_level(event.level), "{}", event.format());
    }
}

fn forwarded_level(level: LogLevel) -> log::Level {
    match level {
        LogLevel::Error => log::Level::Error,
        LogLevel::Warning => log::Level::Warn,
        LogLevel::Info => log::Level::Info,
        LogLevel::Debug => log::Level::Debug,
    }
}

fn level_filter(level: LogLevel) -> LevelFilter {
    forwarded_level(level).to_level_filter()
}

fn init_library_logging(level: LogLevel) -> Result<(), String> {
    let service = LoggingService::new(Arc::new(LogForwarder), level);
    logging::init_global_logging_with_service(Arc::new(service))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let Some(level) = parse_log_level(&args.log_level) else {
        eprintln!("Error: unknown log level '{}'", args.log_level);
        return ExitCode::FAILURE;
    };
    env_logger::Builder::new().filter_level(level_filter(level)).init();
    if let Err(e) = init_library_logging(level) {
        warn!("Library logging unavailable: {}", e);
    }

    let catalog = match load_catalog(args.special_cases.as_deref()) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.self_test {
        return self_test(&catalog, &args.whitespace);
    }

    let parser = match build_parser(args.parser_config(), &catalog) {
        Ok(parser) => parser,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&args, &parser, &mut io::stdout().lock()) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Parse every argument, writing results to `out`; returns how many failed
fn run(args: &Args, parser: &Parser, out: &mut impl Write) -> Result<usize, Box<dyn Error>> {
    let mut failures = 0;
    let mut results = Vec::with_capacity(args.postcodes.len());
    for input in &args.postcodes {
        let result = parser.parse(input);
        if let Err(e) = &result {
            warn!("{}", e);
            failures += 1;
        }
        if args.json {
            results.push(json_result(input, &result));
        } else {
            write_result(out, input, &result)?;
        }
    }

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&results)?)?;
    }

    info!("{} of {} postcodes parsed", args.postcodes.len() - failures, args.postcodes.len());
    Ok(failures)
}

fn load_catalog(directory: Option<&Path>) -> Result<SpecialCaseCatalog, Box<dyn Error>> {
    let mut catalog = SpecialCaseCatalog::bundled()?;
    if let Some(directory) = directory {
        let loaded = catalog.load_from_directory(directory, true)?;
        info!("Loaded {} special cases from {}", loaded, directory.display());
    }
    Ok(catalog)
}

fn build_parser(
    config: ParserConfig,
    catalog: &SpecialCaseCatalog,
) -> Result<Parser, Box<dyn Error>> {
    let rules = Arc::new(RuleTable::bundled()?);
    Ok(Parser::new(config, catalog, rules)?)
}

fn self_test(catalog: &SpecialCaseCatalog, whitespace: &str) -> ExitCode {
    let mismatches = whitespace
        .parse::<WhitespacePolicy>()
        .map_err(|e| e.to_string())
        .and_then(|policy| catalog.self_test(policy).map_err(|e| e.to_string()));

    match mismatches {
        Ok(mismatches) if mismatches.is_empty() => {
            println!("{} special cases OK", catalog.len());
            ExitCode::SUCCESS
        }
        Ok(mismatches) => {
            for mismatch in &mismatches {
                println!(
                    "{}: example '{}' {}",
                    mismatch.identifier, mismatch.example, mismatch.reason
                );
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn write_result(
    out: &mut impl Write,
    input: &str,
    result: &Result<Postcode, PostcodeError>,
) -> io::Result<()> {
    match result {
        Ok(postcode) => {
            writeln!(
                out,
                "{:<10} {:<12} outward={} inward={}",
                postcode.to_string(),
                postcode.kind().as_str(),
                postcode.outward_code(),
                postcode.inward_code()
            )?;
            if !postcode.faults().is_empty() {
                let faults: Vec<String> = postcode.faults().iter().map(ToString::to_string).collect();
                writeln!(out, "{:<10} ignored faults: {}", "", faults.join(", "))?;
            }
        }
        Err(PostcodeError::Validation(e)) => {
            writeln!(out, "{:<10} invalid", e.postcode.to_string())?;
            for (id, description) in &e.faults {
                writeln!(out, "{:<10} #{} {}", "", id, description)?;
            }
        }
        Err(_) => writeln!(out, "{:<10} unrecognised", input.trim())?,
    }
    Ok(())
}

fn json_result(input: &str, result: &Result<Postcode, PostcodeError>) -> serde_json::Value {
    match result {
        Ok(postcode) => json!({ "input": input, "postcode": postcode }),
        Err(PostcodeError::Validation(e)) => json!({
            "input": input,
            "postcode": e.postcode,
            "error": e.to_string(),
        }),
        Err(e) => json!({ "input": input, "error": e.to_string() }),
    }
}
