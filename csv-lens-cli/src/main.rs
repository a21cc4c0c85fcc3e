use clap::Parser;
use csv_lens_common::{delimiter_byte, Config, CsvLensError, OutputFormat};
use csv_lens_core::{render, run, Query};
use std::path::PathBuf;

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse()
}

fn parse_delimiter(s: &str) -> Result<char, String> { // validate delimiter at CLI parse time
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c),
        _ => Err(format!("delimiter must be a single ASCII character, got {s:?}")),
    }
}

#[derive(Parser)]
#[command(name = "csv-lens", version, about = "Filter and aggregate CSV files")]
struct Cli {
    /// CSV file to read; a leading ~ expands to the home directory
    #[arg(long)]
    file: Option<PathBuf>,
    /// Row filter, e.g. "brand=apple", "price>1000", "rating<4.7"
    #[arg(long = "where", value_name = "CONDITION")]
    where_clause: Option<String>,
    /// Column aggregate, e.g. "rating=avg" (avg, min or max)
    #[arg(long, value_name = "CONDITION")]
    aggregate: Option<String>,
    /// Output format: table, csv or json
    #[arg(long, value_parser = parse_format)]
    format: Option<OutputFormat>,
    /// Input field delimiter
    #[arg(long, value_parser = parse_delimiter)]
    delimiter: Option<char>,
    /// Config file to use instead of $CSV_LENS_CONFIG or the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Write the effective config to PATH and exit
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    // every failure ends up as the printed output of this invocation
    match execute(cli) {
        Ok(text) => println!("{text}"),
        Err(e) => println!("{e}"),
    }
}

fn execute(cli: Cli) -> anyhow::Result<String> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(d) = cli.delimiter { config.input.delimiter = d; }
    if let Some(f) = cli.format { config.display.format = f; }

    if let Some(path) = cli.write_config {
        config.save_to(&path)?;
        return Ok(format!("Config written to {}", path.display()));
    }

    let file = cli.file.ok_or(CsvLensError::MissingInput)?;
    let delimiter = delimiter_byte(config.input.delimiter)?;
    let query = Query {
        file,
        where_clause: cli.where_clause,
        aggregate: cli.aggregate,
        delimiter,
    };
    log::debug!("running {query:?} with {:?} output", config.display.format);
    let output = run(&query)?;
    log::debug!("{} result rows", output.row_count());
    Ok(render(&output, config.display.format, delimiter)?)
}
