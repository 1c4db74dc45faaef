#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** namedtuple-maker **
//! Name a list of values from the command line and print the resulting record.

use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::{Parser, ValueEnum};
use log::info;
use serde_json::Value;

use namedtuple_maker::converter::value_from_text;
use namedtuple_maker::sample::{SAMPLE_FIELDS, SAMPLE_MESSY_FIELDS, sample_values};
use namedtuple_maker::style::MakerStyle;
use namedtuple_maker::{
    ConvertError, ConvertOptions, LogConfig, MAKER_VERSION, NamedRecord, graceful_exit, init_logging,
    make_named_tuple,
};

#[derive(Parser)]
#[command(author, version, about = "Turn a list of values into a named, immutable record.")]
struct Cli {
    /// Values to name. Numbers, booleans and null are read as JSON; anything else is text.
    values: Vec<String>,
    /// Supply all values as one JSON array instead.
    #[arg(long, conflicts_with = "values")]
    json: Option<String>,
    /// Attribute names, repeated or comma-separated. Prompts for each value when omitted.
    #[arg(short, long = "names", value_delimiter = ',')]
    names: Vec<String>,
    /// Name values index_0, index_1, ... without prompting.
    #[arg(short, long)]
    auto: bool,
    /// Run the built-in sample conversions and exit.
    #[arg(long, conflicts_with_all = ["values", "json", "names", "auto"])]
    demo: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Logging level; overrides LOG_LEVEL.
    #[arg(long)]
    log_level: Option<String>,
    /// Log to the console instead of a file; overrides LOG_TO_CONSOLE.
    #[arg(long)]
    log_to_console: bool,
    /// Log file path.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    fn log_config(&self) -> LogConfig {
        let mut config = LogConfig::from_env();
        if let Some(level) = &self.log_level {
            config.level = Some(level.clone());
        }
        if self.log_to_console {
            config.log_to_console = true;
        }
        if let Some(path) = &self.log_file {
            config.log_file.clone_from(path);
        }
        config
    }

    fn options(&self) -> ConvertOptions {
        if !self.names.is_empty() {
            ConvertOptions::named(self.names.iter().cloned())
        } else if self.auto {
            ConvertOptions::auto()
        } else {
            ConvertOptions::default()
        }
    }

    fn input(&self) -> Result<Value> {
        match &self.json {
            Some(raw) => serde_json::from_str(raw).context("while parsing --json input"),
            None => Ok(Value::Array(self.values.iter().map(|raw| value_from_text(raw)).collect())),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = match init_logging(&cli.log_config()) {
        Ok(context) => context,
        Err(err) => graceful_exit(Some("Logging could not be started."), Some(&err)),
    };
    info!("Start: namedtuple-maker {MAKER_VERSION}");

    if cli.demo {
        run_demo(cli.format)?;
    } else {
        let record = convert_or_exit(cli.input()?, &cli.options())?;
        print_record(&record, cli.format)?;
    }

    logging.shutdown();
    Ok(())
}

/// Convert `input`, ending the process on bad input or a name/value count mismatch.
fn convert_or_exit(input: Value, options: &ConvertOptions) -> Result<NamedRecord<Value>> {
    match make_named_tuple(input, options) {
        Ok(record) => Ok(record),
        Err(err @ ConvertError::Prompt(_)) => Err(err).context("while collecting attribute names"),
        Err(err) => graceful_exit(Some("The values could not be converted to a named record."), Some(&err)),
    }
}

fn print_record(record: &NamedRecord<Value>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(record)?);
        },
        OutputFormat::Text => {
            let fields: Vec<String> = record
                .iter()
                .map(|(name, value)| format!("{}={}", name.field_style(), value.to_string().value_style()))
                .collect();
            println!("{}({})", namedtuple_data::RECORD_TYPE_NAME, fields.join(", "));
        },
    }
    Ok(())
}

fn run_demo(format: OutputFormat) -> Result<()> {
    let runs = [
        ("explicit attribute names", ConvertOptions::named(SAMPLE_FIELDS)),
        ("attribute names needing cleanup", ConvertOptions::named(SAMPLE_MESSY_FIELDS)),
        ("automatic attribute names", ConvertOptions::auto()),
    ];

    for (label, options) in runs {
        println!("\n{}", label.heading_style());
        if let Some(names) = &options.attribute_names {
            println!("{}", format!("names: {names:?}").detail_style());
        }
        let record = make_named_tuple(sample_values(), &options).with_context(|| format!("demo run: {label}"))?;
        print_record(&record, format)?;

        let values: Vec<&Value> = record.values().collect();
        ensure!(
            values == sample_values().iter().collect::<Vec<_>>(),
            "demo run '{label}' reordered values"
        );
        if options.auto_attribute_names {
            let expected: Vec<String> = (0..record.len()).map(|index| format!("index_{index}")).collect();
            ensure!(record.field_names() == expected, "demo run '{label}' produced unexpected names");
        } else {
            ensure!(
                record.field_names() == SAMPLE_FIELDS,
                "demo run '{label}' produced unexpected names"
            );
        }
    }
    Ok(())
}
