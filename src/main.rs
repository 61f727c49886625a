use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use sapmon::{
    convert, Emitter, FileSource, OutputFormat, Overrides, ReaderSource, Settings, SnapshotSource,
};

#[derive(Parser, Debug)]
#[command(name = "sapmon", version)]
#[command(about = "Convert sapcontrol GetProcessList / GetAlertTree output into InfluxDB line protocol")]
struct Args {
    /// Metric measurement name [default: sapmon]
    #[arg(short = 'm', long)]
    measurement: Option<String>,

    /// Replace spaces in tag keys and values with the delimiter
    #[arg(short = 'r', long)]
    replace_spaces: bool,

    /// Delimiter between node names, also used to replace spaces [default: " "]
    #[arg(short = 'd', long)]
    delimiter: Option<String>,

    /// Tag holding the node path or process name; ROOT uses the first
    /// branch below the tree root as tag key [default: ccms]
    #[arg(short = 'p', long)]
    tag_name: Option<String>,

    /// Print processing errors after the metrics and enable debug logging
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Alert tree node to start from [default: 0]
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    root_node: Option<i64>,

    /// Use the alert node's timestamp instead of ingestion time
    #[arg(short = 't', long)]
    source_timestamp: bool,

    /// Which alert records get the node timestamp: string, float or all (any other value) [default: all]
    #[arg(short = 'u', long)]
    timestamp_scope: Option<String>,

    /// Read sapcontrol output from this file instead of stdin
    #[arg(short = 'f', long)]
    file: Option<PathBuf>,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Output line format
    #[arg(long, value_enum, default_value_t = OutputFormat::Line)]
    format: OutputFormat,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            measurement: self.measurement.clone(),
            replace_spaces: self.replace_spaces.then_some(true),
            delimiter: self.delimiter.clone(),
            tag_name: self.tag_name.clone(),
            verbose: self.verbose.then_some(true),
            root_node: self.root_node,
            source_timestamp: self.source_timestamp.then_some(true),
            timestamp_scope: self.timestamp_scope.clone(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let settings = Settings::load(args.config.as_deref(), &args.overrides())
        .context("invalid configuration")?;

    init_tracing(settings.verbose);
    debug!(?settings, "loaded settings");

    let mut source: Box<dyn SnapshotSource> = match &args.file {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(ReaderSource::stdin()),
    };

    let snapshot = source
        .read()
        .with_context(|| format!("no snapshot from {}", source.description()))?;

    let conversion = convert(snapshot, &settings);

    let stdout = io::stdout();
    let mut emitter = Emitter::new(BufWriter::new(stdout.lock()), args.format);
    emitter
        .emit_all(&conversion.records)
        .context("failed to write metrics")?;

    if settings.verbose {
        emitter
            .report_errors(&conversion.errors)
            .context("failed to write processing errors")?;
    } else if !conversion.errors.is_empty() {
        debug!(
            errors = conversion.errors.len(),
            "processing errors suppressed, rerun with -v to print them"
        );
    }

    emitter.flush().context("failed to flush output")?;
    Ok(())
}

/// Log to stderr so stdout stays a clean metric stream. `RUST_LOG` wins over
/// the verbosity flag.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "sapmon=debug,sapmon_sapcontrol=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
