mod events;

use clap::{Parser, Subcommand};
use futures::executor::block_on;
use serde::Serialize;
use serde_json::json;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use taxochord::render::{
    HeadlessError, HighlightState, PointerEvent, RenderCommand, Session, SvgRenderOptions,
    sanitize_svg_id,
};
use taxochord::{ChordConfig, ChordOptions, CsvRecordSource, Engine, Record, RecordSource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Core(#[from] taxochord::Error),
    #[error(transparent)]
    Headless(#[from] HeadlessError),
    #[error(transparent)]
    Events(#[from] events::EventParseError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "taxochord-cli")]
#[command(about = "Chord diagrams of taxonomic similarity between datasets (headless)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the selected datasets, taxon columns, profiles and similarity matrix as JSON.
    Profile(CommonArgs),
    /// Print the chord layout (groups, ribbons, labels, tooltips) as JSON.
    Layout(CommonArgs),
    /// Render the diagram as SVG, optionally with one group highlighted.
    Render(RenderArgs),
    /// Replay a pointer event script and print the render commands as JSON lines.
    Interact(InteractArgs),
}

#[derive(clap::Args, Debug)]
struct CommonArgs {
    /// Delimited abundance table with a header row; `-` reads stdin.
    input: String,

    /// JSON config file merged over the defaults.
    #[arg(long, env = "TAXOCHORD_CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of datasets to keep, in first-appearance order.
    #[arg(long)]
    max_datasets: Option<u64>,

    /// Gap between adjacent group arcs, in radians.
    #[arg(long)]
    pad_angle: Option<f64>,

    /// Field delimiter: a single ASCII character, or `tab`.
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    delimiter: u8,

    /// Column name prefix identifying taxon columns.
    #[arg(long)]
    taxon_prefix: Option<String>,

    #[arg(long)]
    width: Option<f64>,

    #[arg(long)]
    height: Option<f64>,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,
}

#[derive(clap::Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output file; stdout when omitted or `-`.
    #[arg(long)]
    out: Option<String>,

    /// Render with this group hovered.
    #[arg(long)]
    highlight: Option<usize>,

    /// Pointer position used to place the tooltip of `--highlight`.
    #[arg(long, default_value_t = 0.0, requires = "highlight", allow_negative_numbers = true)]
    pointer_x: f64,

    #[arg(long, default_value_t = 0.0, requires = "highlight", allow_negative_numbers = true)]
    pointer_y: f64,

    /// Root `<svg id>`.
    #[arg(long)]
    id: Option<String>,

    #[arg(long)]
    title: Option<String>,
}

#[derive(clap::Args, Debug)]
struct InteractArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Event script; stdin when omitted.
    #[arg(long)]
    events: Option<PathBuf>,
}

fn parse_delimiter(raw: &str) -> Result<u8, String> {
    match raw {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => Ok(c as u8),
                _ => Err(format!(
                    "expected a single ASCII character or `tab`, got {raw:?}"
                )),
            }
        }
    }
}

/// Defaults, then `--config`, then individual flags.
fn resolve_options(args: &CommonArgs) -> Result<ChordOptions, CliError> {
    let mut config = ChordConfig::defaults();
    if let Some(path) = &args.config {
        let text = std::fs::read_to_string(path)?;
        let file = ChordConfig::from_json_str(&text)?;
        config.deep_merge(file.as_value());
    }
    if let Some(v) = args.max_datasets {
        config.set_value("maxDatasets", json!(v));
    }
    if let Some(v) = args.pad_angle {
        config.set_value("chord.padAngle", json!(v));
    }
    if let Some(v) = &args.taxon_prefix {
        config.set_value("taxonPrefix", json!(v));
    }
    if let Some(v) = args.width {
        config.set_value("render.width", json!(v));
    }
    if let Some(v) = args.height {
        config.set_value("render.height", json!(v));
    }
    Ok(ChordOptions::from_config(&config)?)
}

/// Delimited table on stdin; `path` only names the input in errors.
struct StdinRecordSource(CsvRecordSource);

impl RecordSource for StdinRecordSource {
    fn load(&self, path: &Path) -> taxochord::Result<Vec<Record>> {
        self.0
            .read(std::io::stdin().lock())
            .map_err(|err| taxochord::Error::Load {
                path: path.display().to_string(),
                message: err.to_string(),
            })
    }
}

fn load_session(args: &CommonArgs) -> Result<Session, CliError> {
    let options = resolve_options(args)?;
    let source = CsvRecordSource::with_delimiter(args.delimiter);
    let mut session = Session::new(Engine::with_options(options));
    let path = Path::new(&args.input);
    if args.input == "-" {
        block_on(session.reload(&StdinRecordSource(source), path))?;
    } else {
        block_on(session.reload(&source, path))?;
    }
    Ok(session)
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => std::io::stdout().lock().write_all(text.as_bytes())?,
        Some(path) => std::fs::write(path, text)?,
    }
    Ok(())
}

#[derive(Serialize)]
struct Step<'a> {
    event: &'a PointerEvent,
    state: HighlightState,
    commands: &'a [RenderCommand],
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Profile(args) => {
            let session = load_session(&args)?;
            if let Some(output) = session.output() {
                write_json(output, args.pretty)?;
            }
            Ok(())
        }
        Command::Layout(args) => {
            let session = load_session(&args)?;
            if let Some(diagram) = session.diagram() {
                write_json(diagram, args.pretty)?;
            }
            Ok(())
        }
        Command::Render(args) => {
            let mut session = load_session(&args.common)?.with_svg_options(SvgRenderOptions {
                diagram_id: args.id.as_deref().map(sanitize_svg_id),
                title: args.title.clone(),
            });
            if let Some(group) = args.highlight {
                let commands = session.handle(PointerEvent::Enter {
                    group,
                    x: args.pointer_x,
                    y: args.pointer_y,
                });
                if commands.is_empty() {
                    tracing::warn!(group, "highlight group out of range; rendering without it");
                }
            }
            if let Some(svg) = session.render_svg() {
                write_text(&svg, args.out.as_deref())?;
            }
            Ok(())
        }
        Command::Interact(args) => {
            if args.events.is_none() && args.common.input == "-" {
                return Err(CliError::Usage(
                    "stdin cannot carry both the table and the event script; pass --events"
                        .to_string(),
                ));
            }
            let mut session = load_session(&args.common)?;
            let script = match &args.events {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let mut stdout = std::io::stdout().lock();
            for event in events::parse_events(&script)? {
                let commands = session.handle(event);
                let step = Step {
                    event: &event,
                    state: session.highlight(),
                    commands: &commands,
                };
                serde_json::to_writer(&mut stdout, &step)?;
                writeln!(stdout)?;
            }
            Ok(())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => {}
        Err(err @ CliError::Usage(_)) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
