use intent_graph::{IntentGraphNode, LayoutOptions};
use serde::Serialize;
use std::io::{Read, Write};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "INTENT_GRAPH_LOG";

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Layout(intent_graph::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Layout(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<intent_graph::Error> for CliError {
    fn from(value: intent_graph::Error) -> Self {
        Self::Layout(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Edges,
    Legend,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    config: Option<String>,
    max_nodes: Option<usize>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "intent-graph-cli\n\
\n\
USAGE:\n\
  intent-graph-cli [layout] [--pretty] [--config <path>] [--max-nodes <n>] [--out <path>] [<path>|-]\n\
  intent-graph-cli edges [--pretty] [--config <path>] [--max-nodes <n>] [--out <path>] [<path>|-]\n\
  intent-graph-cli legend [--pretty] [--config <path>] [--max-nodes <n>] [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - Input is a JSON array of nodes: {id, term, intent, persona, purchaseStage, score}.\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - --config reads a JSON object of layout options; missing keys keep their defaults.\n\
  - --max-nodes keeps only the first <n> nodes before laying out.\n\
  - Log verbosity is controlled by INTENT_GRAPH_LOG (default: warn).\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "edges" => args.command = Command::Edges,
            "legend" => args.command = Command::Legend,
            "--pretty" => args.pretty = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--max-nodes" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.max_nodes = Some(n.parse::<usize>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn load_options(path: Option<&str>) -> Result<LayoutOptions, CliError> {
    let Some(path) = path else {
        return Ok(LayoutOptions::default());
    };
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn write_json(value: &impl Serialize, pretty: bool, out: Option<&str>) -> Result<(), CliError> {
    let mut text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    text.push('\n');
    match out {
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
        Some(path) => std::fs::write(path, text)?,
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let opts = load_options(args.config.as_deref())?;
    let text = read_input(args.input.as_deref())?;
    let mut nodes: Vec<IntentGraphNode> = serde_json::from_str(&text)?;

    if let Some(max) = args.max_nodes {
        if nodes.len() > max {
            tracing::info!(total = nodes.len(), kept = max, "truncating input nodes");
            nodes.truncate(max);
        }
    }

    let out = args.out.as_deref();
    match args.command {
        Command::Layout => {
            let layout = intent_graph::compute_layout_with(&nodes, &opts)?;
            write_json(&layout, args.pretty, out)
        }
        Command::Edges => {
            opts.validate()?;
            let edges = intent_graph::build_edges(&nodes, &opts);
            write_json(&edges, args.pretty, out)
        }
        Command::Legend => {
            opts.validate()?;
            let legend = intent_graph::Legend::build(&nodes, &opts.palette);
            write_json(&legend.entries(), args.pretty, out)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_tracing();

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
