use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use xmlparse::{Config, Document, ExcludeKinds, NodeKind};

#[derive(Debug, Parser)]
#[command(
    name = "xmlparse",
    version,
    about = "Parse XML and print the document tree"
)]
struct Args {
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
    /// Keep leading and trailing whitespace of the input
    #[arg(long)]
    no_trim: bool,
    /// Remove comments from the input before parsing
    #[arg(long)]
    strip_comments: bool,
    /// Drop nodes of this kind from the tree (repeatable)
    #[arg(short = 'x', long = "exclude", value_enum, value_name = "KIND")]
    exclude: Vec<KindArg>,
    /// Maximum element nesting depth (0 means unlimited)
    #[arg(long, default_value_t = Config::default().max_depth)]
    max_depth: usize,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Xml,
    Debug,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Element,
    Text,
    Comment,
    Cdata,
    #[value(alias = "doctype")]
    DocumentType,
    #[value(alias = "pi")]
    ProcessingInstruction,
}

impl From<KindArg> for NodeKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Element => Self::Element,
            KindArg::Text => Self::Text,
            KindArg::Comment => Self::Comment,
            KindArg::Cdata => Self::CData,
            KindArg::DocumentType => Self::DocumentType,
            KindArg::ProcessingInstruction => Self::ProcessingInstruction,
        }
    }
}

impl Args {
    fn config(&self) -> Config {
        Config::new(!self.no_trim, self.strip_comments, self.max_depth)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let args = Args::parse();
    debug!(?args, "starting");

    let input = read_input(&args.input)?;
    let filter = ExcludeKinds::new(args.exclude.iter().copied().map(NodeKind::from));
    let document = xmlparse::parse_with_filter(&input, args.config(), filter)
        .with_context(|| match &args.input {
            Some(path) => format!("failed to parse {}", path.display()),
            None => "failed to parse stdin".to_string(),
        })?;
    info!(
        root = %document.root.name,
        children = document.children.len(),
        "parsed document"
    );

    let rendered = render(&document, args.format)?;
    write_output(&args.output, rendered.as_bytes())?;
    Ok(())
}

fn render(document: &Document, format: OutputFormat) -> Result<String> {
    let mut rendered = match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(document).context("failed to serialize document")?
        }
        OutputFormat::Xml => document.to_string(),
        OutputFormat::Debug => format!("{document:#?}"),
    };
    rendered.push('\n');
    Ok(rendered)
}

fn read_input(path: &Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.trim().is_empty() {
                bail!("no input provided on stdin");
            }
            Ok(buffer)
        }
    }
}

fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            Ok(())
        }
    }
}
