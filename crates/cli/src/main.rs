// ABOUTME: CLI for filtering, querying and editing HTML documents with jqx-markup.
// ABOUTME: Reads a document from a file or stdin and writes the result to stdout or a file.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jqx_markup::{
    filter_tokens_with_limit, read_document, selector_query, selector_replace, FilterSet,
    HtmlError, Tokenizer,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "jqx-html")]
#[command(about = "Filter, query and edit HTML documents")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// HTML file to read (default: stdin)
    #[arg(short = 'i', long = "input", global = true)]
    input: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output", global = true)]
    output: Option<PathBuf>,

    /// Emit results as JSON
    #[arg(long = "json", global = true)]
    json_output: bool,

    /// Decode input with this encoding label instead of detecting it
    #[arg(long = "charset", global = true)]
    charset: Option<String>,

    /// Fail on any token longer than this many bytes (filter and tokens)
    #[arg(long = "max-token-len", global = true)]
    max_token_len: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Keep only tokens selected by a filter spec, e.g. "TEXT a img"
    Filter { spec: String },
    /// Print the outer markup of every element matching a CSS selector
    Query { selector: String },
    /// Replace every element matching a CSS selector; "<>" in the template is the original element
    Replace { selector: String, template: String },
    /// Dump the token stream as JSON lines
    Tokens,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_document(args: &Args) -> Result<String> {
    let charset = args.charset.as_deref();
    match &args.input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("error reading file {path:?}"))?;
            read_document(file, charset).with_context(|| format!("error reading file {path:?}"))
        }
        None => read_document(io::stdin().lock(), charset).context("error reading stdin"),
    }
}

/// Runs the subcommand. A tokenize fault still yields the partial output.
fn run_command(args: &Args, document: &str) -> Result<(String, Option<HtmlError>)> {
    match &args.command {
        Command::Filter { spec } => match filter_tokens_with_limit(
            document,
            &FilterSet::parse(spec),
            args.max_token_len,
        ) {
            Ok(out) => Ok((render_text(&out, args.json_output)?, None)),
            Err(HtmlError::Tokenize(fault)) => {
                let partial = render_text(&fault.partial, args.json_output)?;
                Ok((partial, Some(HtmlError::Tokenize(fault))))
            }
            Err(err) => Err(err.into()),
        },
        Command::Query { selector } => {
            let matches = selector_query(document, selector)?;
            let out = if args.json_output {
                serde_json::to_string(&matches)?
            } else {
                matches.join("\n")
            };
            Ok((out, None))
        }
        Command::Replace { selector, template } => {
            let out = selector_replace(document, selector, template)?;
            Ok((render_text(&out, args.json_output)?, None))
        }
        Command::Tokens => {
            let mut tokenizer = Tokenizer::new(document);
            if let Some(limit) = args.max_token_len {
                tokenizer = tokenizer.with_max_token_len(limit);
            }
            let mut lines = Vec::new();
            for token in tokenizer {
                match token {
                    Ok(token) => lines.push(serde_json::to_string(&token)?),
                    Err(fault) => return Ok((lines.join("\n"), Some(fault.into()))),
                }
            }
            Ok((lines.join("\n"), None))
        }
    }
}

fn render_text(out: &str, json_output: bool) -> Result<String> {
    if json_output {
        Ok(serde_json::to_string(out)?)
    } else {
        Ok(out.to_string())
    }
}

fn write_output(args: &Args, output: &str) -> Result<()> {
    match &args.output {
        Some(path) => {
            fs::write(path, output).with_context(|| format!("error writing to {path:?}"))
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{output}").context("error writing to stdout")
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let document = load_document(args)?;
    tracing::debug!(bytes = document.len(), "document loaded");

    let (output, fault) = run_command(args, &document)?;
    if !output.is_empty() || fault.is_none() {
        write_output(args, &output)?;
    }
    match fault {
        Some(fault) => Err(fault.into()),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}
