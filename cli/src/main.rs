//! rst2html CLI - reStructuredText to HTML renderer

use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use rst2html::{
    render_batch, DocumentParser, JsonFormat, JsonTreeParser, Node, NodeStats, ParseOptions,
    RenderOptions, RstParser,
};

#[derive(Parser)]
#[command(name = "rst2html")]
#[command(version)]
#[command(about = "Render reStructuredText to HTML with semantic class names", long_about = None)]
struct Cli {
    /// Input reStructuredText file ("-" for stdin)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Spaces per nesting level
    #[arg(long, default_value = "2", env = "RST2HTML_INDENT")]
    indent: usize,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a document to HTML
    Html {
        /// Input file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Spaces per nesting level
        #[arg(long, default_value = "2", env = "RST2HTML_INDENT")]
        indent: usize,

        /// Fail on questionable markup instead of warning
        #[arg(long)]
        strict: bool,

        /// Read a JSON document tree instead of reStructuredText
        #[arg(long)]
        from_json: bool,
    },

    /// Dump the parsed document tree as JSON
    Json {
        /// Input file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Fail on questionable markup instead of warning
        #[arg(long)]
        strict: bool,
    },

    /// Show document statistics, combined over all inputs
    Info {
        /// Input files ("-" for stdin)
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Render many files into a directory
    Batch {
        /// Input files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short = 'd', long, value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,

        /// Spaces per nesting level
        #[arg(long, default_value = "2", env = "RST2HTML_INDENT")]
        indent: usize,

        /// Fail on questionable markup instead of warning
        #[arg(long)]
        strict: bool,

        /// Render one file at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Html {
            input,
            output,
            indent,
            strict,
            from_json,
        }) => cmd_html(&input, output.as_deref(), indent, strict, from_json),
        Some(Commands::Json {
            input,
            output,
            compact,
            strict,
        }) => cmd_json(&input, output.as_deref(), compact, strict),
        Some(Commands::Info { inputs }) => cmd_info(&inputs),
        Some(Commands::Batch {
            inputs,
            output_dir,
            indent,
            strict,
            sequential,
        }) => cmd_batch(&inputs, &output_dir, indent, strict, sequential),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: render to stdout if input is provided
            if let Some(input) = cli.input {
                cmd_html(&input, None, cli.indent, false, false)
            } else {
                println!("{}", "Usage: rst2html <FILE>".yellow());
                println!("       rst2html --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Read a file, or stdin when the path is "-".
fn read_input(input: &Path) -> io::Result<String> {
    if input == Path::new("-") {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        fs::read_to_string(input)
    }
}

fn parse_options(strict: bool) -> ParseOptions {
    if strict {
        ParseOptions::new().strict()
    } else {
        ParseOptions::new().lenient()
    }
}

fn write_output(output: Option<&Path>, content: &str) -> io::Result<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        eprintln!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", content);
    }
    Ok(())
}

fn cmd_html(
    input: &Path,
    output: Option<&Path>,
    indent: usize,
    strict: bool,
    from_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = read_input(input)?;

    let doc = if from_json {
        JsonTreeParser::new().parse(&source)?
    } else {
        RstParser::with_options(parse_options(strict)).parse(&source)?
    };

    let html = rst2html::render_tree(&doc, &RenderOptions::new().with_indent(indent));
    write_output(output, &html)?;

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = read_input(input)?;
    let doc = RstParser::with_options(parse_options(strict)).parse(&source)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let mut json = rst2html::render::to_json(&doc, format)?;
    json.push('\n');
    write_output(output, &json)?;

    Ok(())
}

/// Statistics combined over one or more documents.
#[derive(Debug, Default)]
struct Summary {
    stats: NodeStats,
    lines: usize,
    words: usize,
    chars: usize,
    title: Option<String>,
}

fn summarize(inputs: &[PathBuf]) -> Result<Summary, Box<dyn std::error::Error>> {
    let mut summary = Summary::default();

    for input in inputs {
        let source = read_input(input)?;
        let doc = RstParser::new().parse(&source)?;
        let text = doc.plain_text();

        summary.stats.merge(&NodeStats::collect(&doc));
        summary.lines += source.lines().count();
        summary.words += text.split_whitespace().count();
        summary.chars += text.chars().count();
        if summary.title.is_none() {
            summary.title = first_title(&doc);
        }
    }

    Ok(summary)
}

fn cmd_info(inputs: &[PathBuf]) -> Result<(), Box<dyn std::error::Error>> {
    let summary = summarize(inputs)?;
    let stats = &summary.stats;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    if let [input] = inputs {
        println!("{}: {}", "File".bold(), input.display());
    } else {
        println!("{}: {}", "Files".bold(), inputs.len());
    }
    println!("{}: {}", "Lines".bold(), summary.lines);
    println!("{}: {}", "Nodes".bold(), stats.node_count);
    println!("{}: {}", "Max depth".bold(), stats.max_depth);

    if let Some(title) = &summary.title {
        println!("{}: {}", "Title".bold(), title);
    }

    println!();
    println!("{}", "Node Types".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for (kind, count) in &stats.counts {
        println!("{}: {}", kind.bold(), count);
    }

    if stats.has_fallbacks() {
        println!();
        println!("{}", "Rendered Without Dedicated Markup".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for kind in &stats.fallback_kinds {
            println!("  {} rst-unknown rst-{}", "•".yellow(), kind);
        }
    }

    println!();
    println!("{}: {}", "Words".bold(), summary.words);
    println!("{}: {}", "Characters".bold(), summary.chars);

    Ok(())
}

fn first_title(node: &Node) -> Option<String> {
    if let Node::Section { title, .. } = node {
        return Some(title.iter().map(Node::plain_text).collect());
    }
    node.children()?.iter().find_map(first_title)
}

fn cmd_batch(
    inputs: &[PathBuf],
    output_dir: &Path,
    indent: usize,
    strict: bool,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let outputs = output_paths(inputs, output_dir)?;
    fs::create_dir_all(output_dir)?;

    let sources = inputs
        .iter()
        .map(|path| fs::read_to_string(path))
        .collect::<io::Result<Vec<_>>>()?;

    let options = RenderOptions::new()
        .with_indent(indent)
        .with_parallel(!sequential);
    let results = render_batch(&sources, &parse_options(strict), &options);
    log::debug!("Writing {} outputs to {}", results.len(), output_dir.display());

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut failed = 0;
    for ((input, output), result) in inputs.iter().zip(&outputs).zip(results) {
        pb.set_message(input.display().to_string());
        match result {
            Ok(html) => {
                fs::write(output, html)?;
            }
            Err(e) => {
                pb.println(format!("{} {}: {}", "Failed".red(), input.display(), e));
                failed += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} rendered, {} failed",
        "Done!".green().bold(),
        inputs.len() - failed,
        failed
    );

    if failed > 0 {
        return Err(format!("{} of {} files failed", failed, inputs.len()).into());
    }
    Ok(())
}

/// Map each input to `<output_dir>/<stem>.html`.
///
/// Fails before anything is written when two inputs share a stem.
fn output_paths(
    inputs: &[PathBuf],
    output_dir: &Path,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut seen: HashMap<PathBuf, &Path> = HashMap::new();
    let mut outputs = Vec::with_capacity(inputs.len());

    for input in inputs {
        let stem = input
            .file_stem()
            .ok_or_else(|| format!("{} has no file name", input.display()))?;
        let mut name = stem.to_os_string();
        name.push(".html");
        let output = output_dir.join(name);

        if let Some(previous) = seen.insert(output.clone(), input.as_path()) {
            return Err(format!(
                "{} and {} would both be written to {}",
                previous.display(),
                input.display(),
                output.display()
            )
            .into());
        }
        outputs.push(output);
    }

    Ok(outputs)
}

fn cmd_version() {
    println!("{} {}", "rst2html".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("reStructuredText to HTML renderer");
    println!();
    println!("License: MIT");
}
