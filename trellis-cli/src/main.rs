//! Trellis CLI
//!
//! Parses an XML/XHTML document and prints it back, pretty-printed or
//! compact, or lists the elements matching a name.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use regex::Regex;
use trellis_common::warning::{clear_warnings, recorded_warnings};
use trellis_dom::{Content, NamePattern, Template};
use trellis_format::{FormatOptions, Formatter};

/// Trellis: format and query XML/XHTML documents
#[derive(Parser, Debug)]
#[command(name = "trellis")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Pretty-print a file
    trellis page.xhtml

    # Compact output of inline markup
    trellis --compact --xml '<a> <b/> </a>'

    # Keep whitespace inside <code> and the XHTML defaults
    trellis --xhtml --preserve code page.xhtml

    # List every h1..h6 element
    trellis --find '/^h[1-6]$/' page.xhtml

    # Dump the parsed tree as JSON
    trellis --json page.xml
"#)]
struct Cli {
    /// Path to the document
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse a markup string directly instead of a file
    #[arg(long, value_name = "XML")]
    xml: Option<String>,

    /// Spaces per indentation level
    #[arg(long, default_value = "2")]
    indent: usize,

    /// Write without added whitespace
    #[arg(short, long)]
    compact: bool,

    /// Keep whitespace inside elements with this name (repeatable)
    #[arg(short, long = "preserve", value_name = "NAME")]
    preserve: Vec<String>,

    /// Also keep whitespace inside pre, script, style and textarea
    #[arg(long)]
    xhtml: bool,

    /// List elements with this name, or matching /regex/
    #[arg(long, value_name = "NAME")]
    find: Option<String>,

    /// Print the parsed tree as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (source, markup) = load_input(&cli)?;

    clear_warnings();

    let nodes: Vec<Content> = trellis_xml::parse_str(&markup)
        .with_context(|| format!("failed to parse {source}"))?
        .into_iter()
        .filter(|node| !is_blank(node))
        .collect();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&nodes)?);
    } else if let Some(ref query) = cli.find {
        print_matches(&nodes, query)?;
    } else if cli.compact {
        for node in &nodes {
            println!("{node}");
        }
    } else {
        let options = format_options(&cli);
        for node in &nodes {
            print!("{}", Formatter::write_content(node, options.clone()));
        }
    }

    let warnings = recorded_warnings();
    if !warnings.is_empty() {
        eprintln!("{}", format!("{} warning(s)", warnings.len()).yellow());
    }
    Ok(())
}

/// Read the document from `--xml` or the file argument.
fn load_input(cli: &Cli) -> Result<(String, String)> {
    if let Some(ref markup) = cli.xml {
        Ok(("--xml input".to_string(), markup.clone()))
    } else if let Some(ref path) = cli.path {
        let markup = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok((path.display().to_string(), markup))
    } else {
        anyhow::bail!("a file path or --xml is required")
    }
}

fn format_options(cli: &Cli) -> FormatOptions {
    let mut options = FormatOptions::default().with_indent(" ".repeat(cli.indent));
    if cli.xhtml {
        options = options.with_preservers(trellis_xhtml::preservers());
    }
    for name in &cli.preserve {
        options = options.with_preserver(name.as_str());
    }
    options
}

/// Whitespace between top-level nodes carries no content.
fn is_blank(node: &Content) -> bool {
    node.character_data().is_some_and(|data| data.trim().is_empty())
}

/// `/regex/` selects by regex, anything else by exact name.
fn name_pattern(query: &str) -> Result<NamePattern> {
    match query.strip_prefix('/').and_then(|q| q.strip_suffix('/')) {
        Some(expression) => {
            let regex = Regex::new(expression)
                .with_context(|| format!("invalid name pattern {query}"))?;
            Ok(NamePattern::from(regex))
        }
        None => Ok(NamePattern::from(query)),
    }
}

fn print_matches(nodes: &[Content], query: &str) -> Result<()> {
    let template = Template::new(name_pattern(query)?);
    let mut count = 0;
    for element in nodes.iter().filter_map(Content::as_element) {
        for found in element.find(template.clone()) {
            if let Some(matched) = found.as_element() {
                println!("{matched}");
                count += 1;
            }
        }
    }
    println!("{}", format!("=== {count} match(es) for {query} ===").bold());
    Ok(())
}
