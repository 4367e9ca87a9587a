//! hilite - print source files with syntax highlighting

use std::env;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use hilite::config::Config;
use hilite::error::{HiliteError, Result};
use hilite::render::Renderer;
use hilite::syntax::{load_grammar_file, GrammarRegistry};
use hilite::{Document, LineDecorator};

/// Grammar used when nothing else picks one
const FALLBACK_LANGUAGE: &str = "javascript";

/// Command-line options
#[derive(Debug, Default, PartialEq)]
struct Options {
    file: Option<PathBuf>,
    language: Option<String>,
    theme: Option<String>,
    line_numbers: bool,
    color: Option<bool>,
    width: Option<usize>,
    grammars: Vec<PathBuf>,
    list_languages: bool,
}

#[derive(Debug, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let options = match parse_args(&args)? {
        Command::Help => {
            print_usage();
            return Ok(());
        }
        Command::Version => {
            print_version();
            return Ok(());
        }
        Command::Run(options) => options,
    };

    let mut config = Config::load()?;

    let mut registry = GrammarRegistry::new();
    for path in config.grammars.iter().chain(&options.grammars) {
        registry.add(load_grammar_file(path)?);
    }

    if options.list_languages {
        for name in registry.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let language = resolve_language(&options, &config, &registry);
    let grammar = registry.resolve(&language)?;
    debug!(language = %grammar.name, "selected grammar");

    let text = match &options.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let doc = Document::from_text(&text);

    if let Some(theme) = &options.theme {
        config.theme = theme.clone();
    }
    let color = use_color(options.color, config.color, io::stdout().is_terminal());
    let renderer = Renderer::new(config.theme()?)
        .with_color(color)
        .with_line_numbers(options.line_numbers || config.show_line_numbers)
        .with_max_width(options.width.or(config.width));

    let mut decorator = LineDecorator::new(grammar);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    renderer.render_document(&mut out, &doc, &mut decorator)?;

    let stats = decorator.stats();
    debug!(lines = doc.len(), hits = stats.hits, misses = stats.misses, "rendered");

    Ok(())
}

/// Pick a grammar name: flag, then file extension, then config, then the fallback
fn resolve_language(options: &Options, config: &Config, registry: &GrammarRegistry) -> String {
    options
        .language
        .clone()
        .or_else(|| {
            options
                .file
                .as_deref()
                .and_then(|f| registry.detect(f))
                .map(str::to_string)
        })
        .or_else(|| config.language.clone())
        .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string())
}

/// `--color`/`--no-color` win; otherwise the config setting, on a terminal only
fn use_color(flag: Option<bool>, config: bool, is_terminal: bool) -> bool {
    match flag {
        Some(color) => color,
        None => config && is_terminal,
    }
}

/// Parse command-line arguments (without the program name)
fn parse_args(args: &[String]) -> Result<Command> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--language" | "-l" => options.language = Some(value_for(arg, iter.next())?),
            "--theme" | "-t" => options.theme = Some(value_for(arg, iter.next())?),
            "--grammar" => options.grammars.push(PathBuf::from(value_for(arg, iter.next())?)),
            "--width" | "-w" => {
                let value = value_for(arg, iter.next())?;
                let width = value
                    .parse::<usize>()
                    .map_err(|_| HiliteError::Usage(format!("invalid width: {}", value)))?;
                options.width = Some(width);
            }
            "--line-numbers" | "-n" => options.line_numbers = true,
            "--no-color" => options.color = Some(false),
            "--color" => options.color = Some(true),
            "--list-languages" => options.list_languages = true,
            other if other.starts_with('-') && other != "-" => {
                return Err(HiliteError::Usage(format!("unknown option: {}", other)));
            }
            path => {
                if options.file.is_some() {
                    return Err(HiliteError::Usage("only one file may be given".to_string()));
                }
                if path != "-" {
                    options.file = Some(PathBuf::from(path));
                }
            }
        }
    }

    Ok(Command::Run(options))
}

fn value_for(flag: &str, value: Option<&String>) -> Result<String> {
    value
        .cloned()
        .ok_or_else(|| HiliteError::Usage(format!("{} needs a value", flag)))
}

fn print_usage() {
    println!("hilite {} - syntax highlighting for the terminal", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: hilite [OPTIONS] [FILE]");
    println!();
    println!("Reads FILE (or standard input) and prints it highlighted.");
    println!();
    println!("Options:");
    println!("  -l, --language NAME  Grammar to use (default: from extension)");
    println!("  -t, --theme NAME     Theme: default, funky");
    println!("  -n, --line-numbers   Show line numbers");
    println!("  -w, --width COLS     Clip lines to COLS display columns");
    println!("      --grammar FILE   Load an extra grammar from a TOML file");
    println!("      --color          Force colored output");
    println!("      --no-color       Disable colored output");
    println!("      --list-languages List available grammars");
    println!("  -h, --help           Show this help message");
    println!("  -V, --version        Show version information");
    println!();
    println!("Configuration is read from ~/.hilite.toml (override with HILITE_CONFIG).");
    println!("Set RUST_LOG=debug for diagnostics.");
}

fn print_version() {
    println!("hilite {}", env!("CARGO_PKG_VERSION"));
}
