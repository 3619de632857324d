use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use diakritik::{CaseSensitivity, CompiledQuery, DiacriticMap};

/// Print lines that contain QUERY, ignoring Slovak and Czech diacritics.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Search term; may itself contain diacritics
    #[arg(value_name = "QUERY")]
    query: String,

    /// Files to search (standard input when omitted)
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Built-in diacritic table
    #[arg(short = 'm', long, value_enum, default_value_t = MapChoice::SkCz)]
    map: MapChoice,

    /// Custom diacritic table (TOML), replaces --map
    #[arg(short = 't', long, value_name = "FILE", conflicts_with = "map")]
    table: Option<PathBuf>,

    /// Match letter case exactly
    #[arg(short = 's', long)]
    case_sensitive: bool,

    /// Treat QUERY as words that must appear in order
    #[arg(short = 'w', long)]
    multi_word: bool,

    /// Print the built pattern and exit
    #[arg(short = 'p', long)]
    print_pattern: bool,

    /// Print only the number of matching lines
    #[arg(short = 'c', long)]
    count: bool,

    /// Prefix each matching line with its line number
    #[arg(short = 'n', long)]
    line_number: bool,

    /// Log built patterns to stderr
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum MapChoice {
    #[value(name = "sk")]
    Sk,
    #[value(name = "cz")]
    Cz,
    #[value(name = "sk-cz")]
    SkCz,
}

impl MapChoice {
    fn map(self) -> &'static DiacriticMap {
        match self {
            MapChoice::Sk => DiacriticMap::slovak(),
            MapChoice::Cz => DiacriticMap::czech(),
            MapChoice::SkCz => DiacriticMap::slovak_czech(),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("diakritik: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Returns whether any line matched.
fn run(args: &Args) -> Result<bool> {
    let custom;
    let map = match &args.table {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            custom = DiacriticMap::from_toml_str(&source)
                .with_context(|| format!("invalid table {}", path.display()))?;
            &custom
        }
        None => args.map.map(),
    };

    let case = CaseSensitivity::from(args.case_sensitive);
    let query = if args.multi_word {
        CompiledQuery::multi_word(&args.query, map, case)?
    } else {
        CompiledQuery::single(&args.query, map, case)?
    };

    if args.print_pattern {
        println!("{}", query.as_ref().map_or("", CompiledQuery::pattern));
        return Ok(query.is_some());
    }
    let Some(query) = query else {
        return Ok(false);
    };

    let mut any = false;
    if args.files.is_empty() {
        let mut contents = String::new();
        io::stdin()
            .read_to_string(&mut contents)
            .context("failed to read stdin")?;
        any |= report(args, &query, None, &contents);
    } else {
        let label = args.files.len() > 1;
        for path in &args.files {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let name = path.display().to_string();
            any |= report(args, &query, label.then_some(name.as_str()), &contents);
        }
    }
    Ok(any)
}

/// Print the matching lines of one input. Returns whether any line matched.
fn report(args: &Args, query: &CompiledQuery, name: Option<&str>, contents: &str) -> bool {
    let mut matched = 0usize;
    for (index, line) in contents.lines().enumerate() {
        if !query.is_match(line) {
            continue;
        }
        matched += 1;
        if args.count {
            continue;
        }
        let mut prefix = String::new();
        if let Some(name) = name {
            prefix.push_str(name);
            prefix.push(':');
        }
        if args.line_number {
            prefix.push_str(&format!("{}:", index + 1));
        }
        println!("{prefix}{line}");
    }
    if args.count {
        match name {
            Some(name) => println!("{name}:{matched}"),
            None => println!("{matched}"),
        }
    }
    matched > 0
}
