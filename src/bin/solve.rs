//! CLI driver for the matching solver.
//!
//! Reads a dense weight matrix from a file or stdin, runs one of the two
//! matching methods, and writes the resulting matching to stdout. See
//! `solve --help` for usage.

use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use bipartite_matching::error::{InputError, SolveError};
use bipartite_matching::instance::BipartiteInstance;
use bipartite_matching::solver::MatchingSolver;

use clap::{Parser, ValueEnum};

/// Computes a maximum-weight matching on a dense bipartite weight matrix.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Matrix file to read; reads stdin if omitted.
    path: Option<PathBuf>,

    /// Which matching variant to compute.
    #[arg(long, value_enum, default_value_t = Mode::Maximum)]
    mode: Mode,

    /// Output format for the resulting matching.
    #[arg(long, value_enum, default_value_t = Format::Pairs)]
    format: Format,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Maximum-weight matching, not necessarily perfect.
    Maximum,
    /// Maximum-weight perfect matching.
    Perfect,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// Space-separated `i-j` pairs, one per matched left vertex.
    Pairs,
    /// A JSON array of `[i, j]` pairs.
    Json,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let contents = match read_input(cli.path.as_deref()) {
        Ok(contents) => contents,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(1);
        }
    };

    let mut instance = match BipartiteInstance::from_matrix(contents.as_bytes()) {
        Ok(instance) => instance,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(1);
        }
    };
    let n = instance.n();

    let solver = MatchingSolver::new(&mut instance);
    let matching = match cli.mode {
        Mode::Maximum => solver.maximum_matching(),
        Mode::Perfect => solver.maximum_perfect_matching(),
    };

    let matching = match matching {
        Ok(matching) => matching,
        Err(err) => {
            eprintln!("error: {err}");
            return exit_code_for(&err);
        }
    };

    print_matching(&matching, n, cli.format);
    ExitCode::SUCCESS
}

fn read_input(path: Option<&std::path::Path>) -> Result<String, InputError> {
    let mut contents = String::new();
    match path {
        Some(path) => {
            let mut file = File::open(path).map_err(|source| InputError::FileNotFound {
                path: path.display().to_string(),
                source,
            })?;
            file.read_to_string(&mut contents)
                .map_err(|source| InputError::FileNotFound {
                    path: path.display().to_string(),
                    source,
                })?;
        }
        None => {
            io::stdin()
                .read_to_string(&mut contents)
                .map_err(|source| InputError::FileNotFound {
                    path: "<stdin>".to_string(),
                    source,
                })?;
        }
    }
    Ok(contents)
}

fn exit_code_for(err: &SolveError) -> ExitCode {
    match err {
        SolveError::Heap(_) | SolveError::Graph(_) => ExitCode::from(2),
    }
}

fn print_matching(matching: &[Option<usize>], n: usize, format: Format) {
    match format {
        Format::Pairs => {
            let rendered: Vec<String> = (0..n)
                .filter_map(|i| matching[i].map(|j| format!("{}-{}", i, j - n)))
                .collect();
            println!("{}", rendered.join(" "));
        }
        Format::Json => {
            let rendered: Vec<String> = (0..n)
                .filter_map(|i| matching[i].map(|j| format!("[{}, {}]", i, j - n)))
                .collect();
            println!("[{}]", rendered.join(", "));
        }
    }
}
