use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod compile;
mod diagnostics;
mod emit;
mod error;
mod render;
mod spec;
mod tree;
mod vocab;

pub type Result<T> = anyhow::Result<T>;

/// Exit status for every fatal error, usage errors included.
const FAILURE: u8 = 255;

#[derive(Parser)]
#[command(name = "vspec2c")]
#[command(about = "Convert a vspec signal tree to a C header and source file", long_about = None)]
struct Cli {
    /// Add include directory to search for included vspec files.
    #[arg(short = 'I', value_name = "include-dir")]
    include_dirs: Vec<PathBuf>,

    /// File to use for storing generated UUIDs for signals with a given path
    /// prefix. Can be used multiple times.
    #[arg(short = 'i', value_name = "prefix:uuid-file")]
    uuid_dbs: Vec<spec::UuidDbArg>,

    /// The vehicle specification file to parse.
    vspec_file: String,

    /// The file to output the C header file to.
    c_header_file: PathBuf,

    /// The file to output the C source file to.
    c_source_file: PathBuf,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(FAILURE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            diagnostics::report(&e);
            ExitCode::from(FAILURE)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    use anyhow::Context;

    // 1) Load the tree and fill in database-managed UUIDs.
    let loader = spec::Loader::new(cli.include_dirs);
    let mut tree = loader.load(&cli.vspec_file)?;

    let mut dbs = cli
        .uuid_dbs
        .iter()
        .map(spec::UuidDb::open)
        .collect::<Result<Vec<_>>>()?;
    spec::assign_uuids(&mut tree, &mut dbs)?;

    // 2) Compile both artifacts in memory.
    let header_name = header_basename(&cli.c_header_file)?;
    let artifacts = compile::compile(&tree, &header_name, &mut |notice| {
        diagnostics::warn(notice)
    })?;

    // 3) Write only once both exist; UUID databases last, so a failed run
    // leaves every file untouched.
    std::fs::write(&cli.c_header_file, &artifacts.header)
        .with_context(|| format!("write C header {}", cli.c_header_file.display()))?;
    std::fs::write(&cli.c_source_file, &artifacts.source)
        .with_context(|| format!("write C source {}", cli.c_source_file.display()))?;
    for db in &dbs {
        db.save()?;
    }
    println!(
        "Wrote {} and {} ({} signals)",
        cli.c_header_file.display(),
        cli.c_source_file.display(),
        artifacts.signals
    );

    Ok(())
}

fn header_basename(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow::anyhow!("C header path has no file name: {}", path.display()))
}
