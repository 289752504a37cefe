//! Playprint CLI - compile workprints and inspect playprints.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use playprint::playprint::{FieldReader, ItemTree};
use playprint::prelude::*;

#[derive(Parser)]
#[command(name = "playprint", about = "Workprint -> playprint compiler")]
struct Cli {
    /// Show debug output (-vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress warnings
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Settings shared by commands that encode or decode a playprint.
#[derive(Args)]
struct FormatArgs {
    /// Reference table JSON: [{ "name": ..., "handle": ... }]
    #[arg(long)]
    refs: Option<PathBuf>,

    /// Vector scalar format: floating, fixed16.16, fixed20.12
    #[arg(long, default_value = "floating")]
    format: ScalarFormat,

    /// Byte order: little, big
    #[arg(long, default_value = "little")]
    endian: Endian,
}

impl FormatArgs {
    fn options(&self) -> CompileOptions {
        CompileOptions::new()
            .with_scalar_format(self.format)
            .with_byte_order(self.endian)
    }

    fn references(&self) -> anyhow::Result<ReferenceTable> {
        match &self.refs {
            Some(path) => ReferenceTable::from_json_file(path)
                .with_context(|| format!("reading reference table {}", path.display())),
            None => Ok(ReferenceTable::empty()),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a workprint JSON document into a playprint
    #[command(visible_alias = "c")]
    Compile {
        workprint: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[command(flatten)]
        format: FormatArgs,
        /// Maximum playprint size in bytes
        #[arg(long)]
        limit: Option<usize>,
        /// Fail if any field could not be written
        #[arg(long)]
        strict: bool,
    },
    /// Decode a playprint field by field using its source workprint
    /// (the playprint must have compiled without warnings)
    #[command(visible_alias = "d")]
    Dump {
        workprint: PathBuf,
        playprint: PathBuf,
        #[command(flatten)]
        format: FormatArgs,
    },
    /// List registered data types
    #[command(visible_alias = "t")]
    Types,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Err(err) = run(cli.command) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Compile { workprint, output, format, limit, strict } => {
            cmd_compile(&workprint, &output, &format, limit, strict)
        }
        Commands::Dump { workprint, playprint, format } => cmd_dump(&workprint, &playprint, &format),
        Commands::Types => {
            cmd_types();
            Ok(())
        }
    }
}

fn load_workprint(path: &Path) -> anyhow::Result<Workprint> {
    Workprint::from_json_file(path).with_context(|| format!("reading workprint {}", path.display()))
}

fn cmd_compile(
    workprint: &Path,
    output: &Path,
    format: &FormatArgs,
    limit: Option<usize>,
    strict: bool,
) -> anyhow::Result<()> {
    let wp = load_workprint(workprint)?;
    let refs = format.references()?;
    let mut options = format.options();
    if let Some(limit) = limit {
        options = options.with_size_limit(limit);
    }
    debug!(nodes = wp.len(), refs = refs.len(), "loaded inputs");

    let out = compile(&wp, &refs, &options)?;
    for d in out.diagnostics() {
        eprintln!("warning: {d}");
    }
    if strict && !out.is_clean() {
        bail!("{} field(s) could not be written", out.diagnostics().len());
    }

    out.write_to(output)
        .with_context(|| format!("writing {}", output.display()))?;
    info!(bytes = out.bytes().len(), path = %output.display(), "playprint written");
    println!("{}: {} bytes, {} warning(s)", output.display(), out.bytes().len(), out.diagnostics().len());
    Ok(())
}

fn cmd_dump(workprint: &Path, playprint: &Path, format: &FormatArgs) -> anyhow::Result<()> {
    let wp = load_workprint(workprint)?;
    let refs = format.references()?;
    let options = format.options();
    let bytes = std::fs::read(playprint).with_context(|| format!("reading {}", playprint.display()))?;

    let items = ItemTree::build(&wp, TypeRegistry::builtin())?;
    let Some(root) = wp.root() else {
        bail!("workprint has no root");
    };

    let mut reader = FieldReader::new(&bytes, &options);
    for id in wp.preorder(root) {
        let Some(item) = items.item(id) else { continue };
        println!("{}", wp.path(id));
        for field in item.fields() {
            let at = reader.position();
            let value = reader
                .read_value(field.value.kind(), &refs)
                .with_context(|| format!("{}.{} at offset {at}", wp.path(id), field.name))?;
            println!("    {:<16} {:<12} {:?}", field.name, field.value.kind().name(), value);
        }
    }
    if !reader.is_at_end() {
        bail!("{} trailing byte(s) after last field", reader.remaining());
    }
    Ok(())
}

fn cmd_types() {
    println!("{:<14} {:>8}  {}", "NAME", "LENGTH", "ENCODING");
    for entry in TypeRegistry::builtin().iter() {
        let length = match entry.kind.declared_len() {
            Some(n) => n.to_string(),
            None => "4*n".to_string(),
        };
        let encoding = if entry.kind.is_format_aware() {
            "scalar format"
        } else if entry.kind == DataKind::MediaRef {
            "table index"
        } else {
            "plain"
        };
        println!("{:<14} {:>8}  {}", entry.name, length, encoding);
    }
}
