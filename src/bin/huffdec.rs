use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use huffdec::{Decoder, DecoderConfig, ParsedContainer, Validation};
use tracing::{debug, info};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[path = "huffdec/progress.rs"]
mod progress;
use progress::ReadProgress;

#[derive(Parser)]
#[command(version, about = "Decode frequency-table prefixed huffman containers")]
struct Cli {
    /// Raise the log level, can be repeated (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a container and write the decoded bytes
    Decode {
        /// Container file
        input: PathBuf,
        /// Where to write the decoded bytes. Defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// The input file holds the container as hex text
        #[arg(long)]
        hex: bool,
        /// Reject containers whose informational header fields don't match
        #[arg(long)]
        strict: bool,
    },
    /// Print the headers, the frequency table and the code of every symbol
    Inspect {
        /// Container file
        input: PathBuf,
        /// The input file holds the container as hex text
        #[arg(long)]
        hex: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Decode {
            input,
            output,
            hex,
            strict,
        } => {
            let raw = read_input(&input, hex)?;
            let validation = if strict {
                Validation::Strict
            } else {
                Validation::Lenient
            };
            let decoder = Decoder::new(DecoderConfig { validation });
            let decoded = decoder
                .decode_bytes(&raw)
                .wrap_err_with(|| format!("failed to decode {}", input.display()))?;
            info!("decoded {} symbols", decoded.len());

            match output {
                Some(path) => std::fs::write(&path, &decoded)
                    .wrap_err_with(|| format!("failed to write {}", path.display()))?,
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&decoded)?;
                    stdout.flush()?;
                }
            }
        }
        Commands::Inspect { input, hex } => {
            let raw = read_input(&input, hex)?;
            let container = Decoder::default()
                .parse(&raw)
                .wrap_err_with(|| format!("failed to parse {}", input.display()))?;
            print_container(&container, raw.len())?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .init();
}

fn read_input(path: &Path, is_hex: bool) -> Result<Vec<u8>> {
    let file =
        File::open(path).wrap_err_with(|| format!("failed to open {}", path.display()))?;
    let size = file.metadata()?.len();
    let mut reader = ReadProgress::new(file, size, &path.display().to_string())?;

    let mut raw = Vec::with_capacity(size as usize);
    reader
        .read_to_end(&mut raw)
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;

    if is_hex {
        let text = String::from_utf8(raw).wrap_err("hex input is not valid text")?;
        let digits: String = text.split_whitespace().collect();
        raw = hex::decode(digits).wrap_err("hex input contains invalid digits")?;
        debug!("hex input holds a {} byte container", raw.len());
    }

    Ok(raw)
}

fn print_container(container: &ParsedContainer<'_>, actual_size: usize) -> Result<()> {
    let mut out = std::io::stdout().lock();

    let table_header = &container.table_header;
    let payload_header = &container.payload_header;
    writeln!(
        out,
        "container size: {} bytes (header says {})",
        actual_size, table_header.container_size
    )?;
    writeln!(out, "reserved:       {}", table_header.reserved)?;
    writeln!(out, "symbols:        {}", table_header.symbol_count)?;
    writeln!(
        out,
        "payload:        {} bits in {} bytes, {} symbols",
        payload_header.packed_bits, payload_header.packed_bytes, payload_header.decoded_symbols
    )?;
    writeln!(out, "tree weight:    {}", container.tree.total_weight())?;
    writeln!(out)?;

    let codes = container.tree.codes();
    writeln!(out, "{:<8}{:>12}  code", "symbol", "frequency")?;
    for (symbol, frequency) in container.table.iter() {
        let code = codes
            .iter()
            .find(|c| c.symbol == symbol)
            .map(|c| c.to_string())
            .unwrap_or_default();
        writeln!(out, "{:<8}{:>12}  {}", display_symbol(symbol), frequency, code)?;
    }

    Ok(())
}

fn display_symbol(symbol: u8) -> String {
    if symbol.is_ascii_graphic() || symbol == b' ' {
        format!("'{}'", symbol as char)
    } else {
        format!("0x{:02X}", symbol)
    }
}
