use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use huffpack::{
    compress_with_stats, encode_only, CompressionStats, Container, ContainerConfig, PayloadFormat,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Compress into a packed container
    Compress,
    /// Decompress a packed container
    Decompress,
    /// Encode into a bit-string container (diagnostic)
    Encode,
    /// Decode a bit-string container (diagnostic)
    Decode,
}

impl Mode {
    fn writes_container(&self) -> bool {
        matches!(self, Self::Compress | Self::Encode)
    }

    fn expected_format(&self) -> PayloadFormat {
        match self {
            Self::Compress | Self::Decompress => PayloadFormat::Packed,
            Self::Encode | Self::Decode => PayloadFormat::BitString,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "huffpack")]
#[command(about = "Compress and decompress files with Huffman coding")]
#[command(version)]
struct Args {
    /// Operation to perform
    #[arg(short, long, value_enum, default_value = "compress")]
    mode: Mode,

    /// Shorthand for --mode compress
    #[arg(short = 'c', conflicts_with_all = ["mode", "decompress", "encode", "decode"])]
    compress: bool,

    /// Shorthand for --mode decompress
    #[arg(short = 'd', conflicts_with_all = ["mode", "encode", "decode"])]
    decompress: bool,

    /// Shorthand for --mode encode
    #[arg(short = 'v', conflicts_with_all = ["mode", "decode"])]
    encode: bool,

    /// Shorthand for --mode decode
    #[arg(short = 'w', conflicts_with = "mode")]
    decode: bool,

    /// Input file (use - for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Output file (use - for stdout)
    #[arg(short, long)]
    output: PathBuf,

    /// Show verbose statistics and debug logging
    #[arg(long)]
    verbose: bool,

    /// Skip payload checksum verification when reading a container
    #[arg(long)]
    no_verify: bool,

    /// Also print the bit string to stderr (encode mode only)
    #[arg(long)]
    print_bits: bool,
}

impl Args {
    fn resolved_mode(&self) -> Mode {
        if self.compress {
            Mode::Compress
        } else if self.decompress {
            Mode::Decompress
        } else if self.encode {
            Mode::Encode
        } else if self.decode {
            Mode::Decode
        } else {
            self.mode
        }
    }
}

/// Exit code for any failure
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();
    if args.print_bits && args.resolved_mode() != Mode::Encode {
        Args::command()
            .error(ErrorKind::ArgumentConflict, "--print-bits only applies to encode mode")
            .exit();
    }
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mode = args.resolved_mode();
    debug!(?mode, input = %args.input.display(), output = %args.output.display(), "starting");

    let input = read_input(&args.input)?;
    let start = Instant::now();

    if mode.writes_container() {
        let container = match mode {
            Mode::Compress => {
                let (packed, ring, stats) = compress_with_stats(&input)?;
                if args.verbose {
                    print_stats(&stats);
                }
                Container::new(PayloadFormat::Packed, ring, packed)
            }
            _ => {
                let (bits, ring) = encode_only(&input)?;
                if args.print_bits {
                    eprintln!("{}", bits);
                }
                Container::new(PayloadFormat::BitString, ring, bits.into_bytes())
            }
        };

        let written = with_output(&args.output, |w| container.write_to(w))?;
        if args.verbose {
            eprintln!("  Container bytes:  {}", written);
        }
    } else {
        let config = ContainerConfig { verify_checksum: !args.no_verify };
        let container = Container::read_from(input.as_slice(), &config)?;
        if container.format != mode.expected_format() {
            warn!(
                stored = ?container.format,
                ?mode,
                "container payload format does not match mode, decoding stored format"
            );
        }

        let message = container.decode()?;
        with_output(&args.output, |mut w| {
            w.write_all(&message)?;
            w.flush()?;
            Ok(message.len() as u64)
        })?;
        if args.verbose {
            eprintln!("Decoded {} bytes", message.len());
        }
    }

    if args.verbose {
        eprintln!("  Time:             {:.2?}", start.elapsed());
    }
    Ok(())
}

fn print_stats(stats: &CompressionStats) {
    eprintln!("Compression complete:");
    eprintln!("  Input bytes:      {}", stats.input_bytes);
    eprintln!("  Distinct symbols: {}", stats.distinct_symbols);
    eprintln!("  Tree depth:       {}", stats.tree_depth);
    eprintln!("  Max code length:  {}", stats.max_code_length);
    eprintln!("  Avg code length:  {:.3} bits", stats.avg_code_length());
    eprintln!("  Encoded bits:     {}", stats.encoded_bits);
    eprintln!("  Packed bytes:     {}", stats.output_bytes);
    eprintln!("  Ratio:            {:.3}", stats.ratio());
}

fn is_stdio(path: &Path) -> bool {
    path.to_str() == Some("-")
}

fn read_input(path: &Path) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    if is_stdio(path) {
        io::stdin().lock().read_to_end(&mut data)?;
    } else {
        BufReader::new(File::open(path)?).read_to_end(&mut data)?;
    }
    Ok(data)
}

fn with_output<F>(path: &Path, write: F) -> huffpack::Result<u64>
where
    F: FnOnce(Box<dyn Write>) -> huffpack::Result<u64>,
{
    let output: Box<dyn Write> = if is_stdio(path) {
        Box::new(io::stdout().lock())
    } else {
        Box::new(BufWriter::new(File::create(path)?))
    };
    write(output)
}
