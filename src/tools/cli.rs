use clap::Parser;
use log::{info, LevelFilter};
use std::str::FromStr;
use std::{fmt::Display, fmt::Formatter};

use crate::bwt_algorithms::suffix_sort::SortAlgorithm;
use crate::compression::block::Stage;

/// Verbosity of user information
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// Log level for this verbosity.
    pub fn level_filter(&self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Off,
            Verbosity::Errors => LevelFilter::Error,
            Verbosity::Warnings => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Forward or inverse transform
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bwt" => Ok(Stage::Bwt),
            "mtf" => Ok(Stage::Mtf),
            "pipeline" => Ok(Stage::Pipeline),
            other => Err(format!("unknown stage '{}' (bwt, mtf, pipeline)", other)),
        }
    }
}

impl FromStr for SortAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(SortAlgorithm::Auto),
            "native" => Ok(SortAlgorithm::Native),
            "sais" => Ok(SortAlgorithm::Sais),
            other => Err(format!("unknown algorithm '{}' (auto, native, sais)", other)),
        }
    }
}

/// All user settable options that control program behavior
#[derive(Debug)]
pub struct Options {
    /// Algorithm used to sort rotations
    pub algorithm: SortAlgorithm,
    /// Transform stage(s) to run
    pub stage: Stage,
    /// Vec of names of files to read for input
    pub files: Vec<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Don't remove input files after processing
    pub keep_input_files: bool,
    /// Compress/Decompress
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl Options {
    pub fn new() -> Self {
        Self {
            algorithm: SortAlgorithm::Auto,
            stage: Stage::Pipeline,
            files: vec![],
            force_overwrite: false,
            keep_input_files: false,
            op_mode: Mode::Compress,
            output: Output::File,
            verbose: Verbosity::Errors,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Burrows-Wheeler block-sorting transform with Move-To-Front recoding",
    long_about = "
    Transforms each input as a single in-memory block. The default stage runs the
    Burrows-Wheeler Transform followed by Move-To-Front, producing a 4 byte block index
    and a stream of small ranks ready for an entropy coder.

    With no files, reads stdin and writes stdout. A lone `-` compresses and a lone `+`
    decompresses, as in the classic filter programs."
)]
pub struct Args {
    /// Files to process (`-` to compress, `+` to decompress stdin)
    #[clap()]
    files: Vec<String>,

    /// Apply the forward transform (default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Apply the inverse transform
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Stage to run: bwt, mtf or pipeline
    #[clap(long, default_value = "pipeline")]
    stage: Stage,

    /// Rotation sort: auto, native or sais
    #[clap(long, default_value = "auto")]
    algorithm: SortAlgorithm,

    /// Send output to standard out
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Overwrite existing output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Keep (don't delete) input files
    #[clap(short = 'k', long = "keep")]
    keep: bool,

    /// Be verbose (repeat for more)
    #[clap(short = 'v', long = "verbose", parse(from_occurrences))]
    verbose: u8,

    /// Suppress all messages
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,
}

/// Parse the process command line into Options.
pub fn options_init() -> Options {
    options_from(Args::parse())
}

/// Put command line information from CLAP into our internal structure.
pub fn options_from(args: Args) -> Options {
    let mut opts = Options::new();

    for arg in args.files {
        match arg.as_str() {
            "-" => opts.op_mode = Mode::Compress,
            "+" => opts.op_mode = Mode::Decompress,
            _ => opts.files.push(arg),
        }
    }
    if args.compress {
        opts.op_mode = Mode::Compress
    };
    if args.decompress {
        opts.op_mode = Mode::Decompress
    };

    opts.stage = args.stage;
    opts.algorithm = args.algorithm;
    opts.force_overwrite = args.force;
    opts.keep_input_files = args.keep;
    if args.stdout {
        opts.output = Output::Stdout
    };

    opts.verbose = if args.quiet {
        Verbosity::Quiet
    } else {
        match args.verbose {
            0 => Verbosity::Errors,
            1 => Verbosity::Warnings,
            2 => Verbosity::Info,
            3 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    };
    opts
}

/// Report initialization status to the user.
pub fn log_options(opts: &Options) {
    info!("---- Initialization Start ----");
    info!("Verbosity set to {:?}", opts.verbose);
    info!("Operational mode set to {}", opts.op_mode);
    info!("Stage set to {}", opts.stage);
    info!("Sort algorithm set to {:?}", opts.algorithm);
    if opts.files.is_empty() {
        info!("Filtering stdin to stdout");
    } else {
        info!("Input files: {:?}, output to {}", opts.files, opts.output);
    }
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    if opts.keep_input_files {
        info!("Keeping input files")
    };
    info!("---- Initialization End ----");
}
