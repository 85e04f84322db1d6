//! Dentyolo: grouped YOLO labels from dental X-ray COCO annotations.
//!
//! Each source document annotates individual teeth with categories named
//! after their tooth number (`Tooth_14`, `Tooth_15`, ...). Dentyolo groups
//! neighbouring teeth of the same quadrant into windows of up to three,
//! merges their boxes, and writes one YOLOv5 label line per group. Class
//! ids are allocated per run from the group labels (`14-15`, `14-15-16`).
//!
//! # Modules
//!
//! - [`ir`]: Source record model, box geometry, COCO reader and YOLO writer
//! - [`grouping`]: Sliding-window tooth grouping
//! - [`labels`]: Per-run class id allocation
//! - [`conversion`]: Directory conversion pipeline and its report
//! - [`error`]: Error types for dentyolo operations

pub mod conversion;
pub mod error;
pub mod grouping;
pub mod ir;
pub mod labels;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

pub use conversion::{convert_dir, ConvertOptions, FailurePolicy};
pub use error::DentyoloError;
pub use grouping::SingletonPolicy;
pub use labels::LabelAllocator;

/// The dentyolo CLI application.
#[derive(Parser)]
#[command(name = "dentyolo")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Convert a directory of COCO documents into grouped YOLO labels.
    Convert(ConvertArgs),
}

/// Arguments for the convert subcommand.
#[derive(clap::Args)]
struct ConvertArgs {
    /// Directory holding the COCO JSON documents and their images.
    #[arg(
        short,
        long,
        env = "DENTYOLO_INPUT_DIR",
        default_value = "data/XRAY/right"
    )]
    input: PathBuf,

    /// Directory receiving label files and image copies (created if missing).
    #[arg(short, long, env = "DENTYOLO_OUTPUT_DIR", default_value = "output")]
    output: PathBuf,

    /// When a single tooth becomes a group of its own.
    #[arg(long, value_enum, default_value_t = SingletonPolicy::Isolated)]
    singletons: SingletonPolicy,

    /// Skip files that fail instead of aborting the run.
    #[arg(long)]
    keep_going: bool,

    /// Output format for the report.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    report: ReportFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

/// Run the dentyolo CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), DentyoloError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert(args)) => run_convert(args),
        None => {
            println!("dentyolo {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Grouped YOLO labels from dental X-ray COCO annotations.");
            println!();
            println!("Run 'dentyolo --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the convert subcommand.
fn run_convert(args: ConvertArgs) -> Result<(), DentyoloError> {
    let opts = ConvertOptions {
        input_dir: args.input,
        output_dir: args.output,
        singletons: args.singletons,
        on_error: if args.keep_going {
            FailurePolicy::Skip
        } else {
            FailurePolicy::Abort
        },
    };

    let mut labels = LabelAllocator::new();
    let report = convert_dir(&opts, &mut labels)?;

    match args.report {
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&report).map_err(DentyoloError::ReportWrite)?;
            println!("{}", json);
        }
        ReportFormat::Text => print!("{}", report),
    }

    if report.counts.skipped > 0 {
        Err(DentyoloError::FilesSkipped {
            skipped: report.counts.skipped,
        })
    } else {
        Ok(())
    }
}
