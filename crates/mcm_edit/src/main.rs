#![warn(clippy::all, clippy::pedantic)]

mod colors;

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anstream::{eprintln, println};
use clap::{Parser, Subcommand};
use flexi_logger::{Duplicate, FileSpec, Logger, LoggerHandle};
use mcm_engine::{
    convert::{convert_font_to_sheet, convert_sheet_to_font, inject_logo_file},
    EngineError, SHEET_HEIGHT, SHEET_WIDTH,
};
use thiserror::Error;

use crate::colors::{GREEN, RED, RESET};

/// Bad input: missing files, malformed fonts or images.
const EXIT_ERROR: u8 = 2;
/// Anything that points to a bug.
const EXIT_FATAL: u8 = 1;

const EXAMPLES: &str = "examples:
  mcm_edit mcm2sheet font.mcm sheet.png
  mcm_edit sheet2mcm sheet.png font.mcm
  mcm_edit inject-logo font.mcm logo_288x72.png font_with_logo.mcm";

#[derive(Parser)]
#[command(version, about = "Edit MAX7456 / AT7456E OSD fonts (.mcm)", long_about = None, after_help = EXAMPLES)]
pub struct Cli {
    #[arg(help = "Log progress to stderr.", short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[arg(help = "Write the log to this file as well.", long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "mcm2sheet",
        about = "Convert .mcm -> 192x288 PNG sheet",
        long_about = "Extract all 256 glyphs into a 16x16 PNG sheet (12x18 per glyph)."
    )]
    Mcm2Sheet {
        #[arg(value_name = "FONT.mcm")]
        mcm: PathBuf,
        #[arg(value_name = "SHEET.png")]
        png: PathBuf,
    },

    #[command(
        name = "sheet2mcm",
        about = "Convert 192x288 PNG sheet -> .mcm",
        long_about = "Build a full .mcm font from a 192x288 glyph sheet. Only black, white, gray (128,128,128) and green (0,255,0) pixels are allowed."
    )]
    Sheet2Mcm {
        #[arg(value_name = "SHEET.png")]
        png: PathBuf,
        #[arg(value_name = "FONT.mcm")]
        mcm: PathBuf,
    },

    #[command(
        name = "inject-logo",
        about = "Inject pre-tiled logo PNG into glyphs 0xA0-0xFF",
        long_about = "Injects a pre-tiled logo into glyph indices 0xA0-0xFF (96 tiles). The logo must be aligned to 12x18 tiles, e.g. 192x108 (16x6) or 288x72 (24x4)."
    )]
    InjectLogo {
        #[arg(value_name = "BASE_FONT.mcm")]
        base_mcm: PathBuf,
        #[arg(value_name = "LOGO.png")]
        logo_png: PathBuf,
        #[arg(value_name = "OUTPUT.mcm")]
        out_mcm: PathBuf,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{what} not found: {path}")]
    InputNotFound { what: &'static str, path: PathBuf },
}

fn main() -> ExitCode {
    let args = Cli::parse();
    let _logger = start_logger(&args);
    log::info!("Starting mcm_edit {}", env!("CARGO_PKG_VERSION"));

    match run(&args.command) {
        Ok(message) => {
            println!("{GREEN}OK:{RESET} {message}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::debug!("{err:?}");
            let code = exit_code(&err);
            if code == EXIT_FATAL {
                eprintln!("{RED}FATAL:{RESET} {err:?}");
            } else {
                eprintln!("ERROR: {err}");
            }
            ExitCode::from(code)
        }
    }
}

fn start_logger(args: &Cli) -> Option<LoggerHandle> {
    let level = if args.verbose { "info" } else { "warn" };
    let mut logger = match Logger::try_with_env_or_str(level) {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("Failed to initialize logging: {err}");
            return None;
        }
    };
    if let Some(log_file) = &args.log_file {
        match FileSpec::try_from(log_file) {
            Ok(spec) => {
                let duplicate = if args.verbose { Duplicate::Info } else { Duplicate::Warn };
                logger = logger.log_to_file(spec.suppress_timestamp()).duplicate_to_stderr(duplicate);
            }
            Err(err) => eprintln!("Failed to use log file {}: {err}", log_file.display()),
        }
    }
    match logger.start() {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to start logger: {err}");
            None
        }
    }
}

fn run(command: &Commands) -> anyhow::Result<String> {
    match command {
        Commands::Mcm2Sheet { mcm, png } => {
            require_input("Input font", mcm)?;
            convert_font_to_sheet(mcm, png)?;
            Ok(format!("Wrote {} ({SHEET_WIDTH}x{SHEET_HEIGHT}) from {}", png.display(), mcm.display()))
        }
        Commands::Sheet2Mcm { png, mcm } => {
            require_input("Input sheet", png)?;
            convert_sheet_to_font(png, mcm)?;
            Ok(format!("Wrote {} from {}", mcm.display(), png.display()))
        }
        Commands::InjectLogo { base_mcm, logo_png, out_mcm } => {
            require_input("Base font", base_mcm)?;
            require_input("Logo PNG", logo_png)?;
            inject_logo_file(base_mcm, logo_png, out_mcm)?;
            Ok(format!("Wrote {} (logo injected A0-FF)", out_mcm.display()))
        }
    }
}

fn require_input(what: &'static str, path: &Path) -> Result<(), CliError> {
    if path.exists() {
        Ok(())
    } else {
        Err(CliError::InputNotFound {
            what,
            path: path.to_path_buf(),
        })
    }
}

/// Engine errors outside of the internal category are user errors, so are missing inputs.
fn exit_code(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<CliError>().is_some() {
        return EXIT_ERROR;
    }
    match err.downcast_ref::<EngineError>() {
        Some(engine_err) if !engine_err.kind().is_internal() => EXIT_ERROR,
        _ => EXIT_FATAL,
    }
}
