use clap::{Parser, Subcommand};
use qr_mask::tools::{blank_symbol, load_raster, save_raster};
use qr_mask::{MaskApplicator, ModuleColors, RasterInterpreter, evaluate_masks};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "masktool", version, about = "QR mask evaluation tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print module size, version and penalty for a QR image
    Info {
        #[arg(long)]
        image: PathBuf,
    },
    /// Apply one mask pattern and save the result
    Apply {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        mask: u8,
        #[arg(long)]
        output: PathBuf,
    },
    /// Try all eight masks, report penalties and save the best one
    BestMask {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Render a blank symbol skeleton (finder/timing/alignment only)
    Blank {
        #[arg(long)]
        version: u8,
        #[arg(long, default_value_t = 8)]
        module_size: usize,
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let colors = ModuleColors::default();

    match cli.command {
        Command::Info { image } => info_cmd(&image, colors),
        Command::Apply {
            image,
            mask,
            output,
        } => apply_cmd(&image, mask, &output, colors),
        Command::BestMask { image, output } => best_mask_cmd(&image, output.as_deref(), colors),
        Command::Blank {
            version,
            module_size,
            output,
        } => blank_cmd(version, module_size, &output, colors),
    }
}

fn info_cmd(image: &Path, colors: ModuleColors) -> ExitCode {
    let raster = match load_raster(image) {
        Ok(raster) => raster,
        Err(err) => {
            eprintln!("Failed to load {}: {}", image.display(), err);
            return ExitCode::FAILURE;
        }
    };
    let interpreter = RasterInterpreter::with_colors(&raster, colors);
    match (interpreter.module_size(), interpreter.version()) {
        (Ok(module_size), Ok(version)) => {
            println!("Module size: {}, version: {}", module_size, version);
        }
        (Err(err), _) | (_, Err(err)) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    }
    match interpreter.penalty() {
        Ok(penalty) => println!("Penalty: {}", penalty),
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

fn apply_cmd(image: &Path, mask: u8, output: &Path, colors: ModuleColors) -> ExitCode {
    let raster = match load_raster(image) {
        Ok(raster) => raster,
        Err(err) => {
            eprintln!("Failed to load {}: {}", image.display(), err);
            return ExitCode::FAILURE;
        }
    };
    let masked = match MaskApplicator::with_colors(&raster, colors).apply_mask_pattern(mask) {
        Ok(masked) => masked,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = save_raster(&masked, output) {
        eprintln!("Failed to save {}: {}", output.display(), err);
        return ExitCode::FAILURE;
    }
    println!("Applied mask {} -> {}", mask, output.display());
    ExitCode::SUCCESS
}

fn best_mask_cmd(image: &Path, output: Option<&Path>, colors: ModuleColors) -> ExitCode {
    let raster = match load_raster(image) {
        Ok(raster) => raster,
        Err(err) => {
            eprintln!("Failed to load {}: {}", image.display(), err);
            return ExitCode::FAILURE;
        }
    };
    let mut evaluations = match evaluate_masks(&raster, colors) {
        Ok(evaluations) => evaluations,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    for eval in &evaluations {
        println!("Mask: {}, penalty: {}", eval.pattern.index(), eval.penalty);
    }
    evaluations.sort_by_key(|eval| (eval.penalty, eval.pattern.index()));
    let best = evaluations.swap_remove(0);
    println!("Best mask: {} ({})", best.pattern.index(), best.penalty);
    if let Some(output) = output {
        if let Err(err) = save_raster(&best.raster, output) {
            eprintln!("Failed to save {}: {}", output.display(), err);
            return ExitCode::FAILURE;
        }
        println!("Saved -> {}", output.display());
    }
    ExitCode::SUCCESS
}

fn blank_cmd(version: u8, module_size: usize, output: &Path, colors: ModuleColors) -> ExitCode {
    if !(1..=6).contains(&version) {
        eprintln!("unsupported QR version {}: only versions 1 to 6 are supported", version);
        return ExitCode::FAILURE;
    }
    if module_size == 0 {
        eprintln!("module size must be at least 1");
        return ExitCode::FAILURE;
    }
    let symbol = blank_symbol(version, module_size, colors);
    if let Err(err) = save_raster(&symbol, output) {
        eprintln!("Failed to save {}: {}", output.display(), err);
        return ExitCode::FAILURE;
    }
    println!(
        "Rendered blank v{} symbol ({}x{} px) -> {}",
        version,
        symbol.width(),
        symbol.height(),
        output.display()
    );
    ExitCode::SUCCESS
}
