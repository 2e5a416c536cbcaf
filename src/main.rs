use clap::Parser;
use std::path::PathBuf;

use contract_pdf::ContractOptions;

#[derive(Parser)]
#[command(name = "contract-pdf", about = "Generate a sales contract PDF from order records")]
struct Args {
    /// Input JSON with order, buyer, seller and company records
    input: PathBuf,
    /// Output PDF file (defaults to input with .pdf extension)
    output: Option<PathBuf>,
    /// Options file (page geometry, theme, fonts, formats)
    #[arg(long)]
    config: Option<PathBuf>,
    /// TrueType font for regular text
    #[arg(long)]
    font: Option<PathBuf>,
    /// TrueType font for bold text
    #[arg(long)]
    bold_font: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if !args.input.exists() {
        eprintln!("Error: file not found: {}", args.input.display());
        std::process::exit(1);
    }
    if !args.input.is_file() {
        eprintln!("Error: not a file: {}", args.input.display());
        std::process::exit(1);
    }

    let mut options = match &args.config {
        Some(path) => match ContractOptions::from_json_file(path) {
            Ok(options) => options,
            Err(e) => {
                eprintln!("Error: {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => ContractOptions::default(),
    };
    if args.font.is_some() {
        options.fonts.regular = args.font;
    }
    if args.bold_font.is_some() {
        options.fonts.bold = args.bold_font;
    }
    options.fonts = options.fonts.with_env_fallback();

    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension("pdf"));

    if let Err(e) = contract_pdf::convert_input_to_pdf(&args.input, &output, &options) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
