use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use image::RgbaImage;
use mask_search::args::{Args, Command, OutputFormat, print_help};
use mask_search::mask_search::MatchReport;
use mask_search::{MaskMatcher, MaskSearchError, MaskSearchResult, image_io};

fn main() -> ExitCode {
    let command = match Args::from_env() {
        Ok(command) => command,
        Err(e) => {
            eprintln!("❌ {e}");
            print_help();
            return ExitCode::FAILURE;
        }
    };

    match command {
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            println!(
                "Mask Search v{} (built {})",
                env!("MASK_SEARCH_VERSION"),
                env!("MASK_SEARCH_BUILD_YEAR")
            );
            ExitCode::SUCCESS
        }
        Command::Run(args) => {
            init_logging(args.debug_mode);
            match run(&args) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    log::error!("{e}");
                    if e.is_usage_error() {
                        print_help();
                    }
                    ExitCode::FAILURE
                }
            }
        }
    }
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` with `--debug`
fn init_logging(debug_mode: bool) {
    let default_filter = if debug_mode { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn run(args: &Args) -> MaskSearchResult<()> {
    let mut image = image_io::load_rgba(&args.main_image)?;
    let mask = image_io::load_rgba(&args.search_image)?;

    let matcher = MaskMatcher::new(args.config.clone());
    let matches = matcher.search_and_annotate(&mut image, &mask);

    emit(
        &matches.to_report(),
        args.format,
        &args.output_image,
        &image,
        &mut io::stdout().lock(),
    )
}

/// Print the report, then write the annotated image. The report is printed
/// even when the image cannot be saved.
fn emit(
    report: &MatchReport,
    format: OutputFormat,
    output_path: &Path,
    image: &RgbaImage,
    out: &mut impl Write,
) -> MaskSearchResult<()> {
    let rendered = match format {
        OutputFormat::Text => report.render_text(),
        OutputFormat::Json => format!("{}\n", report.to_json()?),
    };
    let printed = out.write_all(rendered.as_bytes()).and_then(|()| out.flush());

    image_io::save(output_path, image)?;
    printed.map_err(|source| MaskSearchError::ReportOutput { source })
}
