use std::path::PathBuf;

use crate::error::{MaskSearchError, MaskSearchResult};
use crate::mask_search::{HitRule, SearchConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Args),
    Help,
    Version,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub main_image: PathBuf,
    pub search_image: PathBuf,
    pub output_image: PathBuf,
    pub config: SearchConfig,
    pub format: OutputFormat,
    pub debug_mode: bool,
}

const POSITIONAL_NAMES: [&str; 6] = [
    "MainImage",
    "SearchImage",
    "OutputImage",
    "isMaskFlag",
    "match-percentage",
    "tolerance",
];

impl Args {
    /// Parse the process arguments, skipping the program name
    pub fn from_env() -> MaskSearchResult<Command> {
        Self::parse(std::env::args().skip(1))
    }

    /// Parse arguments (without the program name).
    ///
    /// Positionals: `<MainImage> <SearchImage> <OutputImage> [isMaskFlag]
    /// [match-percentage] [tolerance]`. Flags may appear anywhere.
    pub fn parse<I, S>(args: I) -> MaskSearchResult<Command>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut positionals: Vec<String> = Vec::new();
        let mut config = SearchConfig::default();
        let mut format = OutputFormat::Text;
        let mut debug_mode = false;

        for arg in args.into_iter().map(Into::<String>::into) {
            if arg == "--help" || arg == "-h" {
                return Ok(Command::Help);
            } else if arg == "--version" || arg == "-v" {
                return Ok(Command::Version);
            } else if arg == "--debug" {
                debug_mode = true;
            } else if arg == "--json" {
                format = OutputFormat::Json;
            } else if arg == "--parallel" {
                config.parallel = true;
            } else if let Some(rest) = arg.strip_prefix("--hit-rule=") {
                config.hit_rule = match rest {
                    "contrast" => HitRule::BackgroundContrast,
                    "subject" => HitRule::SubjectShade,
                    other => {
                        return Err(MaskSearchError::InvalidArgument {
                            name: "--hit-rule",
                            value: other.to_string(),
                        });
                    }
                };
            } else if arg.starts_with("--") {
                return Err(MaskSearchError::UnknownFlag { flag: arg });
            } else if positionals.len() < POSITIONAL_NAMES.len() {
                positionals.push(arg);
            } else {
                return Err(MaskSearchError::UnknownFlag { flag: arg });
            }
        }

        let mut positionals = positionals.into_iter();
        let mut required = |name: &'static str| {
            positionals
                .next()
                .map(PathBuf::from)
                .ok_or(MaskSearchError::MissingArgument { name })
        };
        let main_image = required(POSITIONAL_NAMES[0])?;
        let search_image = required(POSITIONAL_NAMES[1])?;
        let output_image = required(POSITIONAL_NAMES[2])?;

        if let Some(flag) = positionals.next() {
            config.is_mask = flag == "true";
        }
        if let Some(value) = positionals.next() {
            config.match_threshold_percent = parse_int(POSITIONAL_NAMES[4], &value)?;
        }
        if let Some(value) = positionals.next() {
            config.tolerance = parse_int(POSITIONAL_NAMES[5], &value)?;
        }

        Ok(Command::Run(Args {
            main_image,
            search_image,
            output_image,
            config,
            format,
            debug_mode,
        }))
    }
}

fn parse_int(name: &'static str, value: &str) -> MaskSearchResult<i32> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| MaskSearchError::InvalidArgument {
            name,
            value: value.to_string(),
        })
}

pub fn print_help() {
    println!("🔍 Mask Search: find two-tone mask patterns in an image");
    println!();
    println!("USAGE:");
    println!(
        "    mask-search <MainImage> <SearchImage> <OutputImage> [isMaskFlag] [match-percentage] [tolerance] [FLAGS]"
    );
    println!();
    println!("ARGUMENTS:");
    println!("    MainImage           Image to search in");
    println!("    SearchImage         Black/white mask to search for");
    println!("    OutputImage         Where to write MainImage with matches outlined in red");
    println!("    isMaskFlag          'true' to treat SearchImage as a mask (default: true)");
    println!("    match-percentage    Net hit percentage a region must exceed (default: 75)");
    println!("    tolerance           Per-channel difference for 'same shade' (default: 32)");
    println!();
    println!("FLAGS:");
    println!("    --json              Print the match report as JSON");
    println!("    --parallel          Score candidate regions on all cores");
    println!("    --hit-rule=<contrast|subject>");
    println!("                        How black/white mask pixels score (default: contrast)");
    println!("    --debug             Enable debug output (RUST_LOG overrides)");
    println!("    --help, -h          Show this help message");
    println!("    --version, -v       Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    mask-search flag.png star_mask.png flag_marked.png");
    println!("    mask-search flag.png star_mask.png flag_marked.png true 80 24 --json");
}
