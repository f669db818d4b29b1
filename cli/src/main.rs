//! redeck CLI - template-faithful PowerPoint deck generation
//!
//! Builds a .pptx from a template package and a deck description in JSON.

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use redeck::{Deck, FallbackStyling, GenerateOptions, Template};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Generate PowerPoint decks that look like their template
#[derive(Parser)]
#[command(
    name = "redeck",
    author = "iyulab",
    version,
    about = "Generate presentations from a template and a deck description",
    long_about = "redeck - template-faithful PowerPoint deck generation.\n\n\
                  Fills the layouts, theme and images of a .pptx/.potx template \
                  with slides described in JSON."
)]
struct Cli {
    /// Verbose logging (repeat for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a presentation
    #[command(visible_alias = "gen")]
    Generate {
        /// Template file (.pptx, .potx, .pptm, .ppsx)
        template: PathBuf,

        /// Deck description (JSON)
        deck: PathBuf,

        /// Output file path
        #[arg(short, long, default_value = "presentation.pptx")]
        output: PathBuf,

        /// Maximum bullets per slide
        #[arg(long)]
        max_bullets: Option<usize>,

        /// Maximum characters per bullet
        #[arg(long)]
        max_bullet_chars: Option<usize>,

        /// Styling applied to text without explicit layout formatting
        #[arg(long, default_value = "theme-fonts")]
        styling: StylingMode,

        /// Keep the slides already in the template
        #[arg(long)]
        keep_slides: bool,

        /// Reject decks with no slides
        #[arg(long)]
        require_slides: bool,

        /// Print the per-slide report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the layouts, theme and images of a template
    Inspect {
        /// Template file
        template: PathBuf,

        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show which layout a hint resolves to
    Resolve {
        /// Template file
        template: PathBuf,

        /// Layout hints to resolve
        #[arg(required = true)]
        hints: Vec<String>,
    },

    /// Show version information
    Version,
}

/// Text styling mode
#[derive(Clone, ValueEnum)]
enum StylingMode {
    /// Apply theme fonts where the layout sets none
    ThemeFonts,
    /// Inherit everything from layout and master
    Inherit,
}

impl From<StylingMode> for FallbackStyling {
    fn from(mode: StylingMode) -> Self {
        match mode {
            StylingMode::ThemeFonts => FallbackStyling::ThemeFonts,
            StylingMode::Inherit => FallbackStyling::Inherit,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Generate {
            template,
            deck,
            output,
            max_bullets,
            max_bullet_chars,
            styling,
            keep_slides,
            require_slides,
            json,
        } => {
            let deck = Deck::from_json(&fs::read_to_string(&deck)?)?;
            if require_slides {
                deck.require_slides()?;
            }

            let mut options = GenerateOptions::new()
                .with_fallback_styling(styling.into())
                .with_keep_existing_slides(keep_slides);
            if let Some(count) = max_bullets {
                options = options.with_max_bullets(count);
            }
            if let Some(chars) = max_bullet_chars {
                options = options.with_max_bullet_chars(chars);
            }

            let pb = create_spinner("Inspecting template...");
            let data = fs::read(&template)?;
            let template = Template::from_bytes_with_options(&data, &options)?;

            pb.set_message(format!("Composing {} slides...", deck.len()));
            let generated = redeck::generate_deck(&template, &deck, &options)?;
            pb.finish_and_clear();

            fs::write(&output, &generated.bytes)?;

            if json {
                write_output(None, &serde_json::to_string_pretty(&generated.slides)?)?;
            } else {
                for report in &generated.slides {
                    println!(
                        "  {:>3}. {} {}",
                        report.index + 1,
                        report.layout.bold(),
                        format!("({})", report.rule).dimmed()
                    );
                }
                println!(
                    "{} Generated {} slides: {}",
                    "✓".green().bold(),
                    generated.slides.len(),
                    output.display()
                );
            }
        }

        Commands::Inspect { template, json } => {
            let pb = create_spinner("Inspecting template...");
            let template = redeck::inspect_file(&template)?;
            let summary = template.summary();
            pb.finish_and_clear();

            if json {
                write_output(None, &serde_json::to_string_pretty(&summary)?)?;
                return Ok(());
            }

            println!("{}", "Template Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!("{}: {}", "Kind".bold(), summary.kind);
            if let Some(ref name) = summary.theme.name {
                println!("{}: {}", "Theme".bold(), name);
            }
            if let Some(font) = template.theme().major_font() {
                println!("{}: {}", "Heading font".bold(), font);
            }
            if let Some(font) = template.theme().minor_font() {
                println!("{}: {}", "Body font".bold(), font);
            }
            println!("{}: {}", "Existing slides".bold(), summary.existing_slides);
            println!("{}: {}", "Reusable images".bold(), summary.reusable_images);

            println!("\n{}", "Layouts".cyan().bold());
            println!("{}", "─".repeat(40));
            for (i, layout) in summary.layouts.iter().enumerate() {
                let roles: Vec<String> = layout
                    .placeholders
                    .iter()
                    .map(|role| format!("{:?}", role).to_lowercase())
                    .collect();
                println!(
                    "  {:>2}. {} {}",
                    i + 1,
                    layout.name.bold(),
                    format!("[{}]", roles.join(", ")).dimmed()
                );
            }
        }

        Commands::Resolve { template, hints } => {
            let template = redeck::inspect_file(&template)?;
            for hint in &hints {
                match redeck::resolve_layout(hint, template.layouts()) {
                    Some(resolution) => println!(
                        "{} {} {}",
                        format!("{:?}", hint).bold(),
                        resolution.layout.name.green(),
                        format!("({})", resolution.rule).dimmed()
                    ),
                    None => println!("{} {}", format!("{:?}", hint).bold(), "-".yellow()),
                }
            }
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn print_version() {
    println!("{} {}", "redeck".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Template-faithful PowerPoint deck generation");
    println!();
    println!("Templates: PPTX, POTX, PPTM, PPSX");
    println!("Repository: https://github.com/iyulab/redeck");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}
