use clap::{Parser, Subcommand};
use portfolio_viewer::{config, generate, output, scan};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "portfolio-viewer")]
#[command(about = "Build a single-page portfolio with a project carousel and image gallery")]
#[command(long_about = "\
Build a single-page portfolio with a project carousel and image gallery

Your filesystem is the data source. Images in gallery/ become the gallery,
markdown files in projects/ become carousel slides, and both are ordered by
numeric prefix.

Content structure:

  content/
  ├── config.toml                  # Site and viewer config (optional)
  ├── gallery/
  │   ├── 001-Harbour-at-dusk.jpg  # Gallery image (numbered = ordered)
  │   ├── 001-Harbour-at-dusk.txt  # Description sidecar
  │   └── loose.jpg                # Unnumbered = after numbered, by name
  └── projects/
      ├── 010-weather-station.md   # Slide: '# Title' + markdown body
      └── 010-weather-station.jpg  # Slide image (same stem)

The page loads its behaviour from pkg/portfolio_viewer.js, built from this
crate with the 'web' feature.

Run 'portfolio-viewer gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the content directory and list what was found
    Scan {
        /// Print the manifest as JSON instead of the inventory
        #[arg(long)]
        json: bool,
    },
    /// Scan and generate the page into the output directory
    Build,
    /// Validate the content directory without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Scan { json } => {
            let manifest = scan::scan(&cli.source)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&manifest)?);
            } else {
                output::print_scan_output(&manifest, &cli.source);
            }
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let summary = generate::generate(&manifest, &cli.source, &cli.output)?;
            output::print_generate_output(&summary);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            println!("{}", output::format_check_output(&manifest));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "portfolio_viewer=debug,info" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(verbose)
        .try_init();
}
