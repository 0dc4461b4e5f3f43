use clap::{Parser, Subcommand};
use photo_folio::imaging::RustBackend;
use photo_folio::{config, output, site};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "photo-folio")]
#[command(about = "Static photo gallery generator")]
#[command(long_about = "\
Static photo gallery generator

Galleries, their order and every photo caption are declared in config.json.
Each photo becomes four JPEG renditions and a page; each gallery gets an index
page; published galleries get a cover on the front page.

Resources structure:

  resources/
  ├── config.json                  # Galleries, captions, publish flags
  ├── site.css                     # Copied to the output root (optional)
  └── images/                      # Source JPEGs referenced by filename
      ├── DSC_0001.jpg
      └── ...

Output structure:

  public/
  ├── index.html                   # Front page
  ├── site.css
  └── <gallery>/
      ├── index.html               # Thumbnail grid
      ├── 0.html, 1.html, ...      # Photo pages
      └── original/ large/ medium/ small/

Capture date, shutter speed and aperture are read from each photo's EXIF.
Photos without them are skipped and reported; the rest of the site is built.

Set RUST_LOG (e.g. RUST_LOG=photo_folio=debug) for diagnostic logging.
Run 'photo-folio gen-config' to print a sample config.json.")]
#[command(version)]
struct Cli {
    /// Resources directory (config.json, site.css, images/)
    #[arg(long, default_value = "resources", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "public", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the whole site
    Build,
    /// Validate config.json and check that every source image exists
    Check,
    /// Print a sample config.json with every option present
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Build => {
            let config = config::load_config(&cli.source)?;
            init_thread_pool(&config.processing);

            println!("==> Building {} → {}", cli.source.display(), cli.output.display());
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_build_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = site::build_site(
                &config,
                &cli.source,
                &cli.output,
                &RustBackend::new(),
                Some(tx),
            );
            printer
                .join()
                .map_err(|_| "progress printer thread panicked")?;
            let report = result?;

            println!();
            output::print_site_report(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let config = config::load_config(&cli.source)?;
            let missing = config.missing_sources(&site::images_root(&cli.source));
            output::print_check_output(&config, &missing);
            if !missing.is_empty() {
                return Err(format!("{} source image(s) missing", missing.len()).into());
            }
            println!("==> Resources are valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_json());
        }
    }

    Ok(())
}

/// Log to stderr, `warn` and above unless `RUST_LOG` says otherwise.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores; the config can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
