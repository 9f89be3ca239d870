use clap::{Parser, Subcommand};
use photo_export::imaging::Quality;
use photo_export::{catalog, config, export, output, verify};
use std::path::PathBuf;

/// Flags for the verify command.
#[derive(clap::Args, Clone)]
struct VerifyArgs {
    /// Re-encode files whose content does not match their extension, in place
    #[arg(long)]
    fix: bool,
}

#[derive(Parser)]
#[command(name = "photo-export")]
#[command(about = "Resize catalogued photos for the web and write a JSON manifest")]
#[command(long_about = "\
Resize catalogued photos for the web and write a JSON manifest

A catalog lists the photos to publish. Each entry is scaled down to the
configured maximum width (never up), encoded to WebP (plus an optional JPEG
fallback), and recorded in a manifest the website renders from.

Files:

  export.toml                 # Paths and encoding settings (optional)
  catalog.toml                # [[image]] entries: source, output, category, alt, title, featured
  raw/                        # source_dir: catalog `source` paths are relative to this
  public/images/gallery/      # output_dir
  ├── manifest.json           # Rewritten on every run
  └── <output>.webp           # One file per entry and format

Missing or unreadable sources are reported and skipped; the manifest holds
exactly the entries that were written.

Run 'photo-export gen-config' to generate a documented export.toml.")]
#[command(version)]
struct Cli {
    /// Config file; relative paths inside it resolve against its directory
    #[arg(long, default_value = "export.toml", global = true)]
    config: PathBuf,

    /// Catalog file (.toml or .json), overriding the config's `catalog`
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resize and encode every catalog entry, then write the manifest
    Export,
    /// Validate config and catalog, and list missing source files
    Check,
    /// Check written files and the manifest against each other
    Verify(VerifyArgs),
    /// Print a stock export.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Export => {
            let config = config::load_config(&cli.config)?;
            let catalog_path = cli.catalog.unwrap_or_else(|| config.catalog.clone());
            let catalog = catalog::load_catalog(&catalog_path)?;

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_export_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = export::run(&config, &catalog, Some(tx));
            printer.join().map_err(|_| "progress printer panicked")?;
            output::print_export_summary(&result?);
        }
        Command::Check => {
            let config = config::load_config(&cli.config)?;
            let catalog_path = cli.catalog.unwrap_or_else(|| config.catalog.clone());
            println!("==> Checking {}", catalog_path.display());
            let catalog = catalog::load_catalog(&catalog_path)?;
            output::print_check_report(&export::check(&config, &catalog));
            println!("==> Catalog is valid");
        }
        Command::Verify(args) => {
            let config = config::load_config(&cli.config)?;
            println!("==> Verifying {}", config.output_dir.display());
            let run_verify = || {
                verify::verify(
                    &config.output_dir,
                    &config.manifest_path(),
                    &config.public_prefix,
                )
            };
            let mut report = run_verify()?;
            output::print_verify_report(&report);

            let mislabeled = report
                .problems
                .iter()
                .any(|p| matches!(p, verify::Problem::BadSignature { .. }));
            if args.fix && mislabeled {
                println!("==> Re-encoding mislabeled files");
                let repaired = verify::repair(&report, Quality::new(config.images.quality));
                output::print_repair_report(&repaired);
                println!("==> Verifying again");
                report = run_verify()?;
                output::print_verify_report(&report);
            }
            if !report.is_ok() {
                return Err(format!("{} verification problem(s)", report.problems.len()).into());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
