use clap::{Parser, Subcommand};
use linkpage::{config, output, site};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "linkpage")]
#[command(about = "Static generator for link-in-bio landing pages")]
#[command(long_about = "\
Static generator for link-in-bio landing pages

One JSON document describes the page; one HTML file comes out.

Site structure:

  site/
  ├── config.toml        # Optional settings (see 'linkpage gen-config')
  ├── data.json          # Profile, links, gallery, socials, theme
  └── assets/            # Copied to the output (avatar, gallery images)

data.json:

  {
    \"profile\": { \"name\": \"Alex\", \"description\": \"...\", \"avatar\": \"assets/me.jpg\" },
    \"links\":   [{ \"url\": \"https://...\", \"title\": \"Blog\", \"icon\": \"fa-solid fa-pen\" }],
    \"gallery\": [\"assets/1.jpg\", \"assets/2.jpg\"],
    \"socials\": [{ \"platform\": \"GitHub\", \"url\": \"https://...\", \"icon\": \"fa-brands fa-github\" }],
    \"theme\":   { \"accentColor\": \"#ff0066\", \"backgroundColor\": \"#000\", \"textColor\": \"#fff\" }
  }

Every section is optional; missing sections are simply not rendered.")]
#[command(version = version_string())]
struct Cli {
    /// Site directory (holds data.json, config.toml, assets/)
    #[arg(long, default_value = "site", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Page document: path relative to the site directory, or an http(s) URL
    #[arg(long, global = true)]
    data: Option<String>,

    /// Log progress (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the page into the output directory
    Build,
    /// Load and render without writing; fails if data.json cannot be loaded
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Build => {
            println!("==> Building {}", cli.source.display());
            let result = site::build(&site::BuildOptions {
                site_dir: cli.source.clone(),
                output_dir: cli.output.clone(),
                data: cli.data.clone(),
            })?;
            output::print_build_output(&result);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let session = site::check(&cli.source, cli.data.as_deref())?;
            output::print_session(&session);
            println!("==> Page data is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "linkpage=info"
    } else {
        "linkpage=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
