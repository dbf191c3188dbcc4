//! CLI entry point for mdpress

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mdpress::config::SiteConfig;
use mdpress::Site;

#[derive(Parser)]
#[command(name = "mdpress")]
#[command(version)]
#[command(about = "Build a static blog from a directory of Markdown posts", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    cwd: Option<PathBuf>,

    /// Configuration file (defaults to _config.yml in the site directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the site (the default)
    #[command(alias = "b")]
    Build(BuildArgs),

    /// Remove the output directory
    Clean,

    /// List posts, newest first
    List,

    /// Scaffold a new site
    Init {
        /// Directory to initialize (defaults to the site directory)
        folder: Option<PathBuf>,
    },
}

#[derive(Args, Default)]
struct BuildArgs {
    /// Posts directory
    #[arg(long)]
    posts: Option<PathBuf>,

    /// Templates directory
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Stylesheet source directory
    #[arg(long)]
    styles: Option<PathBuf>,
}

impl BuildArgs {
    fn apply(self, config: &mut SiteConfig) {
        let overrides = [
            (self.posts, &mut config.posts_dir),
            (self.templates, &mut config.templates_dir),
            (self.output, &mut config.output_dir),
            (self.styles, &mut config.styles_dir),
        ];
        for (value, slot) in overrides {
            if let Some(path) = value {
                *slot = path.to_string_lossy().into_owned();
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "mdpress=debug,info"
    } else {
        "mdpress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    match cli.command.unwrap_or(Commands::Build(BuildArgs::default())) {
        Commands::Build(args) => {
            let mut config = Site::load_config(&base_dir, cli.config.as_deref())?;
            args.apply(&mut config);
            let site = Site::with_config(&base_dir, config);

            tracing::info!("Building {:?}", site.base_dir);
            let report = site.build()?;
            println!(
                "Built {} posts into {:?}",
                report.posts,
                site.output_dir
            );
        }

        Commands::Clean => {
            let config = Site::load_config(&base_dir, cli.config.as_deref())?;
            let site = Site::with_config(&base_dir, config);
            tracing::info!("Cleaning output folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List => {
            let config = Site::load_config(&base_dir, cli.config.as_deref())?;
            let site = Site::with_config(&base_dir, config);
            mdpress::commands::list::run(&site)?;
        }

        Commands::Init { folder } => {
            let target_dir = match folder {
                Some(folder) if folder.is_absolute() => folder,
                Some(folder) => base_dir.join(folder),
                None => base_dir,
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            mdpress::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }
    }

    Ok(())
}
