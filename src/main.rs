//! CLI entry point for homepage-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use homepage_rs::content::ContentLoader;
use homepage_rs::redirects::{build_destination, qualify, RedirectIndex};

#[derive(Parser)]
#[command(name = "homepage-rs")]
#[command(version)]
#[command(about = "Redirect shortcuts, sitemap and feed for a personal website", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Generate sitemap, feed and llms.json
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start the server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// Print where a redirect token leads
    #[command(alias = "r")]
    Resolve {
        /// Name or alias to resolve
        token: String,
    },

    /// Clean the public folder
    Clean,

    /// List site information
    List {
        /// Type of content to list (redirects, pages, data)
        #[arg(default_value = "redirects")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "homepage_rs=debug,info"
    } else {
        "homepage_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            homepage_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::Generate { watch } => {
            let site = homepage_rs::Site::new(&base_dir)?;
            tracing::info!("Generating documents...");

            site.generate()?;
            println!("Generated successfully!");

            if watch {
                homepage_rs::commands::generate::watch(&site).await?;
            }
        }

        Commands::Server { port, ip, open } => {
            let site = homepage_rs::Site::new(&base_dir)?;

            // Generate first so the public directory is current
            tracing::info!("Generating documents...");
            site.generate()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            homepage_rs::server::start(&site, &ip, port, open).await?;
        }

        Commands::Resolve { token } => {
            let site = homepage_rs::Site::new(&base_dir)?;
            let index = RedirectIndex::new(ContentLoader::new(&site).load_redirects()?);
            let config = site.config.destination();

            let resolution = index.resolve(&token);
            let destination = build_destination(resolution, &config);
            match resolution.record() {
                Some(record) => tracing::debug!("{:?} matched {:?}", token, record.name),
                None => tracing::info!("No redirect named {:?}", token),
            }
            println!("{}", qualify(&destination, &config.default_base));
        }

        Commands::Clean => {
            let site = homepage_rs::Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = homepage_rs::Site::new(&base_dir)?;
            homepage_rs::commands::list::run(&site, &r#type)?;
        }

        Commands::Version => {
            println!("homepage-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
