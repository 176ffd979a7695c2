//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::commands::{self, list::ListOptions};
use folio::content::Category;
use folio::Folio;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Browse and author the markdown posts of a personal blog", long_about = None)]
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

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Category of the post
        #[arg(short, long, default_value = "learning-notes")]
        category: Category,

        /// Comma separated tags
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Sub-directory of the content root
        #[arg(short, long)]
        path: Option<String>,
    },

    /// List posts, newest first
    #[command(alias = "ls")]
    List {
        /// Only posts in this category
        #[arg(short, long)]
        category: Option<Category>,

        /// Show at most this many posts (defaults to home_limit with no category)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show a rendered post
    Show {
        slug: String,

        /// Print only the heading outline
        #[arg(long)]
        toc: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List every post slug
    Slugs,

    /// Show the previous and next posts of a post
    Adjacent { slug: String },

    /// List categories with post counts
    Categories,

    /// List tags with post counts
    Tags,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            commands::init::init_site(&target_dir)?;
            writeln!(out, "Initialized empty site in {:?}", target_dir)?;
        }

        Commands::New {
            title,
            category,
            tags,
            path,
        } => {
            let folio = Folio::new(&base_dir)?;
            tracing::info!("Creating new {} post with title: {}", category, title);
            let file = commands::new::create_post(&folio, &title, category, &tags, path.as_deref())?;
            writeln!(out, "Created {:?}", file)?;
        }

        Commands::List {
            category,
            limit,
            json,
        } => {
            let folio = Folio::new(&base_dir)?;
            let limit = match (limit, category) {
                (Some(limit), _) => Some(limit),
                (None, None) => Some(folio.config.home_limit),
                (None, Some(_)) => None,
            };
            let options = ListOptions {
                category,
                limit,
                json,
            };
            commands::list::posts(&folio, &options, &mut out)?;
        }

        Commands::Show { slug, toc, json } => {
            let folio = Folio::new(&base_dir)?;
            commands::show::run(&folio, &slug, toc, json, &mut out).await?;
        }

        Commands::Slugs => {
            let folio = Folio::new(&base_dir)?;
            commands::list::slugs(&folio, &mut out)?;
        }

        Commands::Adjacent { slug } => {
            let folio = Folio::new(&base_dir)?;
            commands::show::adjacent(&folio, &slug, &mut out)?;
        }

        Commands::Categories => {
            let folio = Folio::new(&base_dir)?;
            commands::list::categories(&folio, &mut out)?;
        }

        Commands::Tags => {
            let folio = Folio::new(&base_dir)?;
            commands::list::tags(&folio, &mut out)?;
        }

        Commands::Version => {
            writeln!(out, "folio version {}", env!("CARGO_PKG_VERSION"))?;
        }
    }

    Ok(())
}
