//! CLI entry point for multilang-blog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use multilang_blog::{Blog, Locale};

#[derive(Parser)]
#[command(name = "multilang-blog")]
#[command(version)]
#[command(about = "A static generator for multi-locale Markdown/MDX blogs", long_about = None)]
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
    /// Initialize a new blog with sample posts in every locale
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Locale to write in (defaults to the site's default locale)
        #[arg(short, long)]
        locale: Option<Locale>,

        /// Slug for the post URL (derived from the title when omitted)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local server
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

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Clean the public folder
    Clean,

    /// List site information
    List {
        /// Type of content to list (post, tag, locale)
        #[arg(default_value = "post")]
        r#type: String,

        /// Only list one locale
        #[arg(short, long)]
        locale: Option<Locale>,
    },

    /// Search posts by title, summary and tags
    Search {
        /// Words that must all match
        #[arg(default_value = "")]
        query: String,

        /// Locale to search (defaults to the site's default locale)
        #[arg(short, long)]
        locale: Option<Locale>,

        /// Only posts carrying this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "multilang_blog=debug,info"
    } else {
        "multilang_blog=info"
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
            multilang_blog::commands::init::init_site(&target_dir)?;
            println!("Initialized blog in {:?}", target_dir);
        }

        Commands::New {
            title,
            locale,
            slug,
        } => {
            let blog = Blog::new(&base_dir)?;
            let locale = locale.unwrap_or(blog.config.default_locale);
            tracing::info!("Creating new {} post: {}", locale, title);
            let path = blog.new_post(locale, &title, slug.as_deref())?;
            println!("Created: {:?}", path);
        }

        Commands::Generate { watch } => {
            let blog = Blog::new(&base_dir)?;
            tracing::info!("Generating static files...");

            blog.generate()?;
            println!("Generated successfully!");

            if watch {
                let blog = blog.clone();
                tokio::task::spawn_blocking(move || {
                    multilang_blog::commands::generate::watch(&blog)
                })
                .await??;
            }
        }

        Commands::Server {
            port,
            ip,
            open,
            r#static,
        } => {
            let blog = Blog::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating static files...");
            blog.generate()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            multilang_blog::server::start(&blog, &ip, port, !r#static, open).await?;
        }

        Commands::Clean => {
            let blog = Blog::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type, locale } => {
            let blog = Blog::new(&base_dir)?;
            multilang_blog::commands::list::run(&blog, &r#type, locale)?;
        }

        Commands::Search {
            query,
            locale,
            tag,
        } => {
            let blog = Blog::new(&base_dir)?;
            let locale = locale.unwrap_or(blog.config.default_locale);
            multilang_blog::commands::search::run(&blog, locale, &query, tag.as_deref())?;
        }

        Commands::Version => {
            println!("multilang-blog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
