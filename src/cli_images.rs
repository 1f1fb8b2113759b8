use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use parts_image_catalog::image_manager::{
    DeleteOutcome, HttpImageRemote, ImageBadges, ImageCollectionManager, ImageManagerError,
    ImageRecord, PartRef,
};

#[derive(Parser, Debug)]
#[command(name = "parts-images", about = "Manage the images of a catalog part")]
struct CliArgs {
    /// Base URL of the catalog server.
    #[clap(long, default_value = "http://localhost:3001")]
    pub server_url: String,

    /// Timeout in seconds for each request.
    #[clap(long, default_value_t = 30)]
    pub timeout_sec: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shows the images of a part.
    List { part_id: String },

    /// Adds an image to a part. Unset fields take the add form defaults.
    Add {
        part_id: String,
        url: String,
        #[clap(long)]
        title: Option<String>,
        #[clap(long)]
        source: Option<String>,
        #[clap(long)]
        quality: Option<u32>,
        #[clap(long)]
        dimensions: Option<String>,
        #[clap(long)]
        listing_url: Option<String>,
    },

    /// Changes fields of an existing image. Only changed fields are sent.
    Update {
        part_id: String,
        url: String,
        #[clap(long)]
        title: Option<String>,
        #[clap(long)]
        source: Option<String>,
        #[clap(long)]
        quality: Option<u32>,
        #[clap(long)]
        dimensions: Option<String>,
    },

    /// Deletes an image, asking for confirmation unless --yes is given.
    Delete {
        part_id: String,
        url: String,
        #[clap(long)]
        yes: bool,
    },
}

impl Command {
    fn part_id(&self) -> &str {
        match self {
            Command::List { part_id }
            | Command::Add { part_id, .. }
            | Command::Update { part_id, .. }
            | Command::Delete { part_id, .. } => part_id.as_str(),
        }
    }
}

fn ask_confirmation(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn print_image(index: usize, image: &ImageRecord, badges: &ImageBadges) {
    let quality = format!("{:>3} {}", image.quality, badges.quality.as_str())
        .with(badges.quality.color().terminal_color());
    let source = badges
        .source
        .label()
        .with(badges.source.color().terminal_color());
    print!("{:>3}. {}  {}  {}", index + 1, image.url, quality, source);
    if let Some(relevance) = &badges.relevance {
        print!(
            "  {}",
            relevance.label().with(relevance.color().terminal_color())
        );
    }
    println!();
    println!(
        "     {}",
        format!("{} | {} | added {}", image.title, image.dimensions, image.added_date).dim()
    );
    if let Some(listing_url) = &image.listing_url {
        println!("     {}", format!("listing: {}", listing_url).dim());
    }
}

fn print_collection(manager: &ImageCollectionManager) {
    let part = manager.part();
    println!(
        "{} ({}): {} image(s)",
        part.name,
        part.id,
        manager.images().len()
    );
    for (index, (image, badges)) in manager.badges().into_iter().enumerate() {
        print_image(index, image, &badges);
    }
}

async fn run(cli_args: CliArgs) -> Result<(), ImageManagerError> {
    let remote = Arc::new(HttpImageRemote::new(
        cli_args.server_url.clone(),
        cli_args.timeout_sec,
    )?);

    let summary = remote.get_part(cli_args.command.part_id()).await?;
    let part = PartRef::new(summary.id, summary.name);
    let mut manager = ImageCollectionManager::load(remote, part).await?;

    match cli_args.command {
        Command::List { .. } => {}
        Command::Add {
            url,
            title,
            source,
            quality,
            dimensions,
            listing_url,
            ..
        } => {
            let form = manager.add_form_mut();
            form.url = url;
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(source) = source {
                form.source = source;
            }
            if let Some(quality) = quality {
                form.quality = quality;
            }
            if let Some(dimensions) = dimensions {
                form.dimensions = dimensions;
            }
            if let Some(listing_url) = listing_url {
                form.listing_url = listing_url;
            }
            let added = manager.submit_add_form().await?;
            println!("Added {}", added.url);
        }
        Command::Update {
            url,
            title,
            source,
            quality,
            dimensions,
            ..
        } => {
            let Some(draft) = manager.begin_edit(&url) else {
                return Err(ImageManagerError::Remote(format!(
                    "Part has no image with url {}",
                    url
                )));
            };
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(source) = source {
                draft.source = source;
            }
            if let Some(quality) = quality {
                draft.quality = quality;
            }
            if let Some(dimensions) = dimensions {
                draft.dimensions = dimensions;
            }
            manager.submit_edit().await?;
            println!("Updated {}", url);
        }
        Command::Delete { url, yes, .. } => {
            let confirm = |prompt: &str| yes || ask_confirmation(prompt);
            match manager.delete_image(&url, &confirm).await? {
                DeleteOutcome::Deleted => println!("Deleted {}", url),
                DeleteOutcome::Cancelled => println!("Cancelled"),
            }
        }
    }

    print_collection(&manager);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    if let Err(err) = run(cli_args).await {
        eprintln!("Error: {}", err.user_message());
        std::process::exit(1);
    }
    Ok(())
}
