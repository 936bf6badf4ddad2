use alumni_gallery::contact::{self, ContactForm};
use alumni_gallery::gallery::GalleryController;
use alumni_gallery::host::HeadlessHost;
use alumni_gallery::media::MediaCollection;
use alumni_gallery::session::{self, PageSession};
use alumni_gallery::theme::{Theme, ThemeStore};
use alumni_gallery::{config, output, render, scan};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "alumni-gallery")]
#[command(about = "Gallery, slider, theme and contact-form core for an alumni site")]
#[command(long_about = "\
Gallery, slider, theme and contact-form core for an alumni site

The gallery is built from the content directory:

  content/
  ├── gallery.toml              # Page config (optional)
  ├── media.json                # Explicit media list (optional, wins over files)
  ├── 001-convocation.jpg       # Image (numbered = ordered)
  ├── 001-convocation.txt       # Caption sidecar
  ├── 002-campus-walk.mp4       # Video
  └── backstage.webp            # Unnumbered: after numbered items

Items without a caption are shown as \"Image N\".

Run 'alumni-gallery gen-config' to print a documented gallery.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".alumni-gallery-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the content directory into a manifest
    Scan,
    /// Validate the content directory and config
    Check,
    /// Replay a JSON event script against the page
    Replay {
        /// Event script (JSON array of events)
        script: PathBuf,
        /// Slides in the hero slider
        #[arg(long, default_value_t = 3)]
        slides: usize,
        /// Expandable event cards on the page
        #[arg(long, default_value_t = 3)]
        cards: usize,
        /// Write the final gallery state as HTML
        #[arg(long)]
        html: Option<PathBuf>,
    },
    /// Render the open gallery at one item as HTML
    Render {
        /// 0-based item index
        #[arg(long, default_value_t = 0)]
        index: usize,
        /// Output file
        #[arg(long, default_value = "gallery.html")]
        output: PathBuf,
    },
    /// Read or change the stored theme preference
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Validate and submit the contact form (simulated)
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
        /// Make the simulated send fail
        #[arg(long)]
        simulate_failure: bool,
    },
    /// Print a stock gallery.toml with all options documented
    GenConfig,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the stored theme
    Get,
    /// Flip between light and dark
    Toggle,
    /// Store a theme
    Set { theme: Theme },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("alumni_gallery=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            let manifest_path = cli.temp_dir.join("manifest.json");
            let json = serde_json::to_string_pretty(&manifest)?;
            std::fs::write(&manifest_path, json)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            println!("==> Content is valid");
        }
        Command::Replay {
            script,
            slides,
            cards,
            html,
        } => {
            let manifest = scan::scan(&cli.source)?;
            let events = session::load_script(&script)?;
            let store = theme_store(&cli.source, &manifest.config);
            let collection: MediaCollection = manifest.descriptors().collect();

            let mut page = PageSession::new(collection, &manifest.config, slides, store.load()?)
                .with_cards(cards, &manifest.config);
            let steps = page.run(events);
            output::print_replay(&steps);

            if page.theme() != store.load()? {
                store.save(page.theme())?;
            }
            if let Some(path) = html {
                let markup = render::render_page(page.gallery().host(), page.theme());
                std::fs::write(&path, markup.into_string())?;
                println!("==> Wrote {}", path.display());
            }
        }
        Command::Render {
            index,
            output: out_path,
        } => {
            let manifest = scan::scan(&cli.source)?;
            let store = theme_store(&cli.source, &manifest.config);
            let collection: MediaCollection = manifest.descriptors().collect();
            let len = collection.len();
            if index >= len.max(1) {
                return Err(format!("index {index} out of range ({len} items)").into());
            }

            let host = HeadlessHost::for_collection(&collection);
            let mut gallery = GalleryController::new(collection, host);
            gallery.open();
            gallery.show_at(index as isize);
            if let Some(ticket) = gallery.pending_ticket() {
                gallery.media_ready(ticket);
            }

            let markup = render::render_page(gallery.host(), store.load()?);
            std::fs::write(&out_path, markup.into_string())?;
            println!("==> Wrote {}", out_path.display());
        }
        Command::Theme { action } => {
            let config = config::load_config(&cli.source)?;
            let store = theme_store(&cli.source, &config);
            let theme = match action {
                ThemeAction::Get => store.load()?,
                ThemeAction::Toggle => store.toggle()?,
                ThemeAction::Set { theme } => {
                    store.save(theme)?;
                    theme
                }
            };
            println!("{theme}");
        }
        Command::Contact {
            name,
            email,
            subject,
            message,
            simulate_failure,
        } => {
            let mut config = config::load_config(&cli.source)?;
            config.contact.simulate_failure |= simulate_failure;
            let form = ContactForm {
                name,
                email,
                subject,
                message,
            };
            let receipt = contact::submit(&form, &config.contact)?;
            output::print_receipt(&receipt);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn theme_store(source: &Path, config: &config::PageConfig) -> ThemeStore {
    ThemeStore::new(source.join(&config.theme.state_file), config.theme.default)
}
