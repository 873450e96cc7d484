use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use poster_layout::{LayoutConfig, PosterLayout, resolve_layout};
use poster_render::RenderOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bposter", about = "Book cover poster creator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a poster from a book manifest
    Render {
        /// Book manifest CSV (id, title, author, read_at, cover, user_rating, average_rating, num_pages)
        #[arg(short, long)]
        books: PathBuf,

        /// Output image file (format from extension)
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Only include books read on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Only include books read on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Poster title (default: "Books read between <from> and <to>")
        #[arg(long)]
        title: Option<String>,

        /// Name shown in the left signature
        #[arg(long, default_value = "me")]
        user: String,

        /// Profile link encoded in the left QR code
        #[arg(long)]
        profile_url: Option<String>,

        /// Show the resolved layout only, don't render
        #[arg(long)]
        layout_only: bool,
    },

    /// Print the resolved layout
    Layout {
        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Write the default configuration as JSON
    InitConfig {
        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Args)]
struct LayoutArgs {
    /// Layout configuration JSON (defaults are used for missing fields)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Covers per row
    #[arg(long)]
    columns: Option<usize>,

    /// Rows of covers
    #[arg(long)]
    rows: Option<usize>,

    /// Poster size
    #[arg(long, value_enum)]
    poster: Option<PosterArg>,

    /// Poster orientation
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,

    /// Disable the year shading
    #[arg(long)]
    no_shading: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PosterArg {
    A0,
    A1,
    A2,
    A3,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

impl From<PosterArg> for poster_layout::PosterSize {
    fn from(arg: PosterArg) -> Self {
        match arg {
            PosterArg::A0 => Self::A0,
            PosterArg::A1 => Self::A1,
            PosterArg::A2 => Self::A2,
            PosterArg::A3 => Self::A3,
        }
    }
}

impl From<OrientationArg> for poster_layout::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl LayoutArgs {
    async fn config(&self) -> Result<LayoutConfig> {
        let mut config = match &self.config {
            Some(path) => {
                log::debug!("Loading layout configuration from {}", path.display());
                LayoutConfig::load(path).await?
            }
            None => LayoutConfig::default(),
        };

        if let Some(columns) = self.columns {
            config.grid.columns = columns;
        }
        if let Some(rows) = self.rows {
            config.grid.rows = rows;
        }
        if let Some(poster) = self.poster {
            config.poster.size = poster.into();
        }
        if let Some(orientation) = self.orientation {
            config.poster.orientation = orientation.into();
        }
        if self.no_shading {
            config.year_shading.enable = false;
        }
        Ok(config)
    }

    async fn resolve(&self) -> Result<PosterLayout> {
        let layout = resolve_layout(&self.config().await?)?;
        println!("{}", layout.summary());
        Ok(layout)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            books,
            output,
            layout,
            from,
            to,
            title,
            user,
            profile_url,
            layout_only,
        } => {
            let layout = layout.resolve().await?;
            if layout_only {
                return Ok(());
            }

            let options = RenderOptions {
                title,
                profile_url,
                user_name: user,
                from,
                to,
                ..Default::default()
            };

            let records = poster_render::load_books(&books).await?;
            let selection =
                poster_render::select_books(records, &options, layout.grid().n_books_total())?;
            let poster = poster_render::render(&layout, &selection, &options).await?;
            poster_render::save_poster(poster, &output).await?;

            println!(
                "Rendered {} books ({} to {}) → {}",
                selection.books.len(),
                selection.from,
                selection.to,
                output.display()
            );
        }

        Commands::Layout { layout } => {
            layout.resolve().await?;
        }

        Commands::InitConfig { output } => {
            LayoutConfig::default().save(&output).await?;
            println!("Default configuration → {}", output.display());
        }
    }

    Ok(())
}
