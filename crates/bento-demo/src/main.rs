// File: crates/bento-demo/src/main.rs
// Summary: `bento` CLI: generate fixture data and render dashboard pages to PNG/SVG files.

mod config;
mod generate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bento_core::{DashboardContext, Fixtures, PageId};
use bento_render_skia::{RenderOptions, SkiaRenderer};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "bento", version, about = "Render Bento Dash pages headlessly")]
struct Cli {
    /// Config file; defaults to ./bento.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write seeded JSON fixtures into the data directory.
    Generate {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Render pages (all of them when no --page is given).
    Render {
        #[arg(long = "page")]
        pages: Vec<PageId>,
        #[arg(long)]
        width: Option<f32>,
        #[arg(long)]
        theme: Option<String>,
    },
    /// List page slugs.
    Pages,
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bento={default_level},bento_core={default_level},bento_render_skia={default_level}")));
    // a second init (tests) is harmless
    let _ = tracing_subscriber::registry().with(filter).with(fmt::layer()).try_init();
}

fn write_fixtures(cfg: &Config) -> Result<Vec<PathBuf>> {
    let fixtures = generate::generate(&cfg.generate)?;
    let written = fixtures
        .save(&cfg.paths.data_dir)
        .with_context(|| format!("writing fixtures to {}", cfg.paths.data_dir.display()))?;
    for path in &written {
        info!(path = %path.display(), "fixture written");
    }
    Ok(written)
}

fn output_path(out_dir: &Path, page: PageId, format: OutputFormat) -> PathBuf {
    let ext = match format {
        OutputFormat::Png => "png",
        OutputFormat::Svg => "svg",
    };
    out_dir.join(format!("{}.{ext}", page.slug()))
}

/// Render `pages` (or every page) into `cfg.paths.out_dir`; returns the files written.
fn render_pages(cfg: &Config, pages: &[PageId]) -> Result<Vec<PathBuf>> {
    let mut ctx = DashboardContext::from_theme_name(&cfg.render.theme);
    if cfg.render.sidebar_collapsed {
        ctx.toggle_sidebar();
    }
    let fixtures = Fixtures::load(&cfg.paths.data_dir)
        .with_context(|| format!("loading fixtures from {}", cfg.paths.data_dir.display()))?;
    let pages = if pages.is_empty() { PageId::ALL.to_vec() } else { pages.to_vec() };
    std::fs::create_dir_all(&cfg.paths.out_dir)
        .with_context(|| format!("creating {}", cfg.paths.out_dir.display()))?;

    let renderer = cfg.render.formats.contains(&OutputFormat::Png).then(SkiaRenderer::new);
    let opts = RenderOptions {
        scale: cfg.render.scale,
        time_ms: Some(cfg.render.time_ms),
        background: ctx.theme().bg_primary,
        ..RenderOptions::default()
    };

    let mut written = Vec::new();
    for page in pages {
        let scene = page.build(&fixtures).render(&ctx, cfg.render.width);
        debug!(page = %page, items = scene.items.len(), "page composed");
        for &format in &cfg.render.formats {
            let path = output_path(&cfg.paths.out_dir, page, format);
            match (format, &renderer) {
                (OutputFormat::Png, Some(r)) => {
                    r.render_to_png(&scene, &opts, &path).with_context(|| format!("rendering {}", path.display()))?;
                }
                (OutputFormat::Png, None) => continue,
                (OutputFormat::Svg, _) => {
                    std::fs::write(&path, scene.to_svg()).with_context(|| format!("writing {}", path.display()))?;
                }
            }
            info!(page = %page, path = %path.display(), "page written");
            written.push(path);
        }
    }
    Ok(written)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut cfg = Config::load(cli.config.as_deref())?;
    cfg.apply_env(|k| std::env::var(k).ok());
    init_tracing(&cfg.logging.level);

    match cli.command {
        Command::Generate { seed } => {
            if let Some(seed) = seed {
                cfg.generate.seed = seed;
            }
            let written = write_fixtures(&cfg)?;
            println!("Wrote {} fixture files to {}", written.len(), cfg.paths.data_dir.display());
        }
        Command::Render { pages, width, theme } => {
            if let Some(w) = width {
                cfg.render.width = w;
            }
            if let Some(t) = theme {
                cfg.render.theme = t;
            }
            for path in render_pages(&cfg, &pages)? {
                println!("Wrote {}", path.display());
            }
        }
        Command::Pages => {
            for page in PageId::ALL {
                println!("{:<12} {}", page.slug(), page.label());
            }
        }
    }
    Ok(())
}
