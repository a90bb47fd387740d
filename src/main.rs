//! # SvgSync - Cursor-to-Shape Sync for SVG
//!
//! Runs the whole editor-to-preview pipeline headlessly: the file is
//! opened in a session, the cursor is placed, and the messages are
//! applied to a geometry-only preview.
//!
//! ## Quick Start
//!
//! ```bash
//! # Highlight whatever is at character offset 120
//! cargo run -- icon.svg --offset 120
//!
//! # Same, addressed by line and column (1-based)
//! cargo run -- icon.svg --line 4 --column 17
//!
//! # Print the raw preview messages
//! cargo run -- icon.svg --offset 120 --json
//! ```

use std::fmt::Write as _;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use svgsync_buffer::Position;
use svgsync_core::{Config, HighlightMessage, SyncSession};
use svgsync_view::{PreviewRenderer, Rect, RenderSurface, StaticScene};

/// SvgSync - highlight the SVG shape under a text cursor
#[derive(Parser, Debug)]
#[command(name = "svgsync")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// SVG file to open
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Cursor as a character offset into the file
    #[arg(short, long, conflicts_with_all = ["line", "column"])]
    offset: Option<usize>,

    /// Cursor line (1-based)
    #[arg(short, long)]
    line: Option<NonZeroUsize>,

    /// Cursor column (1-based, defaults to 1)
    #[arg(short, long, requires = "line")]
    column: Option<NonZeroUsize>,

    /// Preview size as WIDTHxHEIGHT
    #[arg(long, value_name = "WxH", value_parser = parse_container)]
    container: Option<(f64, f64)>,

    /// Config file instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the preview messages as JSON lines
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// Where to put the cursor, if anywhere.
    fn cursor(&self) -> Option<CursorTarget> {
        if let Some(offset) = self.offset {
            return Some(CursorTarget::Offset(offset));
        }
        let line = self.line?;
        let column = self.column.map_or(0, |c| c.get() - 1);
        Some(CursorTarget::Position(Position::new(line.get() - 1, column)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CursorTarget {
    Offset(usize),
    Position(Position),
}

/// Parses `800x600` into a width and height.
fn parse_container(value: &str) -> Result<(f64, f64), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite() && *n >= 0.0)
            .ok_or_else(|| format!("invalid dimension '{s}'"))
    };
    Ok((parse(w)?, parse(h)?))
}

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    tracing::info!("Starting SvgSync v{}", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load(),
    };

    let report = run(&args, config)?;
    print!("{report}");

    Ok(())
}

/// Runs the pipeline and renders the report printed to stdout.
fn run(args: &Args, config: Config) -> anyhow::Result<String> {
    let (width, height) = args
        .container
        .unwrap_or((config.view.container_width, config.view.container_height));

    let (mut session, mut receiver) = SyncSession::new(config.clone());
    let id = session
        .open_file(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;

    match args.cursor() {
        Some(CursorTarget::Offset(offset)) => session.move_cursor_to_offset(id, offset)?,
        Some(CursorTarget::Position(pos)) => session.move_cursor(id, pos)?,
        None => {}
    }

    let mut out = String::new();

    if args.json {
        while let Some(message) = receiver.try_next() {
            writeln!(out, "{}", message.to_json()?)?;
        }
        return Ok(out);
    }

    let scene = StaticScene::new(Rect::new(0.0, 0.0, width, height));
    let mut renderer = PreviewRenderer::new(scene, &config);
    renderer.drain(&mut receiver);

    let doc = session.document(id)?;
    writeln!(out, "cursor: {} (offset {})", doc.cursor().position, doc.cursor_char_offset()?)?;

    let highlight = session.compute_highlight(id)?;
    write_highlight(&mut out, &highlight, &renderer)?;

    let view = renderer.view();
    writeln!(
        out,
        "view: scale {:.4} translate ({:.2}, {:.2}) zoom {}%",
        view.scale,
        view.translate_x,
        view.translate_y,
        renderer.zoom_percent()
    )?;
    writeln!(out, "css: {}", view.css_transform())?;

    for layer in renderer.overlays().layers() {
        writeln!(out, "{}", layer.to_svg())?;
    }

    Ok(out)
}

fn write_highlight(
    out: &mut String,
    highlight: &HighlightMessage,
    renderer: &PreviewRenderer<StaticScene>,
) -> std::fmt::Result {
    let Some(path) = &highlight.path else {
        return writeln!(out, "element: none");
    };

    let scene = renderer.surface();
    let tag = renderer
        .highlighted_node()
        .and_then(|node| scene.tag_name(node))
        .unwrap_or("?");
    writeln!(out, "element: {path} <{tag}>")?;

    if let Some(rect) = renderer.highlighted_node().and_then(|node| scene.client_rect(node)) {
        writeln!(
            out,
            "bounds: {:.2},{:.2} {:.2}x{:.2}",
            rect.x, rect.y, rect.width, rect.height
        )?;
    }

    if let Some(segment) = &highlight.segment {
        write!(
            out,
            "segment: {:?} {} -> {}",
            segment.kind(),
            segment.start(),
            segment.end()
        )?;
        for control in segment.controls() {
            write!(out, " c {control}")?;
        }
        writeln!(out)?;
    }

    if let Some(polygon) = &highlight.polygon_points {
        match polygon.active_index {
            Some(active) => writeln!(out, "points: {} (active {active})", polygon.points.len())?,
            None => writeln!(out, "points: {}", polygon.points.len())?,
        }
    }

    Ok(())
}
