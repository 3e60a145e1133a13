use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use textsnap::export::FileSink;
use textsnap::{Editor, EditorConfig, Viewport};

/// Render a text card and export it as PNG.
#[derive(Parser, Debug)]
#[command(name = "textsnap", version, about)]
struct Args {
    /// Text to render (defaults to the configured initial text)
    #[arg(short, long)]
    text: Option<String>,

    /// Font size in pixels; clamped to 12..=500 by the size slider
    #[arg(short, long)]
    size: Option<i64>,

    /// Background color as #rrggbb
    #[arg(short, long)]
    background: Option<String>,

    /// Foreground color as #rrggbb
    #[arg(short, long)]
    foreground: Option<String>,

    /// Viewport width in pixels (the preview is at most 640px wide by default)
    #[arg(long)]
    viewport_width: Option<f64>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the image is written to
    #[arg(short, long, default_value = ".")]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EditorConfig::from_json_file(path)?,
        None => EditorConfig::default(),
    };
    if let Some(width) = args.viewport_width {
        config.viewport = Viewport { width, ..config.viewport };
    }

    let sink = Arc::new(FileSink::new(&args.out));
    let mut editor = Editor::builder(config).sink(sink.clone()).build()?;

    if let Some(text) = &args.text {
        editor.set_text(&text.replace("\\n", "\n"));
    }
    if let Some(size) = args.size {
        editor.select_tab(1)?;
        let applied = editor.input_size(size);
        if i64::from(applied) != size {
            log::warn!("font size {} clamped to {}", size, applied);
        }
    }
    if let Some(color) = &args.background {
        editor.select_tab(2)?;
        editor.pick_background(color).context("background color")?;
    }
    if let Some(color) = &args.foreground {
        editor.select_tab(3)?;
        editor.pick_foreground(color).context("foreground color")?;
    }

    let preview = &editor.tree().preview;
    log::info!(
        "rendering {} line(s) at {}px in {}",
        preview.lines().len(),
        preview.font_size_px,
        preview.font_family.css()
    );

    editor.select_tab(4)?;
    let download = editor.save().await.context("export failed")?;
    for path in sink.written() {
        println!("{}", path.display());
    }
    log::debug!("download name: {}", download.filename);
    Ok(())
}
