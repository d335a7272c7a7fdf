//! Browse a netlist layout document with egui (requires `--features egui`).
//!
//! Usage:
//!   cargo run --features egui --example egui_viewer -- <top.json> --subgraphs <dir>
//!
//! Subgraph documents are looked up as `<dir>/<path segments joined by '.'>.json`.

#[cfg(feature = "egui")]
use {
    anyhow::{Context, Result},
    camino::Utf8PathBuf,
    clap::Parser,
    netlistview::backend::{FsSubgraphSource, SourceEditor},
    netlistview::egui_app::NetlistApp,
    netlistview::source::SourceLocation,
    netlistview::{DiagramSession, ViewerConfig, global_store},
    std::sync::Arc,
};

#[cfg(feature = "egui")]
#[derive(Parser, Debug)]
#[command(author, version, about = "Browse a netlist layout document", long_about = None)]
struct Args {
    /// Top-level layout document
    #[arg(value_name = "LAYOUT_FILE")]
    file: Utf8PathBuf,

    /// Directory with pre-rendered subgraph documents (defaults to the
    /// directory of LAYOUT_FILE)
    #[arg(short = 's', long = "subgraphs")]
    subgraphs: Option<Utf8PathBuf>,

    /// Viewer configuration (JSON)
    #[arg(long)]
    config: Option<Utf8PathBuf>,
}

/// Prints the location instead of launching an editor.
#[cfg(feature = "egui")]
struct PrintEditor;

#[cfg(feature = "egui")]
impl SourceEditor for PrintEditor {
    fn open(&self, location: &SourceLocation) -> Result<()> {
        println!("{}:{}", location.file, location.line);
        Ok(())
    }
}

#[cfg(feature = "egui")]
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = match &args.config {
        Some(p) => ViewerConfig::load(p)?,
        None => ViewerConfig::default(),
    };
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file))?;
    let dir = args
        .subgraphs
        .clone()
        .or_else(|| args.file.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| Utf8PathBuf::from("."));

    let session = DiagramSession::open(args.file.as_str(), &text, config, global_store())?
        .with_backend(Arc::new(FsSubgraphSource::new(&dir)))
        .with_editor(Box::new(PrintEditor));

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_maximized(true),
        ..Default::default()
    };
    eframe::run_native(
        "netlistview",
        options,
        Box::new(move |_cc| Ok(Box::new(NetlistApp::new(session)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(())
}

#[cfg(not(feature = "egui"))]
fn main() {
    eprintln!("This demo requires the 'egui' feature. Try: cargo run --features egui --example egui_viewer -- <top.json>");
}
