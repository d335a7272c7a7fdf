use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use walkdir::WalkDir;

use netlistview::model::ElementKind;
use netlistview::navigation::{collect_hierarchy_paths, search_paths};
use netlistview::{BuildOptions, BuildOutput, DiagramId, GraphBuilder, LayoutNode, ViewerConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect netlist layout documents", long_about = None)]
struct Cli {
    /// Viewer configuration (JSON); defaults apply to anything it leaves out
    #[arg(long, global = true, value_name = "CONFIG")]
    config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the diagram identity of a layout document
    Id {
        #[arg(value_name = "LAYOUT_FILE")]
        file: Utf8PathBuf,
    },
    /// Summarize layout documents; directories are searched for *.json
    Info {
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<Utf8PathBuf>,
    },
    /// Print the flattened render elements as JSON
    Dump {
        #[arg(value_name = "LAYOUT_FILE")]
        file: Utf8PathBuf,
        /// Hierarchy path of the clicked node
        #[arg(long, default_value = "")]
        clicked: String,
        #[arg(long, default_value_t = 1.0)]
        scale: f32,
        #[arg(long, default_value_t = 0.0)]
        x_ref: f32,
        #[arg(long, default_value_t = 0.0)]
        y_ref: f32,
    },
    /// Search node hierarchy paths by their last segment
    Find {
        #[arg(value_name = "LAYOUT_FILE")]
        file: Utf8PathBuf,
        query: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };

    match &cli.command {
        Command::Id { file } => {
            let (_, text) = LayoutNode::load(file)?;
            println!("{}", DiagramId::new(file.as_str(), &text));
        }
        Command::Info { paths } => {
            let files = collect_layout_files(paths)?;
            let lines: Vec<String> = files
                .par_iter()
                .map(|f| match summarize(f, &config) {
                    Ok(line) => line,
                    Err(err) => format!("{}: error: {:#}", f, err),
                })
                .collect();
            for line in lines {
                println!("{}", line);
            }
        }
        Command::Dump {
            file,
            clicked,
            scale,
            x_ref,
            y_ref,
        } => {
            let (doc, _) = LayoutNode::load(file)?;
            let out = GraphBuilder::new(&config.build).build(
                &doc,
                &BuildOptions {
                    x_ref: *x_ref,
                    y_ref: *y_ref,
                    scale: *scale,
                    clicked_path: clicked,
                },
            );
            let json = serde_json::json!({
                "maxWidth": out.max_width,
                "maxHeight": out.max_height,
                "clickedRect": out.clicked_rect,
                "clickedParentRect": out.clicked_parent_rect,
                "elements": out.elements,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Command::Find { file, query } => {
            let (doc, _) = LayoutNode::load(file)?;
            let out = GraphBuilder::new(&config.build).build(&doc, &BuildOptions::default());
            for path in search_paths(&collect_hierarchy_paths(&out.elements), query) {
                println!("{}", path);
            }
        }
    }
    Ok(())
}

fn collect_layout_files(paths: &[Utf8PathBuf]) -> Result<Vec<Utf8PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).follow_links(true) {
                let entry = entry.with_context(|| format!("Failed to walk {}", path))?;
                let Some(p) = Utf8Path::from_path(entry.path()) else {
                    log::warn!("skipping non-UTF-8 path {}", entry.path().display());
                    continue;
                };
                if entry.file_type().is_file() && p.extension() == Some("json") {
                    files.push(p.to_path_buf());
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    files.sort();
    Ok(files)
}

fn summarize(file: &Utf8Path, config: &ViewerConfig) -> Result<String> {
    let (doc, text) = LayoutNode::load(file)?;
    let id = DiagramId::new(file.as_str(), &text);
    let out: BuildOutput = GraphBuilder::new(&config.build).build(&doc, &BuildOptions::default());
    Ok(format!(
        "{}: id {} | {} elements ({} nodes, {} edges, {} ports, {} labels, {} junctions) | {}x{}",
        file,
        id,
        out.elements.len(),
        out.count(ElementKind::Node),
        out.count(ElementKind::Edge),
        out.count(ElementKind::Port),
        out.count(ElementKind::Label),
        out.count(ElementKind::Junction),
        out.max_width,
        out.max_height,
    ))
}
