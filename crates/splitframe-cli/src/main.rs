#![forbid(unsafe_code)]

//! splitframe binary entry point.

mod cli;

use std::fs;
use std::process;

use splitframe::{Document, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Opts;

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("SPLITFRAME_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_document(opts: &Opts) -> Result<Document> {
    let (width, height) = opts.canvas();
    let Some(path) = &opts.input else {
        return Ok(if opts.blank {
            Document::new(width, height)
        } else {
            Document::with_starter_layout(width, height)
        });
    };

    let json = fs::read_to_string(path)?;
    let mut doc = Document::from_json(&json)?;
    if opts.width.is_some() || opts.height.is_some() {
        let canvas = doc.tree().canvas();
        doc.rescale(
            opts.width.unwrap_or(canvas.width),
            opts.height.unwrap_or(canvas.height),
        );
    }
    tracing::debug!(path = %path.display(), regions = doc.tree().len(), "layout loaded");
    Ok(doc)
}

fn run(opts: &Opts) -> Result<String> {
    let mut doc = build_document(opts)?;

    if let Some(grid) = opts.grid {
        let target = doc
            .starter()
            .map_or_else(|| doc.tree().root(), |starter| starter.main);
        if doc.create_grid(target, grid.rows, grid.cols).is_none() {
            tracing::warn!(region = %target, %grid, "grid ignored: region is already split");
        }
    }

    if let Some(kind) = &opts.component {
        let canvas = doc.tree().canvas();
        let (x, y) = (
            canvas.x + canvas.width / 2.0,
            canvas.y + canvas.height / 2.0,
        );
        if doc.apply_tool(x, y, kind.clone()).is_none() {
            tracing::warn!(x, y, component = %kind, "component ignored: no leaf at canvas center");
        }
    }

    doc.export(opts.format)
}

fn main() {
    init_logging();
    let opts = Opts::parse();

    match run(&opts) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("splitframe: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::GridSize;
    use splitframe::{ContentType, ExportFormat};

    #[test]
    fn default_run_exports_the_starter_layout_as_html() {
        let html = run(&Opts::default()).expect("export");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("class=\"nav\">\n                Header\n"));
        assert!(html.contains("Main Content"));
    }

    #[test]
    fn grid_lands_in_main_content() {
        let opts = Opts {
            format: ExportFormat::Json,
            grid: Some(GridSize { rows: 2, cols: 2 }),
            ..Opts::default()
        };
        let json = run(&opts).expect("export");
        let doc = Document::from_json(&json).expect("reload");
        // starter leaves: header, sidebar, footer plus four grid cells
        assert_eq!(doc.tree().leaves().len(), 7);
        assert_eq!(doc.tree().len(), 13);
    }

    #[test]
    fn blank_canvas_with_component() {
        let opts = Opts {
            format: ExportFormat::React,
            width: Some(375.0),
            height: Some(667.0),
            blank: true,
            component: Some(ContentType::Button),
            ..Opts::default()
        };
        let jsx = run(&opts).expect("export");
        assert!(jsx.contains("width: '375px', height: '667px'"));
        assert!(jsx.contains("className=\"button\">\n        Button\n"));
    }

    #[test]
    fn missing_input_is_an_io_error() {
        let opts = Opts {
            input: Some("/nonexistent/splitframe/layout.json".into()),
            ..Opts::default()
        };
        assert!(matches!(run(&opts), Err(splitframe::Error::Io(_))));
    }
}
