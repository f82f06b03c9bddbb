mod app;
mod cloud;
mod export;
mod interaction;
mod layout;
mod physics;
mod scene;
mod util;

use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::Parser;
use eframe::egui::vec2;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Graph document produced by the stack scanner.
    #[arg(long, default_value = "cloudformation_map.json")]
    input: PathBuf,
    #[arg(long, default_value_t = 1440.0)]
    width: f32,
    #[arg(long, default_value_t = 920.0)]
    height: f32,
    /// Lay the graph out without a window and write it as SVG.
    #[arg(long, value_name = "PATH")]
    export_svg: Option<PathBuf>,
    /// Tick bound for the headless layout.
    #[arg(long, default_value_t = 3000)]
    max_ticks: usize,
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Some(output) = &args.export_svg {
        let graph = cloud::load_graph(&args.input).inspect_err(|load_error| {
            error!(error = %load_error, "failed to load graph");
        })?;
        return export::export_svg(
            &graph,
            &util::document_dir(&args.input),
            vec2(args.width, args.height),
            args.max_ticks,
            output,
        );
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([args.width, args.height]),
        ..Default::default()
    };

    let input = args.input.clone();
    eframe::run_native(
        "cloud-cartographer",
        options,
        Box::new(move |cc| Ok(Box::new(app::CartographerApp::new(cc, input)))),
    )
    .map_err(|run_error| anyhow!("{run_error}"))
    .context("window host exited with an error")
}
