use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use once_cell::sync::Lazy;
use tracing_subscriber::fmt::format::FmtSpan;

use atelier_ml::{ScaleContract, Style, StyleRegistry, transfer};

use crate::{capture, config::Config, viewer};

static APP_ROOT: Lazy<PathBuf> = Lazy::new(|| {
    dirs::data_local_dir()
        .map(|path| path.join("Atelier"))
        .unwrap_or_else(|| PathBuf::from("."))
});

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "NAME",
        help = "Style to apply; defaults to the first catalog entry"
    )]
    style: Option<String>,

    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Style an existing image instead of capturing one"
    )]
    input: Option<PathBuf>,

    #[arg(short, long, value_name = "DIR", help = "Directory holding the style models")]
    model_dir: Option<PathBuf>,

    #[arg(short, long, value_name = "FILE", help = "Configuration file")]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = false, help = "Print the style catalog and exit")]
    list_styles: bool,

    #[arg(long, default_value_t = false, help = "Skip launching the viewer")]
    no_view: bool,
}

pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::builder()
                .with_default_directive(tracing::Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    if cli.list_styles {
        for style in Style::catalog() {
            println!("{style}");
        }
        return Ok(());
    }

    let config = Config::load_or_default(cli.config.as_deref())?;

    let style = match &cli.style {
        Some(name) => Style::parse(name)?,
        None => Style::default_style(),
    };

    let model_dir = cli
        .model_dir
        .or_else(|| config.model_dir.clone())
        .unwrap_or_else(|| APP_ROOT.join("models"));
    let images_dir = config
        .images_dir
        .clone()
        .unwrap_or_else(|| APP_ROOT.join("images"));

    let mut registry = StyleRegistry::new(model_dir);
    for (name, scale) in &config.scales {
        let style = Style::parse(name).context("invalid style in [scales]")?;
        registry = registry.with_contract(
            style,
            ScaleContract {
                input: scale.input,
                output: scale.output,
            },
        );
    }

    // Resolve the network before touching the camera, so a bad artifact
    // never wastes a capture.
    let network = registry.session(style)?;

    let input = match cli.input {
        Some(input) => input,
        None => capture::capture_still(&config.capture, &images_dir)?,
    };

    let output = transfer(&input, &network)?;
    println!("{}", output.display());

    if !cli.no_view {
        viewer::show(&config.viewer, &output)?;
    }

    Ok(())
}
