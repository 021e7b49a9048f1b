use std::path::Path;

use clap::Parser;
use tracing_subscriber::fmt::format::FmtSpan;

use atelier_ml::{Style, StyleRegistry, transfer};

#[derive(Parser)]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    input: String,

    #[arg(short, long, value_name = "DIR")]
    model_dir: String,

    #[arg(short, long, value_name = "NAME", help = "Defaults to the first catalog entry")]
    style: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .init();

    let cli = Cli::parse();

    let style = match &cli.style {
        Some(name) => Style::parse(name)?,
        None => Style::default_style(),
    };

    let registry = StyleRegistry::new(&cli.model_dir);
    let network = registry.session(style)?;
    let output = transfer(Path::new(&cli.input), &network)?;
    println!("{}", output.display());

    Ok(())
}
