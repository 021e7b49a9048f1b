use atelier::app;

fn main() -> anyhow::Result<()> {
    app::run()
}
