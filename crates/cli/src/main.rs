use std::io::{self, Write};
use std::rc::Rc;

use anyhow::Context;

use stockwatch_cli::{config::Config, demo};
use stockwatch_events::{LineFormat, LineSink};

fn main() -> anyhow::Result<()> {
    stockwatch_observability::init();

    let config = Config::from_env().context("reading configuration")?;
    tracing::info!(?config, "starting demo");

    let sink = Rc::new(LineSink::new(io::stdout(), config.output));
    let catalog = demo::run(&config, sink)?;

    let mut out = io::stdout().lock();
    match config.output {
        LineFormat::Text => {
            writeln!(out)?;
            catalog.write_listing(&mut out)?;
        }
        LineFormat::Json => {
            let listing = serde_json::to_string(&catalog.list_all())?;
            writeln!(out, "{listing}")?;
        }
    }
    out.flush()?;

    Ok(())
}
