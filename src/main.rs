use std::io;

use log::LevelFilter;
use score_viz::{config::Config, driver, viz::TuiRenderer};

fn main() -> anyhow::Result<()> {
    tui_logger::init_logger(LevelFilter::Trace)?;
    tui_logger::set_default_level(LevelFilter::Debug);

    let config = Config::default();
    let report = driver::run(&config, &mut TuiRenderer, &mut io::stderr())?;

    log::info!(
        "plotted {} of {} training logs",
        report.plotted.len(),
        config.agents.len()
    );

    Ok(())
}
