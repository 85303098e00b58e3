mod cli;
mod log;
mod plant;
mod prelude;
mod quantity;
mod reading;
mod source;
mod statistics;
mod tables;
mod window;

use chrono::Local;
use clap::Parser;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

use crate::{
    cli::{Args, Command, LevelOverride},
    plant::PowerPlant,
    prelude::*,
    statistics::Summary,
    tables::{build_history_table, build_sources_table, build_summary_table},
};

fn main() -> Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder().with_default_directive(LevelFilter::INFO.into()).from_env_lossy(),
        )
        .init();

    let args = Args::parse();
    let mut plant = PowerPlant::new(&args.log_file);

    match args.command {
        Command::Sources => {
            println!("{}", build_sources_table(plant.sources()));
        }

        Command::Collect(collect_args) => {
            apply_overrides(&mut plant, &collect_args.overrides)?;
            let readings = plant.collect()?;
            println!("{}", build_history_table(&readings));
        }

        Command::History => {
            let history = plant.history()?;
            if history.is_empty() {
                println!("No data collected yet.");
            } else {
                println!("{}", build_history_table(&history));
            }
        }

        Command::Stats(stats_args) => {
            let window = stats_args.window(Local::now().naive_local())?;
            let readings = plant.filter(window)?;
            if readings.is_empty() {
                println!("No readings between {} and {}.", window.from, window.to);
            } else {
                info!(n_readings = readings.len(), "crunching the window…");
                let energies: Vec<f64> =
                    readings.iter().map(|reading| reading.energy.0).collect();
                println!("{}", build_summary_table(&Summary::try_new(&energies)?));
            }
        }

        Command::Check(check_args) => {
            apply_overrides(&mut plant, &check_args.overrides)?;
            let issues: Vec<_> = plant
                .sources()
                .iter()
                .filter_map(source::EnergySource::check_for_issues)
                .collect();
            if issues.is_empty() {
                println!("All sources are healthy.");
            } else {
                for issue in issues {
                    warn!(%issue);
                    println!("{issue}");
                }
            }
        }
    }

    Ok(())
}

fn apply_overrides(plant: &mut PowerPlant, overrides: &[LevelOverride]) -> Result {
    for level in overrides {
        plant
            .source_mut(&level.source_name)
            .with_context(|| format!("unknown source `{}`", level.source_name))?
            .set_energy(level.energy);
    }
    Ok(())
}
