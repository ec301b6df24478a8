use std::path::PathBuf;

use shiproute_grid::{PathDecoder, RouteMap};

use crate::{command::run::print_route_summary, model::route_report::RouteReport, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ShowArg {
    /// Report file written by `run`
    report: PathBuf,
}

pub(crate) fn run(arg: &ShowArg) -> anyhow::Result<()> {
    let report = util::read_json_file::<RouteReport, _>("report", &arg.report)?;
    let env = &report.environment;
    let path = PathDecoder::new(env).decode(report.genotype.genes());
    if path.points() != report.path.as_slice() {
        log::warn!("stored path differs from the one decoded from the genotype; drawing the decoded one");
    }

    eprintln!("Report: {}", arg.report.display());
    eprintln!("  Solved at: {}", report.solved_at);
    eprintln!("  Seed: {}", report.seed);
    eprintln!(
        "  Grid {size}x{size}, {} obstacles, {} -> {}",
        env.obstacles().len(),
        env.start(),
        env.end(),
        size = env.size(),
    );
    eprintln!(
        "  Population {}, {} generations",
        report.config.population_size,
        report.generations.len()
    );
    eprintln!();
    eprint!("{}", RouteMap::new(env).with_path(&path));
    eprintln!();
    print_route_summary(env, report.best_generation, report.best_fitness, &path);
    Ok(())
}
