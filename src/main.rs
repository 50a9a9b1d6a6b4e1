use std::process::ExitCode;
use std::time::Instant;

use log::{info, warn};

use u_insertion::config::{self, CliArgs, Command};
use u_insertion::construction::build_tour;
use u_insertion::distance::DistanceMatrix;
use u_insertion::io::{read_points, write_report, write_tour_file, TourReport};
use u_insertion::{logging, Result};

fn main() -> ExitCode {
    let cli = match CliArgs::parse_from_iter(std::env::args().skip(1)) {
        Ok(Command::Run(cli)) => cli,
        Ok(Command::Help) => {
            print!("{}", config::usage());
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(1);
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &CliArgs) -> Result<()> {
    let now = Instant::now();
    let options = &cli.options;
    logging::init_logger(options)?;

    let loaded = read_points(&cli.input)?;
    if let Some(record) = &loaded.stopped_at {
        warn!(
            "stopped reading {} at malformed line {}: {:?} ({} points loaded)",
            cli.input.display(),
            record.line,
            record.content,
            loaded.points.len()
        );
    }

    let distances = DistanceMatrix::from_points(&loaded.points)?;
    let scan = options.scan()?;
    let tour = build_tour(&distances, options.strategy, &scan)?;

    write_tour_file(&tour, &cli.output)?;
    if let Some(path) = &cli.report {
        write_report(&TourReport::new(options.strategy, &tour), path)?;
    }

    info!(
        "output: strategy={} n={} cost={:.6} threads={} time={:.2}s",
        options.strategy,
        tour.len(),
        tour.total_cost(),
        options.threads,
        now.elapsed().as_secs_f32()
    );
    Ok(())
}
