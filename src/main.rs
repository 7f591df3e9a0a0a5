// src/main.rs

use ganttdag::{cli, logging, run, RunOutcome};

fn main() {
    match run_main() {
        Ok(RunOutcome::Ok) => {}
        Ok(RunOutcome::InvalidSchedule) => std::process::exit(2),
        Err(err) => {
            eprintln!("ganttdag error: {err:?}");
            std::process::exit(1);
        }
    }
}

fn run_main() -> anyhow::Result<RunOutcome> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args)
}
