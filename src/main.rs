use std::process;
use std::thread;

use clap::{crate_authors, crate_description, crate_name, crate_version, Command};
use indicatif::{MultiProgress, ProgressBar};
use rayon::ThreadPoolBuilder;

use pairgeom::cli;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = Command::new(crate_name!())
        .author(crate_authors!("\n"))
        .version(crate_version!())
        .about(crate_description!())
        .max_term_width(120)
        .args(cli::args::all())
        .get_matches();

    let mbar = MultiProgress::new();
    let factory = || mbar.add(ProgressBar::new_spinner());

    let args = cli::Args::new(&matches, factory).unwrap_or_else(|e| {
        log::error!("{}", e);
        process::exit(1)
    });
    let pbars: Vec<ProgressBar> = args.bamfiles.iter().map(|_| factory()).collect();
    let pool = ThreadPoolBuilder::new().num_threads(args.threads).build().expect("Failed to initialize thread pool");

    // Bars are rendered by the main thread while the pool is scanning
    let result = thread::scope(|s| {
        let worker = s.spawn(move || pool.install(|| cli::run(args, pbars)));
        mbar.join().expect("Failed to render progress bar");
        worker.join()
    });

    match result {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => {
            log::error!("{}", e);
            process::exit(1);
        }
        Err(_) => {
            log::error!("Worker thread panicked");
            process::exit(2);
        }
    }
}
