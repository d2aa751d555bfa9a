use std::path::PathBuf;

use indicatif::ProgressBar;
use rayon::prelude::*;

use crate::core::error::Result;
use crate::core::runner::GeometryScanner;
use crate::core::stats::GeometryCounts;

use super::{resformat, style, Args};

// Progress bar position is refreshed once per this many reads
const PBAR_DELTA: u64 = 10_000;

/// Scan every input file in parallel and save one report row per file.
/// `pbars` must hold a progress bar for each input file.
pub fn run(args: Args, pbars: Vec<ProgressBar>) -> Result<GeometryCounts> {
    debug_assert_eq!(args.bamfiles.len(), pbars.len());
    let scanner = GeometryScanner::new(args.readfilter);

    let results: Vec<(PathBuf, GeometryCounts)> = args
        .bamfiles
        .par_iter()
        .zip(pbars.par_iter())
        .map(|(path, pbar)| {
            log::info!("Scanning {}", path.display());
            pbar.set_style(style::run::scanning());
            pbar.set_message(path.display().to_string());

            let counts = scanner.scan(path, |n| {
                if n % PBAR_DELTA == 0 {
                    pbar.set_position(n)
                }
            })?;

            pbar.set_style(style::run::finished());
            pbar.finish_with_message(format!(
                "{}: {} reads classified, {} skipped",
                path.display(),
                counts.processed,
                counts.skipped
            ));
            Ok((path.clone(), counts))
        })
        .collect::<Result<_>>()?;

    let mut saveto = csv::WriterBuilder::new().delimiter(b'\t').from_writer(args.saveto);
    resformat::geometry(&mut saveto, &args.name, &results)?;

    let total = results.into_iter().fold(GeometryCounts::default(), |a, (_, b)| a + b);
    log::info!(
        "Finished with {} files: {} reads classified, {} innie, {} possible adapter pairs, {} overlapping",
        args.bamfiles.len(),
        total.processed,
        total.innie,
        total.adapter_conservative,
        total.overlapping
    );
    Ok(total)
}
