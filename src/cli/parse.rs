use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::str::FromStr;

use clap::ArgMatches;
use indicatif::ProgressBar;
use itertools::Itertools;
use rust_htslib::bam::Record;

use crate::core::error::Result;
use crate::core::filtering::{ByFlags, ByQuality, Sequential};

use super::{args, style};

// Values are checked by the clap validators before parsing
fn value<T: FromStr>(matches: &ArgMatches, key: &str) -> T {
    matches
        .value_of(key)
        .and_then(|x| x.parse().ok())
        .unwrap_or_else(|| panic!("Failed to parse the \"{}\" argument", key))
}

pub fn readfilter(pbar: ProgressBar, matches: &ArgMatches) -> Sequential<Record, ByQuality, ByFlags> {
    pbar.set_style(style::parse::with_progress());
    pbar.set_message("Parsing reads filter options...");
    let (mapq, allow_mapq_255, min_avg_qual) = (
        value(matches, args::reads_filtering::MAPQ),
        matches.is_present(args::reads_filtering::ALLOW_MAPQ_255),
        value(matches, args::reads_filtering::MIN_AVG_QUAL),
    );
    let byquality = ByQuality::new(mapq, !allow_mapq_255, min_avg_qual);

    let (include, exclude) = (
        value(matches, args::reads_filtering::INCLUDE_FLAGS),
        value(matches, args::reads_filtering::EXCLUDE_FLAGS),
    );
    let byflags = ByFlags::new(include, exclude);

    let msg = format!(
        "Reads filter options: require flags {}, disallow flags {}, mapq >= {}, average phred >= {}. ",
        byflags.include(),
        byflags.exclude(),
        byquality.mapq(),
        byquality.min_avg_qual()
    );
    log::debug!("{}", msg);
    if allow_mapq_255 {
        pbar.finish_with_message(msg + "Mapq = 255 is allowed.");
    } else {
        pbar.finish_with_message(msg + "Mapq = 255 is NOT allowed.");
    }

    Sequential::new(byquality, byflags)
}

pub fn saveto(pbar: ProgressBar, matches: &ArgMatches) -> Result<BufWriter<File>> {
    pbar.set_style(style::parse::with_progress());
    pbar.set_message("Parsing output path...");
    let result: String = value(matches, args::core::SAVETO);
    let file = BufWriter::new(File::create(&result)?);
    pbar.finish_with_message(format!("Result will be saved to {}", result));
    Ok(file)
}

pub fn bamfiles(pbar: ProgressBar, matches: &ArgMatches) -> Vec<PathBuf> {
    pbar.set_style(style::parse::with_progress());
    pbar.set_message("Parsing paths to the input files...");
    let result: Vec<PathBuf> = matches.values_of(args::core::INPUT).into_iter().flatten().map(|x| x.into()).collect();
    if result.len() == 1 {
        pbar.finish_with_message(format!("Input file path: {}", result[0].display()))
    } else {
        let paths = result.iter().map(|x| x.display()).join(" ");
        pbar.finish_with_message(format!("Input files that will be scanned: {}", paths));
    }
    result
}

pub fn threads(pbar: ProgressBar, matches: &ArgMatches) -> usize {
    pbar.set_style(style::parse::with_progress());
    pbar.set_message("Parsing number of threads allowed to launch...");
    let result = value(matches, args::core::THREADS);
    pbar.finish_with_message(format!(
        "Using thread pool with at most {} threads(+ 1 thread to render progress bar)",
        result
    ));
    result
}

pub fn name(pbar: ProgressBar, matches: &ArgMatches) -> String {
    pbar.set_style(style::parse::with_progress());
    pbar.set_message("Parsing the run title...");
    let result: String = value(matches, args::core::NAME);
    pbar.finish_with_message(format!("Run title: {}", result));
    result
}
