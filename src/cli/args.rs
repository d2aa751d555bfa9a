use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::{Arg, ArgMatches};
use indicatif::ProgressBar;
use rust_htslib::bam::Record;

use crate::core::error::Result;
use crate::core::filtering::{ByFlags, ByQuality, Sequential};

use super::{parse, validate};

pub mod core {
    use super::*;

    pub const INPUT: &str = "input";
    pub const THREADS: &str = "threads";
    pub const SAVETO: &str = "saveto";
    pub const NAME: &str = "name";

    pub const SECTION_NAME: &str = "Core";

    pub fn args<'a>() -> Vec<Arg<'a>> {
        let args = vec![
            Arg::new(INPUT)
                .short('i')
                .long(INPUT)
                .takes_value(true)
                .required(true)
                .multiple_values(true)
                .validator(validate::path)
                .long_help("Path to the input BAM/SAM/CRAM file(s). May contain a space-separated list of files, each of them is scanned independently and reported in a separate row."),
            Arg::new(NAME)
                .short('n')
                .long(NAME)
                .takes_value(true)
                .default_value("NA")
                .long_help("Name of the run."),
            Arg::new(SAVETO)
                .short('o')
                .long(SAVETO)
                .takes_value(true)
                .default_value("/dev/stdout")
                .long_help("Path to the output tsv file. By default, the results are printed to stdout."),
            Arg::new(THREADS)
                .short('t')
                .long(THREADS)
                .takes_value(true)
                .validator(validate::numeric(1, usize::MAX))
                .default_value("1")
                .long_help("Maximum number of threads to spawn at once. Input files are scanned in parallel."),
        ];
        args.into_iter().map(|x| x.help_heading(Some(SECTION_NAME))).collect()
    }
}

pub mod reads_filtering {
    use super::*;

    pub const MAPQ: &str = "mapq";
    pub const ALLOW_MAPQ_255: &str = "mapq-255";
    pub const INCLUDE_FLAGS: &str = "in-flags";
    pub const EXCLUDE_FLAGS: &str = "ex-flags";
    pub const MIN_AVG_QUAL: &str = "min-avg-qual";

    pub const SECTION_NAME: &str = "Reads filtering";

    pub fn args<'a>() -> Vec<Arg<'a>> {
        let args = vec![
            Arg::new(MAPQ)
                .long(MAPQ)
                .takes_value(true)
                .validator(validate::numeric(0u8, 254u8))
                .default_value("0")
                .long_help("Classify only reads with mapq ≥ threshold. Note that reads with mapq = 255 are skipped by default(mapq is not available according to the SAM spec)."),
            Arg::new(ALLOW_MAPQ_255)
                .long(ALLOW_MAPQ_255)
                .takes_value(false)
                .long_help("Classify reads with mapq=255. Useful for aligners that do not fully conform to the SAM specification."),
            Arg::new(INCLUDE_FLAGS)
                .long(INCLUDE_FLAGS)
                .takes_value(true)
                .validator(validate::numeric(0u16, 4095u16))
                .default_value("1")
                .long_help("Include only reads for which all the specified BAM flags are set. By default(1) only paired reads are classified. Use zero(0) to disable this filter."),
            Arg::new(EXCLUDE_FLAGS)
                .long(EXCLUDE_FLAGS)
                .takes_value(true)
                .validator(validate::numeric(0u16, 4095u16))
                .default_value("3840")
                .long_help("Exclude reads for which any of the specified BAM flags are set. The default value(3840) skips secondary and supplementary alignments, duplicates and reads that fail platform/vendor quality checks. Use zero(0) to disable this filter."),
            Arg::new(MIN_AVG_QUAL)
                .long(MIN_AVG_QUAL)
                .takes_value(true)
                .validator(validate::numeric(0u32, 255u32))
                .default_value("0")
                .long_help("Classify only reads with the average base quality(phred, rounded down) ≥ threshold."),
        ];
        args.into_iter().map(|x| x.help_heading(Some(SECTION_NAME))).collect()
    }
}

pub fn all<'a>() -> Vec<Arg<'a>> {
    core::args().into_iter().chain(reads_filtering::args().into_iter()).collect()
}

pub struct Args {
    pub name: String,
    pub threads: usize,
    pub bamfiles: Vec<PathBuf>,
    pub readfilter: Sequential<Record, ByQuality, ByFlags>,
    pub saveto: BufWriter<File>,
}

impl Args {
    pub fn new(args: &ArgMatches, factory: impl Fn() -> ProgressBar) -> Result<Self> {
        Ok(Self {
            name: parse::name(factory(), args),
            threads: parse::threads(factory(), args),
            bamfiles: parse::bamfiles(factory(), args),
            readfilter: parse::readfilter(factory(), args),
            saveto: parse::saveto(factory(), args)?,
        })
    }
}
