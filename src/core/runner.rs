use std::path::Path;

use derive_more::Constructor;
use rust_htslib::bam::{self, Read, Record};

use super::error::{Error, Result};
use super::filtering::ReadsFilter;
use super::stats::{GeometryCounts, PairGeometry};

/// Streams an alignment file and tallies pair geometry of reads accepted by the filter.
#[derive(Constructor, Clone)]
pub struct GeometryScanner<Filter: ReadsFilter<Record>> {
    filter: Filter,
}

impl<Filter: ReadsFilter<Record>> GeometryScanner<Filter> {
    pub fn classify(&self, record: &Record) -> Option<PairGeometry> {
        if self.filter.is_read_ok(record) {
            Some(PairGeometry::classify(record))
        } else {
            None
        }
    }

    /// `onread` is called with the number of records consumed so far, once per record.
    pub fn scan(&self, path: &Path, mut onread: impl FnMut(u64)) -> Result<GeometryCounts> {
        let mut reader =
            bam::Reader::from_path(path).map_err(|source| Error::Open { source, path: path.to_path_buf() })?;

        let mut counts = GeometryCounts::default();
        let mut record = Record::new();
        let mut index = 0;
        while let Some(r) = reader.read(&mut record) {
            r.map_err(|source| Error::Record { source, path: path.to_path_buf(), index })?;
            match self.classify(&record) {
                Some(geometry) => counts.record(&geometry),
                None => counts.skip(),
            }
            index += 1;
            onread(index);
        }
        log::debug!("{}: {} records, {} classified", path.display(), index, counts.processed);
        Ok(counts)
    }
}
