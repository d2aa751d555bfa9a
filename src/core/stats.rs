use derive_more::{Add, AddAssign};

use super::apath::SimpleAlignment;
use super::pairs;
use super::read::PairedRead;

/// All pair geometry properties of a single read.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct PairGeometry {
    pub mapped_pair: bool,
    pub chrom_pair: bool,
    pub innie: bool,
    pub adapter_aggressive: bool,
    pub adapter_conservative: bool,
    pub overlapping: bool,
    pub avg_quality: u32,
}

impl PairGeometry {
    /// Overlap is evaluated on the read alignment with all edge soft clips matched.
    pub fn classify<R: PairedRead>(read: &R) -> Self {
        let chrom_pair = pairs::is_mapped_chrom_pair(read);
        let overlapping = chrom_pair && {
            let matched = SimpleAlignment::from_read(read).with_matched_soft_clips();
            pairs::is_overlapping_pair(read, &matched)
        };
        Self {
            mapped_pair: pairs::is_mapped_pair(read),
            chrom_pair,
            innie: pairs::is_innie_pair(read),
            adapter_aggressive: pairs::is_possible_adapter_pair(read, true),
            adapter_conservative: pairs::is_possible_adapter_pair(read, false),
            overlapping,
            avg_quality: pairs::average_quality(read),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Add, AddAssign)]
pub struct GeometryCounts {
    pub processed: u64,
    pub skipped: u64,
    pub mapped_pair: u64,
    pub chrom_pair: u64,
    pub innie: u64,
    pub adapter_aggressive: u64,
    pub adapter_conservative: u64,
    pub overlapping: u64,
    pub qual_sum: u64,
}

impl GeometryCounts {
    pub fn record(&mut self, geometry: &PairGeometry) {
        self.processed += 1;
        self.mapped_pair += geometry.mapped_pair as u64;
        self.chrom_pair += geometry.chrom_pair as u64;
        self.innie += geometry.innie as u64;
        self.adapter_aggressive += geometry.adapter_aggressive as u64;
        self.adapter_conservative += geometry.adapter_conservative as u64;
        self.overlapping += geometry.overlapping as u64;
        self.qual_sum += geometry.avg_quality as u64;
    }

    pub fn skip(&mut self) {
        self.skipped += 1;
    }

    /// Mean of per-read average qualities over processed reads.
    pub fn mean_avg_quality(&self) -> f64 {
        if self.processed == 0 {
            0f64
        } else {
            self.qual_sum as f64 / self.processed as f64
        }
    }
}
