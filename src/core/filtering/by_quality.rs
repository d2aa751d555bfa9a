use derive_getters::Getters;
use derive_more::Constructor;

use crate::core::pairs::average_quality;

use super::{AlignedRead, ReadsFilter};

#[derive(Constructor, Getters, Copy, Clone)]
pub struct ByQuality {
    mapq: u8,
    no_mapq_255: bool, // 255 = mapping quality is not available
    min_avg_qual: u32,
}

impl<R: AlignedRead> ReadsFilter<R> for ByQuality {
    #[inline]
    fn is_read_ok(&self, record: &R) -> bool {
        let mapq = record.mapq();
        if mapq < self.mapq || (self.no_mapq_255 && mapq == 255) {
            return false;
        }
        self.min_avg_qual == 0 || average_quality(record) >= self.min_avg_qual
    }
}
