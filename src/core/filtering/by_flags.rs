use derive_getters::Getters;
use derive_more::Constructor;

use super::{AlignedRead, ReadsFilter};

#[derive(Constructor, Getters, Copy, Clone)]
pub struct ByFlags {
    include: u16,
    exclude: u16,
}

impl<R: AlignedRead> ReadsFilter<R> for ByFlags {
    #[inline]
    fn is_read_ok(&self, record: &R) -> bool {
        ((record.flags() & self.include) == self.include) && ((record.flags() & self.exclude) == 0)
    }
}
