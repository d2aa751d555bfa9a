use std::marker::PhantomData;

use super::{AlignedRead, ReadsFilter};

#[derive(Copy, Clone)]
pub struct Sequential<R: AlignedRead, First: ReadsFilter<R>, Second: ReadsFilter<R>> {
    first: First,
    second: Second,
    phantom: PhantomData<fn() -> R>,
}

impl<R: AlignedRead, First: ReadsFilter<R>, Second: ReadsFilter<R>> Sequential<R, First, Second> {
    pub fn new(first: First, second: Second) -> Self {
        Sequential { first, second, phantom: Default::default() }
    }
}

impl<R, First, Second> ReadsFilter<R> for Sequential<R, First, Second>
where
    R: AlignedRead,
    First: ReadsFilter<R>,
    Second: ReadsFilter<R>,
{
    #[inline]
    fn is_read_ok(&self, record: &R) -> bool {
        self.first.is_read_ok(record) && self.second.is_read_ok(record)
    }
}
