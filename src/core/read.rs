use bio_types::strand::ReqStrand;
#[cfg(test)]
use mockall::{mock, predicate::*};
use rust_htslib::bam::Record;

#[allow(clippy::len_without_is_empty)]
pub trait SequencedRead {
    fn name(&self) -> &[u8];

    fn qual(&self) -> &[u8];
    fn base_qual(&self, i: usize) -> u8 {
        self.qual()[i]
    }

    fn len(&self) -> usize;
}

pub trait AlignedRead: SequencedRead {
    /// BAM-encoded alignment operations, `len << 4 | op` per element.
    fn raw_cigar(&self) -> &[u32];
    fn mapq(&self) -> u8;
    fn pos(&self) -> i64;
    fn tid(&self) -> i32;
    fn flags(&self) -> u16;
    fn strand(&self) -> ReqStrand;
    /// The read has supplementary alignments elsewhere (SA tag).
    fn has_split_alignment(&self) -> bool;
}

pub trait PairedRead: AlignedRead {
    fn is_paired(&self) -> bool;
    fn is_unmapped(&self) -> bool;
    fn is_mate_unmapped(&self) -> bool;
    fn mate_strand(&self) -> ReqStrand;
    fn mtid(&self) -> i32;
    fn mpos(&self) -> i64;
}

#[cfg(test)]
mock! {
    pub Read {}
    impl PairedRead for Read {
        fn is_paired(&self) -> bool;
        fn is_unmapped(&self) -> bool;
        fn is_mate_unmapped(&self) -> bool;
        fn mate_strand(&self) -> ReqStrand;
        fn mtid(&self) -> i32;
        fn mpos(&self) -> i64;
    }

    impl AlignedRead for Read {
        fn raw_cigar(&self) -> &[u32];
        fn mapq(&self) -> u8;
        fn pos(&self) -> i64;
        fn tid(&self) -> i32;
        fn flags(&self) -> u16;
        fn strand(&self) -> ReqStrand;
        fn has_split_alignment(&self) -> bool;
    }

    impl SequencedRead for Read {
        fn name(&self) -> &[u8];

        fn qual(&self) -> &[u8];
        fn base_qual(&self, i: usize) -> u8;

        fn len(&self) -> usize;
    }
}

impl SequencedRead for Record {
    #[inline]
    fn name(&self) -> &[u8] {
        self.qname()
    }

    #[inline]
    fn qual(&self) -> &[u8] {
        self.qual()
    }

    #[inline]
    fn len(&self) -> usize {
        self.seq_len()
    }
}

impl AlignedRead for Record {
    #[inline]
    fn raw_cigar(&self) -> &[u32] {
        self.raw_cigar()
    }

    #[inline]
    fn mapq(&self) -> u8 {
        self.mapq()
    }

    #[inline]
    fn pos(&self) -> i64 {
        self.pos()
    }

    #[inline]
    fn tid(&self) -> i32 {
        self.tid()
    }

    #[inline]
    fn flags(&self) -> u16 {
        self.flags()
    }

    #[inline]
    fn strand(&self) -> ReqStrand {
        if self.is_reverse() {
            ReqStrand::Reverse
        } else {
            ReqStrand::Forward
        }
    }

    #[inline]
    fn has_split_alignment(&self) -> bool {
        self.aux(b"SA").is_ok()
    }
}

impl PairedRead for Record {
    #[inline]
    fn is_paired(&self) -> bool {
        self.is_paired()
    }

    #[inline]
    fn is_unmapped(&self) -> bool {
        self.is_unmapped()
    }

    #[inline]
    fn is_mate_unmapped(&self) -> bool {
        self.is_mate_unmapped()
    }

    #[inline]
    fn mate_strand(&self) -> ReqStrand {
        if self.is_mate_reverse() {
            ReqStrand::Reverse
        } else {
            ReqStrand::Forward
        }
    }

    #[inline]
    fn mtid(&self) -> i32 {
        self.mtid()
    }

    #[inline]
    fn mpos(&self) -> i64 {
        self.mpos()
    }
}
