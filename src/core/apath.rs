use bio_types::strand::ReqStrand;
use derive_getters::Getters;
use derive_more::Constructor;
use rust_htslib::bam::record::{Cigar, CigarString};

use super::read::AlignedRead;

const OP_SHIFT: u32 = 4;
const OP_MASK: u32 = 0xf;

/// Decode BAM-encoded alignment operations. Order and lengths are preserved as encoded.
pub fn decode(raw: &[u32]) -> CigarString {
    let ops = raw
        .iter()
        .map(|&x| {
            let len = x >> OP_SHIFT;
            match x & OP_MASK {
                0 => Cigar::Match(len),
                1 => Cigar::Ins(len),
                2 => Cigar::Del(len),
                3 => Cigar::RefSkip(len),
                4 => Cigar::SoftClip(len),
                5 => Cigar::HardClip(len),
                6 => Cigar::Pad(len),
                7 => Cigar::Equal(len),
                8 => Cigar::Diff(len),
                op => panic!("Unexpected CIGAR operation code {} (HTS record corrupted?)", op),
            }
        })
        .collect();
    CigarString(ops)
}

/// Number of reference bases consumed by the path.
pub fn ref_length(path: &[Cigar]) -> u32 {
    path.iter()
        .map(|op| match op {
            Cigar::Match(len) | Cigar::Del(len) | Cigar::RefSkip(len) | Cigar::Equal(len) | Cigar::Diff(len) => *len,
            _ => 0,
        })
        .sum()
}

/// Number of read bases consumed by the path.
pub fn read_length(path: &[Cigar]) -> u32 {
    path.iter()
        .map(|op| match op {
            Cigar::Match(len) | Cigar::Ins(len) | Cigar::SoftClip(len) | Cigar::Equal(len) | Cigar::Diff(len) => *len,
            _ => 0,
        })
        .sum()
}

fn soft_clip_run<'a>(ops: impl Iterator<Item = &'a Cigar>) -> u32 {
    ops.skip_while(|op| matches!(op, Cigar::HardClip(_)))
        .map_while(|op| match op {
            Cigar::SoftClip(len) => Some(*len),
            _ => None,
        })
        .sum()
}

/// Soft-clipped bases at the start of the path, hard clips are skipped.
pub fn soft_clip_lead_size(path: &[Cigar]) -> u32 {
    soft_clip_run(path.iter())
}

/// Soft-clipped bases at the end of the path, hard clips are skipped.
pub fn soft_clip_trail_size(path: &[Cigar]) -> u32 {
    soft_clip_run(path.iter().rev())
}

/// Minimal alignment description: where a read lands and how.
#[derive(Constructor, Getters, Clone, Debug, PartialEq, Eq)]
pub struct SimpleAlignment {
    tid: i32,
    pos: i64,
    strand: ReqStrand,
    path: CigarString,
}

impl SimpleAlignment {
    pub fn from_read(read: &impl AlignedRead) -> Self {
        Self { tid: read.tid(), pos: read.pos(), strand: read.strand(), path: decode(read.raw_cigar()) }
    }

    /// Exclusive end of the aligned reference span.
    pub fn end(&self) -> i64 {
        self.pos + ref_length(&self.path) as i64
    }

    /// Alignment with edge soft clips turned into matches, i.e. the span the read would cover
    /// if the clipped bases were aligned to the reference as well.
    pub fn with_matched_soft_clips(&self) -> Self {
        let lead = soft_clip_lead_size(&self.path);
        let trail = soft_clip_trail_size(&self.path);
        if lead == 0 && trail == 0 {
            return self.clone();
        }

        let ops = &self.path.0;
        let first = ops.iter().position(|op| !matches!(op, Cigar::HardClip(_))).unwrap_or(ops.len());
        let last = ops.iter().rposition(|op| !matches!(op, Cigar::HardClip(_))).map_or(first, |x| x + 1);
        let issoft = |op: &Cigar| matches!(op, Cigar::SoftClip(_));
        let lead_end = first + ops[first..last].iter().take_while(|op| issoft(op)).count();
        let trail_start = last - ops[lead_end..last].iter().rev().take_while(|op| issoft(op)).count();

        let mut path: Vec<Cigar> = Vec::with_capacity(ops.len());
        for (ind, op) in ops.iter().enumerate() {
            let op = match op {
                Cigar::SoftClip(len) if ind < lead_end || ind >= trail_start => Cigar::Match(*len),
                x => *x,
            };
            if let (Some(Cigar::Match(prev)), Cigar::Match(len)) = (path.last_mut(), op) {
                *prev += len;
                continue;
            }
            path.push(op);
        }

        Self { tid: self.tid, pos: self.pos - lead as i64, strand: self.strand, path: CigarString(path) }
    }
}
