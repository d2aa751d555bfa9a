//! Geometry of paired-end alignments: mapping status, orientation, adapter read-through and
//! mate overlap. All predicates are pure functions of the record (and the matched alignment).

use bio_types::strand::ReqStrand;

use super::apath::{self, SimpleAlignment};
use super::read::{PairedRead, SequencedRead};

/// Window of mate position offsets (exclusive) typical for a read running into the adapter.
const ADAPTER_MIN_POS_DIFF: i64 = -50;
const ADAPTER_MAX_POS_DIFF: i64 = 10;

/// Both the read and its mate are mapped.
#[inline]
pub fn is_mapped_pair(read: &impl PairedRead) -> bool {
    read.is_paired() && !read.is_unmapped() && !read.is_mate_unmapped()
}

/// Both mates are mapped to the same contig.
#[inline]
pub fn is_mapped_chrom_pair(read: &impl PairedRead) -> bool {
    is_mapped_pair(read) && read.tid() == read.mtid()
}

#[inline]
fn is_opposite_strand_pair(read: &impl PairedRead) -> bool {
    read.strand() != read.mate_strand()
}

/// Mates are on the same contig and face each other (FR orientation).
pub fn is_innie_pair(read: &impl PairedRead) -> bool {
    if !is_mapped_chrom_pair(read) || !is_opposite_strand_pair(read) {
        return false;
    }

    // Mates starting at the same position are accepted on strand opposition alone
    let (pos, mpos) = (read.pos(), read.mpos());
    if pos < mpos {
        read.strand() == ReqStrand::Forward
    } else if pos > mpos {
        read.strand() == ReqStrand::Reverse
    } else {
        true
    }
}

/// Short fragment where the read likely runs into the adapter sequence.
///
/// The aggressive mode only checks the mate offset and is meant for hypothesis generation,
/// where spurious small indels from adapter k-mers must be avoided. The conservative mode is
/// meant for the assembly reads filtering: reads with supplementary alignments are always kept,
/// others are flagged only if soft clipped at the 3' end.
pub fn is_possible_adapter_pair(read: &impl PairedRead, aggressive: bool) -> bool {
    if !is_mapped_chrom_pair(read) || !is_opposite_strand_pair(read) {
        return false;
    }

    let mut pos_diff = read.mpos() - read.pos();
    if read.strand() == ReqStrand::Reverse {
        pos_diff *= -1;
    }

    let is_candidate = ADAPTER_MIN_POS_DIFF < pos_diff && pos_diff < ADAPTER_MAX_POS_DIFF;
    if !is_candidate {
        return false;
    } else if aggressive {
        return true;
    }

    if read.has_split_alignment() {
        return false;
    }

    let path = apath::decode(read.raw_cigar());
    let softclip = match read.strand() {
        ReqStrand::Forward => apath::soft_clip_trail_size(&path),
        ReqStrand::Reverse => apath::soft_clip_lead_size(&path),
    };
    softclip > 0
}

/// Mates overlap on the reference given the read's matched alignment span.
pub fn is_overlapping_pair(read: &impl PairedRead, matched: &SimpleAlignment) -> bool {
    if !is_mapped_chrom_pair(read) || !is_opposite_strand_pair(read) {
        return false;
    }

    // Distance-based duplicate pair detection is disabled
    match read.strand() {
        ReqStrand::Forward => matched.end() >= read.mpos(),
        ReqStrand::Reverse => *matched.pos() <= read.mpos(),
    }
}

/// Mean Phred quality of the read, rounded down. Zero for empty reads.
pub fn average_quality(read: &impl SequencedRead) -> u32 {
    let len = read.len();
    if len == 0 {
        return 0;
    }
    let total: u64 = read.qual()[..len].iter().map(|&x| x as u64).sum();
    (total / len as u64) as u32
}

#[cfg(test)]
mod tests {
    use rust_htslib::bam::record::{Aux, Cigar, CigarString};
    use rust_htslib::bam::Record;

    use crate::core::read::MockRead;

    use super::*;

    use bio_types::strand::ReqStrand::{Forward, Reverse};

    struct Flags {
        paired: bool,
        unmapped: bool,
        mate_unmapped: bool,
    }

    const MAPPED: Flags = Flags { paired: true, unmapped: false, mate_unmapped: false };

    fn mock(flags: Flags, tids: (i32, i32), pos: (i64, i64), strands: (ReqStrand, ReqStrand)) -> MockRead {
        let mut read = MockRead::new();
        read.expect_is_paired().return_const(flags.paired);
        read.expect_is_unmapped().return_const(flags.unmapped);
        read.expect_is_mate_unmapped().return_const(flags.mate_unmapped);
        read.expect_tid().return_const(tids.0);
        read.expect_mtid().return_const(tids.1);
        read.expect_pos().return_const(pos.0);
        read.expect_mpos().return_const(pos.1);
        read.expect_strand().return_const(strands.0);
        read.expect_mate_strand().return_const(strands.1);
        read
    }

    fn pair(pos: (i64, i64), strands: (ReqStrand, ReqStrand)) -> MockRead {
        mock(MAPPED, (0, 0), pos, strands)
    }

    // Forward reads are flagged 0x1 | 0x20 (mate reverse), reverse ones 0x1 | 0x10
    fn record(pos: i64, mpos: i64, strand: ReqStrand, cigar: Vec<Cigar>, qual: &[u8]) -> Record {
        let mut record = Record::new();
        let seq = vec![b'A'; qual.len()];
        record.set(b"read", Some(&CigarString(cigar)), &seq, qual);
        record.set_tid(0);
        record.set_mtid(0);
        record.set_pos(pos);
        record.set_mpos(mpos);
        record.set_flags(match strand {
            Forward => 0x1 | 0x20,
            Reverse => 0x1 | 0x10,
        });
        record
    }

    #[test]
    fn is_mapped_pair() {
        for (paired, unmapped, mate_unmapped, expected) in [
            (true, false, false, true),
            (false, false, false, false),
            (true, true, false, false),
            (true, false, true, false),
            (true, true, true, false),
            (false, true, true, false),
        ] {
            let read = mock(Flags { paired, unmapped, mate_unmapped }, (0, 0), (0, 0), (Forward, Reverse));
            assert_eq!(super::is_mapped_pair(&read), expected);
        }
    }

    #[test]
    fn is_mapped_chrom_pair() {
        for (tids, expected) in [((0, 0), true), ((3, 3), true), ((0, 1), false), ((5, 2), false)] {
            let read = mock(MAPPED, tids, (100, 200), (Forward, Reverse));
            assert_eq!(super::is_mapped_chrom_pair(&read), expected);
        }

        let unpaired = Flags { paired: false, unmapped: false, mate_unmapped: false };
        let read = mock(unpaired, (0, 0), (100, 200), (Forward, Reverse));
        assert!(!super::is_mapped_chrom_pair(&read));
    }

    #[test]
    fn is_innie_pair() {
        for (pos, strands, expected) in [
            // FR orientation from both mates perspective
            ((100, 200), (Forward, Reverse), true),
            ((200, 100), (Reverse, Forward), true),
            // Everted (RF) pairs
            ((100, 200), (Reverse, Forward), false),
            ((200, 100), (Forward, Reverse), false),
            // Same strand pairs
            ((100, 200), (Forward, Forward), false),
            ((200, 100), (Reverse, Reverse), false),
            ((100, 100), (Forward, Forward), false),
            // Ties
            ((100, 100), (Forward, Reverse), true),
            ((100, 100), (Reverse, Forward), true),
        ] {
            assert_eq!(super::is_innie_pair(&pair(pos, strands)), expected, "{:?} {:?}", pos, strands);
        }

        // Proper orientation, but different contigs or unmapped mate
        let read = mock(MAPPED, (0, 1), (100, 200), (Forward, Reverse));
        assert!(!super::is_innie_pair(&read));
        let mate_unmapped = Flags { paired: true, unmapped: false, mate_unmapped: true };
        let read = mock(mate_unmapped, (0, 0), (100, 200), (Forward, Reverse));
        assert!(!super::is_innie_pair(&read));
    }

    #[test]
    fn implications() {
        for (flags, tids) in [
            ((true, false, false), (0, 0)),
            ((true, false, false), (0, 1)),
            ((true, true, false), (0, 0)),
            ((false, false, false), (0, 0)),
        ] {
            for pos in [(100, 200), (200, 100), (100, 100)] {
                for strands in [(Forward, Reverse), (Reverse, Forward), (Forward, Forward)] {
                    let flags = Flags { paired: flags.0, unmapped: flags.1, mate_unmapped: flags.2 };
                    let read = mock(flags, tids, pos, strands);
                    if super::is_innie_pair(&read) {
                        assert!(super::is_mapped_chrom_pair(&read));
                    }
                    if super::is_mapped_chrom_pair(&read) {
                        assert!(super::is_mapped_pair(&read));
                    }
                }
            }
        }
    }

    #[test]
    fn adapter_window() {
        for aggressive in [true, false] {
            // Forward read: pos_diff = mpos - pos
            for (mpos, expected) in [(1009, true), (1010, false), (950, false), (951, true), (1000, true)] {
                let read = record(1000, mpos, Forward, vec![Cigar::Match(50), Cigar::SoftClip(5)], &[30; 55]);
                assert_eq!(is_possible_adapter_pair(&read, aggressive), expected, "mpos {}", mpos);
            }
            // Reverse read: pos_diff = pos - mpos
            for (mpos, expected) in [(991, true), (990, false), (1050, false), (1049, true)] {
                let read = record(1000, mpos, Reverse, vec![Cigar::SoftClip(5), Cigar::Match(50)], &[30; 55]);
                assert_eq!(is_possible_adapter_pair(&read, aggressive), expected, "mpos {}", mpos);
            }
        }
    }

    #[test]
    fn adapter_requires_opposite_strand_chrom_pair() {
        for aggressive in [true, false] {
            let read = pair((1000, 1005), (Forward, Forward));
            assert!(!is_possible_adapter_pair(&read, aggressive));

            let read = mock(MAPPED, (0, 1), (1000, 1005), (Forward, Reverse));
            assert!(!is_possible_adapter_pair(&read, aggressive));
        }
    }

    #[test]
    fn adapter_aggressive_vs_conservative() {
        // No clipping, inside the window
        let mut read = record(1000, 1005, Forward, vec![Cigar::Match(50)], &[30; 50]);
        assert!(is_possible_adapter_pair(&read, true));
        assert!(!is_possible_adapter_pair(&read, false));

        // Trailing soft clip on a forward read
        let mut clipped = record(1000, 1005, Forward, vec![Cigar::Match(45), Cigar::SoftClip(5)], &[30; 50]);
        assert!(is_possible_adapter_pair(&clipped, true));
        assert!(is_possible_adapter_pair(&clipped, false));

        // Supplementary alignments always keep the read
        for r in [&mut read, &mut clipped] {
            r.push_aux(b"SA", Aux::String("chr2,500,+,30M20S,60,0;")).unwrap();
            assert!(is_possible_adapter_pair(&*r, true));
            assert!(!is_possible_adapter_pair(&*r, false));
        }
    }

    #[test]
    fn adapter_clip_at_3prime_end() {
        for (strand, cigar, expected) in [
            (Forward, vec![Cigar::Match(45), Cigar::SoftClip(5)], true),
            (Forward, vec![Cigar::SoftClip(5), Cigar::Match(45)], false),
            (Forward, vec![Cigar::Match(45), Cigar::SoftClip(5), Cigar::HardClip(10)], true),
            (Reverse, vec![Cigar::SoftClip(5), Cigar::Match(45)], true),
            (Reverse, vec![Cigar::Match(45), Cigar::SoftClip(5)], false),
            (Reverse, vec![Cigar::HardClip(3), Cigar::SoftClip(5), Cigar::Match(45)], true),
        ] {
            let read = record(1000, 1000, strand, cigar.clone(), &[30; 50]);
            assert_eq!(is_possible_adapter_pair(&read, false), expected, "{:?} {:?}", strand, cigar);
        }
    }

    #[test]
    fn is_overlapping_pair() {
        let matched = |pos, path| SimpleAlignment::new(0, pos, Forward, CigarString(path));

        // Forward read: matched end is inclusive
        for (mpos, expected) in [(150, true), (151, false), (120, true), (90, true)] {
            let read = pair((100, mpos), (Forward, Reverse));
            let alignment = matched(100, vec![Cigar::Match(50)]);
            assert_eq!(super::is_overlapping_pair(&read, &alignment), expected, "mpos {}", mpos);
        }
        // Span is measured on the reference
        let read = pair((100, 155), (Forward, Reverse));
        let alignment = matched(100, vec![Cigar::Match(20), Cigar::Del(5), Cigar::Ins(3), Cigar::Match(30)]);
        assert!(super::is_overlapping_pair(&read, &alignment));
        let alignment = matched(100, vec![Cigar::Match(20), Cigar::Ins(5), Cigar::Match(30)]);
        assert!(!super::is_overlapping_pair(&read, &alignment));

        // Reverse read: only the matched start matters
        for (mpos, expected) in [(200, true), (199, false), (250, true)] {
            let read = pair((200, mpos), (Reverse, Forward));
            let alignment = matched(200, vec![Cigar::Match(50)]);
            assert_eq!(super::is_overlapping_pair(&read, &alignment), expected, "mpos {}", mpos);
        }

        // Matched alignment, not the raw record position, decides
        let read = pair((200, 195), (Reverse, Forward));
        assert!(super::is_overlapping_pair(&read, &matched(195, vec![Cigar::Match(55)])));
        assert!(!super::is_overlapping_pair(&read, &matched(200, vec![Cigar::Match(50)])));
    }

    #[test]
    fn overlapping_requires_opposite_strand_chrom_pair() {
        let alignment = SimpleAlignment::new(0, 100, Forward, CigarString(vec![Cigar::Match(50)]));
        let read = pair((100, 120), (Forward, Forward));
        assert!(!super::is_overlapping_pair(&read, &alignment));

        let read = mock(MAPPED, (0, 2), (100, 120), (Forward, Reverse));
        assert!(!super::is_overlapping_pair(&read, &alignment));

        let unmapped = Flags { paired: true, unmapped: true, mate_unmapped: false };
        let read = mock(unmapped, (0, 0), (100, 120), (Forward, Reverse));
        assert!(!super::is_overlapping_pair(&read, &alignment));
    }

    #[test]
    fn average_quality() {
        for (qual, expected) in [
            (Vec::<u8>::new(), 0),
            (vec![10, 11, 12], 11),
            (vec![10, 10, 11], 10),
            (vec![10, 10, 12], 10),
            (vec![40; 151], 40),
            (vec![255; 1000], 255),
            (vec![0, 0, 1], 0),
        ] {
            let cigar = if qual.is_empty() { vec![] } else { vec![Cigar::Match(qual.len() as u32)] };
            let read = record(0, 0, Forward, cigar, &qual);
            assert_eq!(super::average_quality(&read), expected, "{:?}", qual);
        }
    }

    #[test]
    fn deterministic() {
        let qual = [10u8, 10, 12].repeat(17);
        let read = record(1000, 1005, Forward, vec![Cigar::Match(45), Cigar::SoftClip(5)], &qual[..50]);
        let alignment = SimpleAlignment::from_read(&read).with_matched_soft_clips();
        let first = (
            super::is_innie_pair(&read),
            is_possible_adapter_pair(&read, false),
            super::is_overlapping_pair(&read, &alignment),
            super::average_quality(&read),
        );
        for _ in 0..10 {
            let next = (
                super::is_innie_pair(&read),
                is_possible_adapter_pair(&read, false),
                super::is_overlapping_pair(&read, &alignment),
                super::average_quality(&read),
            );
            assert_eq!(first, next);
        }
        assert_eq!(first, (true, true, true, 10));
    }
}
