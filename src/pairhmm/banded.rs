// Copyright 2020 Johannes Köster.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Banded Viterbi alignment of a target (read) against a truth window that is
//! `BAND_PADDING` bases longer than the target.
//!
//! Scores are PHRED scaled penalties (lower is better): a substitution costs the quality of the
//! target base, opening a gap costs the gap open penalty of the truth position, extending costs
//! the gap extension penalty, and inserted target bases additionally pay the insertion bias.
//! The alignment may start at any of the first `BAND_PADDING + 1` truth positions and may leave
//! trailing truth bases unaligned.

use bio::alignment::AlignmentOperation;

pub(crate) const BAND_PADDING: usize = 15;
pub(crate) const BAND_WIDTH: usize = BAND_PADDING + 1;

const INFINITY: i32 = i32::MAX / 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Match,
    Insertion,
    Deletion,
}

/// Result of a banded alignment including the traceback.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct BandedAlignment {
    #[getset(get_copy = "pub")]
    score: i32,
    /// Truth window position of the first aligned base.
    #[getset(get_copy = "pub")]
    first_pos: usize,
    #[getset(get = "pub")]
    operations: Vec<AlignmentOperation>,
}

pub(crate) struct BandedAligner<'a> {
    truth: &'a [u8],
    target: &'a [u8],
    target_qualities: &'a [u8],
    gap_open_penalties: &'a [u8],
    gap_extend: i32,
    insertion_bias: i32,
}

/// Dynamic programming tables, stored row-major over (target position, diagonal).
struct Tables {
    matches: Vec<i32>,
    insertions: Vec<i32>,
    deletions: Vec<i32>,
    traceback: Option<[Vec<State>; 3]>,
}

#[inline]
fn cell(i: usize, d: usize) -> usize {
    i * BAND_WIDTH + d
}

#[inline]
fn best_of(candidates: &[(i32, State)]) -> (i32, State) {
    let mut best = candidates[0];
    for &candidate in &candidates[1..] {
        if candidate.0 < best.0 {
            best = candidate;
        }
    }
    best
}

impl<'a> BandedAligner<'a> {
    /// Expects `truth.len() == target.len() + BAND_PADDING` and qualities/penalties already
    /// saturated.
    pub(crate) fn new(
        truth: &'a [u8],
        target: &'a [u8],
        target_qualities: &'a [u8],
        gap_open_penalties: &'a [u8],
        gap_extend: u8,
        insertion_bias: u8,
    ) -> Self {
        debug_assert_eq!(truth.len(), target.len() + BAND_PADDING);
        debug_assert_eq!(truth.len(), gap_open_penalties.len());
        debug_assert_eq!(target.len(), target_qualities.len());
        BandedAligner {
            truth,
            target,
            target_qualities,
            gap_open_penalties,
            gap_extend: gap_extend as i32,
            insertion_bias: insertion_bias as i32,
        }
    }

    /// Minimal penalty over all alignments within the band.
    pub(crate) fn score(&self) -> i32 {
        let tables = self.fill(false);
        self.best_end(&tables).0
    }

    /// Minimal penalty with the corresponding alignment.
    pub(crate) fn align(&self) -> BandedAlignment {
        let tables = self.fill(true);
        let (score, d, state) = self.best_end(&tables);
        let (first_pos, operations) = self.traceback(&tables, d, state);
        BandedAlignment {
            score,
            first_pos,
            operations,
        }
    }

    #[inline]
    fn is_match(&self, i: usize, j: usize) -> bool {
        let truth_base = self.truth[j];
        truth_base == self.target[i] || truth_base == b'N'
    }

    #[inline]
    fn emission(&self, i: usize, j: usize) -> i32 {
        if self.is_match(i, j) {
            0
        } else {
            self.target_qualities[i] as i32
        }
    }

    #[inline]
    fn gap_open(&self, j: usize) -> i32 {
        self.gap_open_penalties[j.min(self.gap_open_penalties.len() - 1)] as i32
    }

    fn fill(&self, with_traceback: bool) -> Tables {
        let n = self.target.len();
        let size = (n + 1) * BAND_WIDTH;
        let mut tables = Tables {
            matches: vec![INFINITY; size],
            insertions: vec![INFINITY; size],
            deletions: vec![INFINITY; size],
            traceback: if with_traceback {
                Some([
                    vec![State::Match; size],
                    vec![State::Match; size],
                    vec![State::Match; size],
                ])
            } else {
                None
            },
        };

        // free leading truth bases
        for d in 0..BAND_WIDTH {
            tables.matches[cell(0, d)] = 0;
        }

        for i in 1..=n {
            for d in 0..BAND_WIDTH {
                let j = i + d;
                let diagonal = cell(i - 1, d);
                let (best, from) = best_of(&[
                    (tables.matches[diagonal], State::Match),
                    (tables.insertions[diagonal], State::Insertion),
                    (tables.deletions[diagonal], State::Deletion),
                ]);
                tables.matches[cell(i, d)] = best + self.emission(i - 1, j - 1);
                if let Some(traceback) = tables.traceback.as_mut() {
                    traceback[0][cell(i, d)] = from;
                }

                if d + 1 < BAND_WIDTH {
                    let above = cell(i - 1, d + 1);
                    let (best, from) = best_of(&[
                        (tables.matches[above] + self.gap_open(j), State::Match),
                        (tables.insertions[above] + self.gap_extend, State::Insertion),
                    ]);
                    tables.insertions[cell(i, d)] = best + self.insertion_bias;
                    if let Some(traceback) = tables.traceback.as_mut() {
                        traceback[1][cell(i, d)] = from;
                    }
                }
            }
            for d in 1..BAND_WIDTH {
                let j = i + d;
                let left = cell(i, d - 1);
                let (best, from) = best_of(&[
                    (tables.matches[left] + self.gap_open(j - 1), State::Match),
                    (tables.deletions[left] + self.gap_extend, State::Deletion),
                ]);
                tables.deletions[cell(i, d)] = best;
                if let Some(traceback) = tables.traceback.as_mut() {
                    traceback[2][cell(i, d)] = from;
                }
            }
        }

        tables
    }

    /// Best final cell: (score, diagonal, state). Trailing truth bases are free, so the
    /// alignment may end on any diagonal, but never in a deletion.
    fn best_end(&self, tables: &Tables) -> (i32, usize, State) {
        let n = self.target.len();
        if n == 0 {
            return (0, 0, State::Match);
        }
        let mut best = (INFINITY, 0, State::Match);
        for d in 0..BAND_WIDTH {
            let c = cell(n, d);
            if tables.matches[c] < best.0 {
                best = (tables.matches[c], d, State::Match);
            }
            if tables.insertions[c] < best.0 {
                best = (tables.insertions[c], d, State::Insertion);
            }
        }
        best
    }

    fn traceback(
        &self,
        tables: &Tables,
        mut d: usize,
        mut state: State,
    ) -> (usize, Vec<AlignmentOperation>) {
        let traceback = tables
            .traceback
            .as_ref()
            .expect("traceback tables not filled");
        let mut i = self.target.len();
        let mut operations = Vec::with_capacity(i + BAND_PADDING);

        while i > 0 {
            let c = cell(i, d);
            match state {
                State::Match => {
                    operations.push(if self.is_match(i - 1, i + d - 1) {
                        AlignmentOperation::Match
                    } else {
                        AlignmentOperation::Subst
                    });
                    state = traceback[0][c];
                    i -= 1;
                }
                State::Insertion => {
                    operations.push(AlignmentOperation::Ins);
                    state = traceback[1][c];
                    i -= 1;
                    d += 1;
                }
                State::Deletion => {
                    operations.push(AlignmentOperation::Del);
                    state = traceback[2][c];
                    d -= 1;
                }
            }
        }
        operations.reverse();

        (d, operations)
    }
}

/// Penalty of the alignment operations that fall into the flanks of the truth sequence.
///
/// `window_offset` is the position of the aligned truth window in the full truth sequence of
/// length `truth_len`; flank positions are given in full truth coordinates.
#[allow(clippy::too_many_arguments)]
pub(crate) fn flank_score(
    alignment: &BandedAlignment,
    window_offset: usize,
    truth_len: usize,
    target_qualities: &[u8],
    window_gap_open_penalties: &[u8],
    gap_extend: u8,
    insertion_bias: u8,
    lhs_flank_size: usize,
    rhs_flank_size: usize,
) -> i32 {
    let rhs_flank_begin = truth_len.saturating_sub(rhs_flank_size);
    let in_flank = |window_pos: usize| {
        let pos = window_offset + window_pos;
        pos < lhs_flank_size || pos >= rhs_flank_begin
    };
    let gap_open = |window_pos: usize| {
        window_gap_open_penalties[window_pos.min(window_gap_open_penalties.len() - 1)] as i32
    };

    let mut score = 0;
    let mut pos = alignment.first_pos();
    let mut read_pos = 0;
    let mut previous = None;
    for &op in alignment.operations() {
        match op {
            AlignmentOperation::Match => {
                pos += 1;
                read_pos += 1;
            }
            AlignmentOperation::Subst => {
                if in_flank(pos) {
                    score += target_qualities[read_pos] as i32;
                }
                pos += 1;
                read_pos += 1;
            }
            AlignmentOperation::Ins => {
                if in_flank(pos) {
                    score += if previous == Some(AlignmentOperation::Ins) {
                        gap_extend as i32
                    } else {
                        gap_open(pos)
                    } + insertion_bias as i32;
                }
                read_pos += 1;
            }
            AlignmentOperation::Del => {
                if in_flank(pos) {
                    score += if previous == Some(AlignmentOperation::Del) {
                        gap_extend as i32
                    } else {
                        gap_open(pos)
                    };
                }
                pos += 1;
            }
            AlignmentOperation::Xclip(_) | AlignmentOperation::Yclip(_) => {
                unreachable!("bug: banded alignment does not clip")
            }
        }
        previous = Some(op);
    }

    score
}
