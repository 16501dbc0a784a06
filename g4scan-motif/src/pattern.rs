use itertools::Itertools;
use regex::{Regex, RegexBuilder};

use g4scan_core::models::Strand;

use crate::errors::ConfigurationError;
use crate::params::{
    BulgeSpec, CANONICAL_TETRADS, LoopSpec, MotifFamily, MotifParams, RunRange,
};

///
/// Semantic role of one capture group. Group `i` of a compiled pattern is
/// described by entry `i` of the pattern's role table, so structural layout
/// is recovered by index instead of by group name.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupRole {
    /// A full, uninterrupted tetrad.
    Tetrad(usize),
    /// The run before the bulge of tetrad `i`.
    BulgePrefix(usize),
    /// The A/T insertion inside tetrad `i`.
    Bulge(usize),
    /// The run after the bulge of tetrad `i`.
    BulgeSuffix(usize),
    /// Inter-tetrad loop, labelled in `+`-strand orientation on both
    /// strands.
    Loop(usize),
}

impl GroupRole {
    /// Whether the group covers tetrad bases and therefore contributes a
    /// block to 12-field output.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            GroupRole::Tetrad(_) | GroupRole::BulgePrefix(_) | GroupRole::BulgeSuffix(_)
        )
    }
}

///
/// Compile-time shape of a pattern: which tetrad length and bulge layout
/// (or run count) it covers. The scanner reads shape instead of re-deriving
/// structure from matched text.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotifShape {
    pub tetrad_len: u32,
    /// 4 for complete motifs, the actual run count for partial ones.
    pub run_count: u32,
    /// Bulge insertion offset per tetrad, 0 = unbulged. Empty for partial
    /// motifs.
    pub bulge_offsets: Vec<u32>,
}

impl MotifShape {
    pub fn bulge_count(&self) -> u32 {
        self.bulge_offsets.iter().filter(|&&off| off != 0).count() as u32
    }

    /// Bit flag of bulged tetrad positions, bit `i` set when tetrad `i`
    /// carries a bulge.
    pub fn bulge_flag(&self) -> u32 {
        self.bulge_offsets
            .iter()
            .enumerate()
            .filter(|(_, &off)| off != 0)
            .map(|(i, _)| 1 << i)
            .sum()
    }
}

///
/// One concrete search pattern plus the metadata needed to interpret its
/// matches.
///
#[derive(Debug, Clone)]
pub struct MotifPattern {
    pub strand: Strand,
    pub regex: Regex,
    pub roles: Vec<GroupRole>,
    pub shape: MotifShape,
}

///
/// Build the full pattern set for a parameter model, `+`-strand patterns
/// first. Fails with a [`ConfigurationError`] before compiling anything if
/// the model is invalid.
///
/// The set size is the dominant cost driver: it grows with the tetrad
/// length range and, for complete motifs, with the number of ways to place
/// up to `max_bulges` bulges over the four tetrads.
///
pub fn compile(params: &MotifParams) -> Result<Vec<MotifPattern>, ConfigurationError> {
    params.validate()?;

    let mut patterns = Vec::new();
    for strand in [Strand::Forward, Strand::Reverse] {
        match params.family {
            MotifFamily::Complete { bulges } => {
                compile_complete(params, &bulges, strand, &mut patterns)?;
            }
            MotifFamily::Partial { runs } => {
                compile_partial(params, &runs, strand, &mut patterns)?;
            }
        }
    }
    Ok(patterns)
}

/// Loop fragments in physical scan order, each keeping its `+`-strand
/// label. On the reverse strand loop `k` is matched as if scanning the
/// complementary strand 5'->3', so the fragment order flips.
fn loop_fragments(loops: &[LoopSpec], strand: Strand) -> Vec<(usize, String)> {
    let mut fragments: Vec<(usize, String)> = loops
        .iter()
        .enumerate()
        .map(|(label, spec)| (label, loop_fragment(spec, strand)))
        .collect();
    if strand.is_reverse() {
        fragments.reverse();
    }
    fragments
}

fn loop_fragment(spec: &LoopSpec, strand: Strand) -> String {
    if spec.allow_g {
        format!("([ACGT]{{{},{}}}?)", spec.min, spec.max)
    } else {
        // the complement of the motif base stays legal in a no-G loop
        let allowed = match strand {
            Strand::Forward => 'C',
            Strand::Reverse => 'G',
        };
        format!("([AT{}]{{{},{}}})", allowed, spec.min, spec.max)
    }
}

fn flat_tetrad(base: char, len: u32) -> String {
    let mut run = String::with_capacity(len as usize + 2);
    run.push('(');
    for _ in 0..len {
        run.push(base);
    }
    run.push(')');
    run
}

fn bulged_tetrad(base: char, offset: u32, len: u32, bulges: &BulgeSpec) -> String {
    format!(
        "({base}{{{}}})([AT]{{{},{}}})({base}{{{}}})",
        offset,
        bulges.min,
        bulges.max,
        len - offset
    )
}

/// Every way to hand a bulge offset (0 = none, else the split point in
/// `[1, t-1]`) to the four tetrads without exceeding the bulge budget.
fn bulge_offset_combinations(tetrad_len: u32, max_bulges: u32) -> Vec<Vec<u32>> {
    let min_flat = (CANONICAL_TETRADS - max_bulges) as usize;
    (0..CANONICAL_TETRADS)
        .map(|_| 0..tetrad_len)
        .multi_cartesian_product()
        .filter(|offsets| offsets.iter().filter(|&&off| off == 0).count() >= min_flat)
        .collect()
}

fn compile_complete(
    params: &MotifParams,
    bulges: &BulgeSpec,
    strand: Strand,
    patterns: &mut Vec<MotifPattern>,
) -> Result<(), ConfigurationError> {
    let base = strand.motif_base();
    let loops = loop_fragments(&params.loops, strand);

    for tetrad_len in params.tetrads.min..=params.tetrads.max {
        for offsets in bulge_offset_combinations(tetrad_len, bulges.max_bulges) {
            let mut pattern = String::new();
            let mut roles = Vec::new();

            for (i, &offset) in offsets.iter().enumerate() {
                if offset == 0 {
                    pattern.push_str(&flat_tetrad(base, tetrad_len));
                    roles.push(GroupRole::Tetrad(i));
                } else {
                    pattern.push_str(&bulged_tetrad(base, offset, tetrad_len, bulges));
                    roles.push(GroupRole::BulgePrefix(i));
                    roles.push(GroupRole::Bulge(i));
                    roles.push(GroupRole::BulgeSuffix(i));
                }
                // no loop after the last tetrad
                if let Some((label, fragment)) = loops.get(i) {
                    pattern.push_str(fragment);
                    roles.push(GroupRole::Loop(*label));
                }
            }

            patterns.push(MotifPattern {
                strand,
                regex: build_regex(&pattern, params.case_sensitive)?,
                roles,
                shape: MotifShape {
                    tetrad_len,
                    run_count: CANONICAL_TETRADS,
                    bulge_offsets: offsets,
                },
            });
        }
    }
    Ok(())
}

fn compile_partial(
    params: &MotifParams,
    runs: &RunRange,
    strand: Strand,
    patterns: &mut Vec<MotifPattern>,
) -> Result<(), ConfigurationError> {
    let base = strand.motif_base();
    let loops = loop_fragments(&params.loops, strand);

    for tetrad_len in params.tetrads.min..=params.tetrads.max {
        let mut pattern = String::new();
        let mut roles = Vec::new();

        // grow the chain one run at a time, snapshotting every run count
        // inside the requested range
        for i in 0..runs.max as usize {
            pattern.push_str(&flat_tetrad(base, tetrad_len));
            roles.push(GroupRole::Tetrad(i));

            let run_count = i as u32 + 1;
            if run_count >= runs.min {
                patterns.push(MotifPattern {
                    strand,
                    regex: build_regex(&pattern, params.case_sensitive)?,
                    roles: roles.clone(),
                    shape: MotifShape {
                        tetrad_len,
                        run_count,
                        bulge_offsets: Vec::new(),
                    },
                });
            }

            match loops.get(i) {
                Some((label, fragment)) => {
                    pattern.push_str(fragment);
                    roles.push(GroupRole::Loop(*label));
                }
                None => break,
            }
        }
    }
    Ok(())
}

fn build_regex(pattern: &str, case_sensitive: bool) -> Result<Regex, ConfigurationError> {
    Ok(RegexBuilder::new(pattern)
        .case_insensitive(!case_sensitive)
        .build()?)
}
