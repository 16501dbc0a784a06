use itertools::Itertools;
use regex::Captures;

use g4scan_core::models::{BlockLayout, G4Record};

use crate::errors::ConfigurationError;
use crate::params::{MotifFamily, MotifParams};
use crate::pattern::{GroupRole, MotifPattern, compile};

///
/// Applies a compiled pattern set to sequences and turns matches into
/// scored interval records.
///
/// Matches are reported for every possible start position, so overlapping
/// motifs all surface; downstream overlap resolution is a separate,
/// optional step.
///
/// # Example
///
/// ```
/// use g4scan_motif::{G4Scanner, MotifParams};
///
/// let scanner = G4Scanner::new(MotifParams::default()).unwrap();
/// let records = scanner.scan("test", "AAGGGACTGGGATGGGTTTGGGTTT");
/// assert_eq!(records.len(), 1);
/// assert_eq!((records[0].start, records[0].end), (2, 22));
/// assert_eq!(records[0].score, 48.0);
/// ```
#[derive(Debug)]
pub struct G4Scanner {
    params: MotifParams,
    patterns: Vec<MotifPattern>,
}

impl G4Scanner {
    ///
    /// Compile the pattern set for a parameter model. Fails fast on an
    /// invalid model, before any sequence is seen.
    ///
    pub fn new(params: MotifParams) -> Result<Self, ConfigurationError> {
        let patterns = compile(&params)?;
        Ok(G4Scanner { params, patterns })
    }

    pub fn params(&self) -> &MotifParams {
        &self.params
    }

    pub fn patterns(&self) -> &[MotifPattern] {
        &self.patterns
    }

    ///
    /// Scan one sequence with every pattern, `+` strand first, and collect
    /// a record per match. A sequence without motifs yields an empty vec;
    /// non-ACGT characters never match and never raise.
    ///
    pub fn scan(&self, seq_id: &str, seq: &str) -> Vec<G4Record> {
        let mut records = Vec::new();
        for pattern in &self.patterns {
            let mut at = 0;
            while let Some(caps) = pattern.regex.captures_at(seq, at) {
                let start = caps
                    .get(0)
                    .expect("match always has a whole-match group")
                    .start();
                records.push(self.format_match(pattern, &caps, seq_id));
                // resume one base later so overlapping motifs surface too;
                // match starts are ASCII bases, so this stays on a char
                // boundary
                at = start + 1;
            }
        }
        records
    }

    fn format_match(&self, pattern: &MotifPattern, caps: &Captures, seq_id: &str) -> G4Record {
        let whole = caps.get(0).expect("match always has a whole-match group");
        let (start, end) = (whole.start() as u32, whole.end() as u32);
        let length = end - start;
        let shape = &pattern.shape;

        let mut loop_lens = vec![0u32; self.params.loops.len()];
        let mut sizes = Vec::new();
        let mut starts = Vec::new();
        for (i, role) in pattern.roles.iter().enumerate() {
            let group = caps
                .get(i + 1)
                .expect("every group participates in a match");
            match role {
                GroupRole::Loop(label) => loop_lens[*label] = group.len() as u32,
                role if role.is_block() => {
                    starts.push(group.start() as u32 - start);
                    sizes.push(group.len() as u32);
                }
                _ => {} // bulges are gaps
            }
        }

        let tetrad_len = shape.tetrad_len;
        let weights = &self.params.weights;
        let loop_total = (length - tetrad_len * shape.run_count) as f64;
        let (name, score) = match self.params.family {
            MotifFamily::Complete { .. } => {
                let name = format!(
                    "{}t{}b{}l",
                    tetrad_len,
                    shape.bulge_flag(),
                    loop_lens.iter().join(",")
                );
                let score = weights.tetrad_factor * tetrad_len as f64
                    - weights.loop_penalty * loop_total
                    - weights.bulge_penalty * shape.bulge_count() as f64;
                (name, score)
            }
            MotifFamily::Partial { .. } => {
                let name = format!("PG4_{}t_{}", tetrad_len, shape.run_count);
                let score =
                    weights.tetrad_factor * tetrad_len as f64 - weights.loop_penalty * loop_total;
                (name, score)
            }
        };

        G4Record {
            chrom: seq_id.to_string(),
            start,
            end,
            name,
            score,
            strand: pattern.strand,
            blocks: Some(BlockLayout { sizes, starts }),
        }
    }
}
