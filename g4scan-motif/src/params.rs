use crate::errors::ConfigurationError;

/// Number of tetrads in a complete, intramolecular quadruplex.
pub const CANONICAL_TETRADS: u32 = 4;

///
/// Inclusive bounds on the G-run length of each tetrad.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TetradRange {
    pub min: u32,
    pub max: u32,
}

///
/// One inter-tetrad gap. When `allow_g` is false the motif-defining base
/// (G on `+`, C on `-`) is forbidden inside the loop; all other bases are
/// unrestricted.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSpec {
    pub min: u32,
    pub max: u32,
    pub allow_g: bool,
}

///
/// How many tetrads may carry a single-stranded A/T insertion, and the
/// inclusive length bounds of that insertion.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulgeSpec {
    pub max_bulges: u32,
    pub min: u32,
    pub max: u32,
}

///
/// Inclusive bounds on how many consecutive runs participate in a partial
/// motif.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub tetrad_factor: f64,
    pub loop_penalty: f64,
    pub bulge_penalty: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            tetrad_factor: 20.0,
            loop_penalty: 1.5,
            bulge_penalty: 5.0,
        }
    }
}

///
/// The two motif families. Complete motifs are full four-tetrad
/// quadruplexes and may carry bulges; partial motifs are shorter run
/// chains that could pair intermolecularly, and never carry bulges.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotifFamily {
    Complete { bulges: BulgeSpec },
    Partial { runs: RunRange },
}

///
/// Validated numeric configuration for one motif family.
///
#[derive(Debug, Clone, PartialEq)]
pub struct MotifParams {
    pub tetrads: TetradRange,
    pub loops: Vec<LoopSpec>,
    pub family: MotifFamily,
    pub weights: ScoreWeights,
    pub case_sensitive: bool,
}

impl Default for MotifParams {
    /// Reference defaults for complete motifs: three tetrads of exactly
    /// 3 bases, loops of 1-7 any-base characters, no bulges allowed.
    fn default() -> Self {
        MotifParams {
            tetrads: TetradRange { min: 3, max: 3 },
            loops: vec![
                LoopSpec {
                    min: 1,
                    max: 7,
                    allow_g: true
                };
                3
            ],
            family: MotifFamily::Complete {
                bulges: BulgeSpec {
                    max_bulges: 0,
                    min: 1,
                    max: 5,
                },
            },
            weights: ScoreWeights::default(),
            case_sensitive: false,
        }
    }
}

impl MotifParams {
    /// Reference defaults for partial motifs: 2-3 runs of exactly 3 bases.
    pub fn default_partial() -> Self {
        MotifParams {
            loops: vec![
                LoopSpec {
                    min: 1,
                    max: 7,
                    allow_g: true
                };
                2
            ],
            family: MotifFamily::Partial {
                runs: RunRange { min: 2, max: 3 },
            },
            ..MotifParams::default()
        }
    }

    /// Loop-spec count this parameter model must carry: one per gap, so 3
    /// for complete motifs and `runs.max - 1` for partial ones.
    pub fn expected_loops(&self) -> usize {
        match self.family {
            MotifFamily::Complete { .. } => (CANONICAL_TETRADS - 1) as usize,
            MotifFamily::Partial { runs } => runs.max.saturating_sub(1) as usize,
        }
    }

    ///
    /// Check every range and count invariant, failing before any pattern
    /// is built.
    ///
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.tetrads.min == 0 {
            return Err(ConfigurationError::EmptyTetrad);
        }
        check_range("tetrad", self.tetrads.min, self.tetrads.max)?;

        for spec in &self.loops {
            check_range("loop", spec.min, spec.max)?;
        }

        match self.family {
            MotifFamily::Complete { bulges } => {
                if bulges.max_bulges > CANONICAL_TETRADS {
                    return Err(ConfigurationError::TooManyBulges(bulges.max_bulges));
                }
                check_range("bulge", bulges.min, bulges.max)?;
            }
            MotifFamily::Partial { runs } => {
                if runs.min < 2 {
                    return Err(ConfigurationError::RunCountTooSmall(runs.min));
                }
                check_range("run", runs.min, runs.max)?;
            }
        }

        let expected = self.expected_loops();
        if self.loops.len() != expected {
            return Err(ConfigurationError::LoopCountMismatch {
                expected,
                found: self.loops.len(),
            });
        }

        Ok(())
    }
}

fn check_range(what: &'static str, min: u32, max: u32) -> Result<(), ConfigurationError> {
    if min > max {
        Err(ConfigurationError::InvalidRange { what, min, max })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_defaults_validate() {
        assert!(MotifParams::default().validate().is_ok());
        assert!(MotifParams::default_partial().validate().is_ok());
    }

    #[test]
    fn test_expected_loops() {
        assert_eq!(MotifParams::default().expected_loops(), 3);
        assert_eq!(MotifParams::default_partial().expected_loops(), 2);
    }

    #[rstest]
    fn test_inverted_tetrad_range_is_rejected() {
        let params = MotifParams {
            tetrads: TetradRange { min: 4, max: 3 },
            ..MotifParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigurationError::InvalidRange { what: "tetrad", .. })
        ));
    }

    #[rstest]
    fn test_inverted_loop_range_is_rejected() {
        let mut params = MotifParams::default();
        params.loops[1] = LoopSpec {
            min: 8,
            max: 7,
            allow_g: true,
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigurationError::InvalidRange { what: "loop", .. })
        ));
    }

    #[rstest]
    fn test_loop_count_mismatch_is_rejected() {
        let mut params = MotifParams::default();
        params.loops.pop();
        assert!(matches!(
            params.validate(),
            Err(ConfigurationError::LoopCountMismatch {
                expected: 3,
                found: 2
            })
        ));
    }

    #[rstest]
    fn test_five_bulges_is_rejected() {
        let params = MotifParams {
            family: MotifFamily::Complete {
                bulges: BulgeSpec {
                    max_bulges: 5,
                    min: 1,
                    max: 5,
                },
            },
            ..MotifParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigurationError::TooManyBulges(5))
        ));
    }

    #[rstest]
    fn test_single_run_partial_is_rejected() {
        let mut params = MotifParams::default_partial();
        params.family = MotifFamily::Partial {
            runs: RunRange { min: 1, max: 3 },
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigurationError::RunCountTooSmall(1))
        ));
    }

    #[rstest]
    fn test_zero_length_tetrad_is_rejected() {
        let params = MotifParams {
            tetrads: TetradRange { min: 0, max: 3 },
            ..MotifParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigurationError::EmptyTetrad)
        ));
    }
}
