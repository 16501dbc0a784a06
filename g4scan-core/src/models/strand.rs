use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::RecordError;

///
/// Strand a motif was predicted on. Motifs on the reverse strand are
/// matched against the forward-strand text using the complementary base.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    /// The base a motif run is built from on this strand: G on `+`, C on `-`.
    pub fn motif_base(&self) -> char {
        match self {
            Strand::Forward => 'G',
            Strand::Reverse => 'C',
        }
    }

    /// Stable index for per-strand state tables.
    pub fn index(&self) -> usize {
        match self {
            Strand::Forward => 0,
            Strand::Reverse => 1,
        }
    }

    pub fn is_reverse(&self) -> bool {
        matches!(self, Strand::Reverse)
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
        }
    }
}

impl FromStr for Strand {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            _ => Err(RecordError::InvalidStrand(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_round_trip() {
        for strand in [Strand::Forward, Strand::Reverse] {
            assert_eq!(strand.to_string().parse::<Strand>().unwrap(), strand);
        }
    }

    #[test]
    fn test_motif_base() {
        assert_eq!(Strand::Forward.motif_base(), 'G');
        assert_eq!(Strand::Reverse.motif_base(), 'C');
    }

    #[test]
    fn test_invalid_strand() {
        assert!(".".parse::<Strand>().is_err());
    }
}
