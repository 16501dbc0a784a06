use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::RecordError;
use crate::models::Strand;

/// Display colour used in the itemRgb column of 12-field records.
pub const ITEM_RGB: &str = "85,118,209";

///
/// Block layout of a 12-field record: one block per tetrad sub-run, loops
/// and bulges are gaps. Starts are offsets relative to the record start.
///
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockLayout {
    pub sizes: Vec<u32>,
    pub starts: Vec<u32>,
}

impl BlockLayout {
    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    /// Total number of bases covered by blocks.
    pub fn covered(&self) -> u32 {
        self.sizes.iter().sum()
    }
}

///
/// G4Record struct, one predicted motif (or one resolved cluster) as a
/// genomic interval. Coordinates are 0-based half-open, `start < end`.
///
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct G4Record {
    pub chrom: String,
    pub start: u32,
    pub end: u32,
    pub name: String,
    pub score: f64,
    pub strand: Strand,
    pub blocks: Option<BlockLayout>,
}

impl G4Record {
    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    /// Check against another half-open interval.
    #[inline]
    pub fn overlaps(&self, start: u32, end: u32) -> bool {
        self.start < end && self.end > start
    }

    ///
    /// Get the 6-field tab-delimited form of the record.
    ///
    pub fn as_bed6(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom, self.start, self.end, self.name, self.score, self.strand
        )
    }

    ///
    /// Get the 12-field tab-delimited form. thickStart/thickEnd repeat
    /// start/end and the colour is a fixed display constant. A record
    /// without block information is written as one full-span block.
    ///
    pub fn as_bed12(&self) -> String {
        let full_span = BlockLayout {
            sizes: vec![self.width()],
            starts: vec![0],
        };
        let blocks = self.blocks.as_ref().unwrap_or(&full_span);
        let sizes = blocks
            .sizes
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let starts = blocks
            .starts
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom,
            self.start,
            self.end,
            self.name,
            self.score,
            self.strand,
            self.start,
            self.end,
            ITEM_RGB,
            blocks.count(),
            sizes,
            starts
        )
    }
}

impl Display for G4Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.blocks {
            Some(_) => write!(f, "{}", self.as_bed12()),
            None => write!(f, "{}", self.as_bed6()),
        }
    }
}

fn parse_field<T: FromStr>(value: &str, field: &'static str) -> Result<T, RecordError> {
    value.parse().map_err(|_| RecordError::FieldParseError {
        field,
        value: value.to_string(),
    })
}

fn parse_u32_list(value: &str, field: &'static str) -> Result<Vec<u32>, RecordError> {
    value
        .trim_end_matches(',')
        .split(',')
        .map(|v| parse_field(v, field))
        .collect()
}

impl TryFrom<&str> for G4Record {
    type Error = RecordError;

    ///
    /// Parse a tab-delimited 6- or 12-field record line.
    ///
    fn try_from(line: &str) -> Result<Self, Self::Error> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 6 {
            return Err(RecordError::TooFewFields(line.to_string()));
        }

        let start: u32 = parse_field(fields[1], "start")?;
        let end: u32 = parse_field(fields[2], "end")?;
        if start >= end {
            return Err(RecordError::EmptyInterval(line.to_string()));
        }

        let blocks = if fields.len() >= 12 {
            Some(BlockLayout {
                sizes: parse_u32_list(fields[10], "blockSizes")?,
                starts: parse_u32_list(fields[11], "blockStarts")?,
            })
        } else {
            None
        };

        Ok(G4Record {
            chrom: fields[0].to_string(),
            start,
            end,
            name: fields[3].to_string(),
            score: parse_field(fields[4], "score")?,
            strand: fields[5].parse()?,
            blocks,
        })
    }
}
