//! Genomic windows.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{LocusError, Result};

/// Half-width of the window opened around a single position.
pub const LINK_HALF_WIDTH: u64 = 1_000_000;

/// GRCh38 chromosome lengths.
const CHROMOSOME_LENGTHS: [(&str, u64); 25] = [
    ("1", 248_956_422),
    ("2", 242_193_529),
    ("3", 198_295_559),
    ("4", 190_214_555),
    ("5", 181_538_259),
    ("6", 170_805_979),
    ("7", 159_345_973),
    ("8", 145_138_636),
    ("9", 138_394_717),
    ("10", 133_797_422),
    ("11", 135_086_622),
    ("12", 133_275_309),
    ("13", 114_364_328),
    ("14", 107_043_718),
    ("15", 101_991_189),
    ("16", 90_338_345),
    ("17", 83_257_441),
    ("18", 80_373_285),
    ("19", 58_617_616),
    ("20", 64_444_167),
    ("21", 46_709_983),
    ("22", 50_818_468),
    ("X", 156_040_895),
    ("Y", 57_227_415),
    ("MT", 16_569),
];

pub fn chromosome_length(chromosome: &str) -> Result<u64> {
    CHROMOSOME_LENGTHS
        .iter()
        .find(|(name, _)| *name == chromosome)
        .map(|(_, length)| *length)
        .ok_or_else(|| LocusError::UnknownChromosome(chromosome.to_string()))
}

/// A window on one chromosome; both ends inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocusWindow {
    pub chromosome: String,
    pub start: u64,
    pub end: u64,
}

impl LocusWindow {
    pub fn new(chromosome: impl Into<String>, start: u64, end: u64) -> Result<Self> {
        if start > end {
            return Err(LocusError::InvalidWindow { start, end });
        }
        Ok(Self {
            chromosome: chromosome.into(),
            start,
            end,
        })
    }

    /// The window opened when linking to a locus from one position:
    /// ±1Mb, clipped to the chromosome.
    pub fn around(chromosome: &str, position: u64) -> Result<Self> {
        let length = chromosome_length(chromosome)?;
        let start = position.saturating_sub(LINK_HALF_WIDTH);
        let end = match length.checked_sub(LINK_HALF_WIDTH) {
            Some(limit) if position <= limit => position + LINK_HALF_WIDTH,
            _ => length - 1,
        };
        Self::new(chromosome, start, end)
    }

    pub fn contains(&self, position: u64) -> bool {
        (self.start..=self.end).contains(&position)
    }

    pub fn width(&self) -> u64 {
        self.end - self.start
    }
}

fn comma_separate(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for LocusWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}",
            self.chromosome,
            comma_separate(self.start),
            comma_separate(self.end)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_with_thousands_separators() {
        let window = LocusWindow::new("1", 109_274_570, 109_834_670).unwrap();
        assert_eq!(window.to_string(), "1:109,274,570-109,834,670");
        assert_eq!(LocusWindow::new("MT", 0, 999).unwrap().to_string(), "MT:0-999");
    }

    #[test]
    fn rejects_reversed_window() {
        assert!(matches!(
            LocusWindow::new("2", 10, 5),
            Err(LocusError::InvalidWindow { start: 10, end: 5 })
        ));
    }

    #[test]
    fn around_clips_to_chromosome_ends() {
        let mid = LocusWindow::around("19", 11_000_000).unwrap();
        assert_eq!((mid.start, mid.end), (10_000_000, 12_000_000));

        let low = LocusWindow::around("19", 500_000).unwrap();
        assert_eq!((low.start, low.end), (0, 1_500_000));

        let high = LocusWindow::around("19", 58_000_000).unwrap();
        assert_eq!((high.start, high.end), (57_000_000, 58_617_615));

        let mito = LocusWindow::around("MT", 300).unwrap();
        assert_eq!((mito.start, mito.end), (0, 16_568));
        assert!(mito.contains(300));
        assert!(!mito.contains(16_569));
    }

    #[test]
    fn unknown_chromosome_is_an_error() {
        assert!(matches!(
            LocusWindow::around("chr1", 10),
            Err(LocusError::UnknownChromosome(name)) if name == "chr1"
        ));
    }
}
