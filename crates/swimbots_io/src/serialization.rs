//! JSON and HexDNA helpers for exchanging swimbots and genomes.
//!
//! HexDNA is Base16-encoded JSON. It is the format used to copy a genome out
//! of one run and seed it into another.

use crate::error::{IoError, Result};
use serde::{Deserialize, Serialize};
use swimbots_core::genome::Genome;
use swimbots_data::{CommonGene, SegmentGene, Swimbot, SEGMENT_SLOTS};

/// Heritable part of a swimbot, detached from its state in a pond.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenomeRecord {
    pub common_gene: CommonGene,
    pub segment_genes: [SegmentGene; SEGMENT_SLOTS],
}

impl GenomeRecord {
    #[must_use]
    pub fn of(bot: &Swimbot) -> Self {
        Self {
            common_gene: bot.common_gene,
            segment_genes: bot.segment_genes,
        }
    }

    #[must_use]
    pub fn into_genome(self) -> Genome {
        (self.common_gene, self.segment_genes)
    }
}

impl From<Genome> for GenomeRecord {
    fn from((common_gene, segment_genes): Genome) -> Self {
        Self {
            common_gene,
            segment_genes,
        }
    }
}

pub fn to_json<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string(data)
        .map_err(|e| IoError::serialization(format!("JSON serialization failed: {}", e)))
}

pub fn from_json<T>(json: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    if json.trim().is_empty() {
        return Err(IoError::validation("Empty JSON string"));
    }
    serde_json::from_str(json)
        .map_err(|e| IoError::serialization(format!("JSON deserialization failed: {}", e)))
}

pub fn to_hex_dna<T: Serialize>(data: &T) -> Result<String> {
    Ok(hex::encode(to_json(data)?.as_bytes()))
}

pub fn from_hex_dna<T>(hex_str: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let hex_str = hex_str.trim();
    if hex_str.is_empty() {
        return Err(IoError::validation("Empty hex string"));
    }
    let bytes = hex::decode(hex_str)
        .map_err(|e| IoError::validation(format!("Invalid hex encoding: {}", e)))?;
    let json = String::from_utf8(bytes)
        .map_err(|e| IoError::validation(format!("Invalid UTF-8 in hex: {}", e)))?;
    from_json(&json)
}

/// HexDNA of a swimbot's genome.
pub fn genome_to_hex_dna(bot: &Swimbot) -> Result<String> {
    to_hex_dna(&GenomeRecord::of(bot))
}

/// Parses a genome and checks that it can be expressed.
pub fn genome_from_hex_dna(hex_str: &str) -> Result<Genome> {
    let record: GenomeRecord = from_hex_dna(hex_str)?;
    let segments = record.common_gene.num_segments;
    if segments == 0 || segments > SEGMENT_SLOTS {
        return Err(IoError::validation(format!(
            "genome expresses {} segments, expected 1..={}",
            segments, SEGMENT_SLOTS
        )));
    }
    Ok(record.into_genome())
}
