//! Scheme assembler: project the chained graph into one rendering scheme.
//!
//! Every scheme is the same projection run with a different [`SchemePolicy`]:
//! which genes are admitted and which of the remaining entities and edges
//! are admitted. Variants and edges are then sorted by composite keys that
//! put chained elements at the strong (last) end.

use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::model::{
    Chained, ChainedLocus, EnrichedGeneTagVariant, EnrichedTagVariantIndexVariantStudy, Positioned,
};

// ============================================================================
// Schemes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocusScheme {
    /// Only the chained subgraph.
    Chained,
    /// Everything, chained elements sorted to the strong end.
    All,
    /// Every gene as track context, everything else chained only.
    #[default]
    AllGenes,
}

impl LocusScheme {
    pub const ALL_SCHEMES: [LocusScheme; 3] =
        [LocusScheme::Chained, LocusScheme::All, LocusScheme::AllGenes];

    /// Numeric scheme codes used by the web client (1, 2, 3).
    ///
    /// Unknown codes fall back to [`LocusScheme::AllGenes`].
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => LocusScheme::Chained,
            2 => LocusScheme::All,
            3 => LocusScheme::AllGenes,
            other => {
                tracing::warn!(code = other, "unknown locus scheme code; using ALL_GENES");
                LocusScheme::AllGenes
            }
        }
    }

    /// Case-insensitive name lookup; unknown names fall back to
    /// [`LocusScheme::AllGenes`].
    pub fn parse_lenient(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "chained" => LocusScheme::Chained,
            "all" => LocusScheme::All,
            "all_genes" => LocusScheme::AllGenes,
            other => match other.parse::<i64>() {
                Ok(code) => Self::from_code(code),
                Err(_) => {
                    tracing::warn!(scheme = name, "unknown locus scheme; using ALL_GENES");
                    LocusScheme::AllGenes
                }
            },
        }
    }

    pub fn policy(self) -> SchemePolicy {
        match self {
            LocusScheme::Chained => SchemePolicy {
                genes: Inclusion::ChainedOnly,
                rest: Inclusion::ChainedOnly,
            },
            LocusScheme::All => SchemePolicy {
                genes: Inclusion::Everything,
                rest: Inclusion::Everything,
            },
            LocusScheme::AllGenes => SchemePolicy {
                genes: Inclusion::Everything,
                rest: Inclusion::ChainedOnly,
            },
        }
    }
}

impl fmt::Display for LocusScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LocusScheme::Chained => "CHAINED",
            LocusScheme::All => "ALL",
            LocusScheme::AllGenes => "ALL_GENES",
        })
    }
}

/// Accepts a name or a numeric code and never fails.
impl<'de> Deserialize<'de> for LocusScheme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Code(i64),
            Name(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Code(code) => LocusScheme::from_code(code),
            Raw::Name(name) => LocusScheme::parse_lenient(&name),
        })
    }
}

// ============================================================================
// Policies
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inclusion {
    ChainedOnly,
    Everything,
}

impl Inclusion {
    pub fn admits(self, chained: bool) -> bool {
        match self {
            Inclusion::ChainedOnly => chained,
            Inclusion::Everything => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemePolicy {
    pub genes: Inclusion,
    /// Variants, studies and both edge kinds.
    pub rest: Inclusion,
}

// ============================================================================
// Orderings
// ============================================================================

/// Chained after unchained, then by position.
pub fn variant_order<T: Positioned>(a: &Chained<T>, b: &Chained<T>) -> Ordering {
    (a.chained, a.position()).cmp(&(b.chained, b.position()))
}

/// Chained after unchained, then by overall score.
pub fn gene_tag_variant_order(
    a: &Chained<EnrichedGeneTagVariant>,
    b: &Chained<EnrichedGeneTagVariant>,
) -> Ordering {
    a.chained
        .cmp(&b.chained)
        .then_with(|| a.overall_score.total_cmp(&b.overall_score))
}

fn evidence_strength(edge: &EnrichedTagVariantIndexVariantStudy) -> f64 {
    let r2 = edge.r2.unwrap_or(0.0);
    if edge.is_finemapped() {
        edge.posterior_probability.unwrap_or(0.0) + r2
    } else {
        r2
    }
}

/// Chained after unchained, fine-mapped after LD-only, then by
/// posterior plus r² (r² alone when not fine-mapped).
pub fn tag_variant_index_variant_study_order(
    a: &Chained<EnrichedTagVariantIndexVariantStudy>,
    b: &Chained<EnrichedTagVariantIndexVariantStudy>,
) -> Ordering {
    (a.chained, a.is_finemapped())
        .cmp(&(b.chained, b.is_finemapped()))
        .then_with(|| evidence_strength(a).total_cmp(&evidence_strength(b)))
}

// ============================================================================
// Assembly
// ============================================================================

fn admit<T: Clone>(items: &[Chained<T>], inclusion: Inclusion) -> Vec<Chained<T>> {
    items
        .iter()
        .filter(|item| inclusion.admits(item.chained))
        .cloned()
        .collect()
}

/// Project `graph` under `policy`.
///
/// Genes and studies keep input order; variants and edges are stably sorted
/// so ties keep input order too.
pub fn project(graph: &ChainedLocus, policy: SchemePolicy) -> ChainedLocus {
    let mut tag_variants = admit(&graph.tag_variants, policy.rest);
    let mut index_variants = admit(&graph.index_variants, policy.rest);
    let mut gene_tag_variants = admit(&graph.gene_tag_variants, policy.rest);
    let mut tag_variant_index_variant_studies =
        admit(&graph.tag_variant_index_variant_studies, policy.rest);

    tag_variants.sort_by(variant_order);
    index_variants.sort_by(variant_order);
    gene_tag_variants.sort_by(gene_tag_variant_order);
    tag_variant_index_variant_studies.sort_by(tag_variant_index_variant_study_order);

    ChainedLocus {
        genes: admit(&graph.genes, policy.genes),
        tag_variants,
        index_variants,
        studies: admit(&graph.studies, policy.rest),
        gene_tag_variants,
        tag_variant_index_variant_studies,
    }
}

pub fn assemble(graph: &ChainedLocus, scheme: LocusScheme) -> ChainedLocus {
    project(graph, scheme.policy())
}
