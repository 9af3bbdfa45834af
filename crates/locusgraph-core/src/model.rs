//! Locus graph data model.
//!
//! Raw entities and edges arrive exactly as the remote locus service returns
//! them. Each engine stage wraps them instead of mutating them:
//!
//! ```text
//! Gene ──mark──► Selected<Gene> ──chain──► Chained<Selected<Gene>>
//! GeneTagVariant ──enrich──► EnrichedGeneTagVariant ──chain──► Chained<..>
//! ```
//!
//! The wrappers flatten into their payload when serialized, so the rendering
//! layer sees one object per entity carrying `selected` and `chained`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

use crate::error::Result;

// ============================================================================
// Entity kinds
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Gene,
    TagVariant,
    IndexVariant,
    Study,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Gene => "gene",
            EntityKind::TagVariant => "tag variant",
            EntityKind::IndexVariant => "index variant",
            EntityKind::Study => "study",
        };
        f.write_str(name)
    }
}

/// A graph node addressable by its primary id.
pub trait Node {
    const KIND: EntityKind;

    fn id(&self) -> &str;
}

/// A variant placed on the chromosome.
pub trait Positioned {
    fn position(&self) -> u64;
}

// ============================================================================
// Raw entities
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gene {
    pub id: String,
    pub symbol: String,
    /// Transcription start site.
    pub tss: u64,
    pub start: u64,
    pub end: u64,
    /// Flat exon boundaries: `[start0, end0, start1, end1, ...]`.
    #[serde(default)]
    pub exons: Vec<u64>,
}

impl Gene {
    /// Fold the flat boundary list into `(start, end)` pairs.
    ///
    /// A trailing boundary without a partner is dropped instead of being
    /// kept as a one-element exon; it has no end to draw.
    pub fn exon_pairs(&self) -> Vec<(u64, u64)> {
        self.exons
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .collect()
    }
}

impl Node for Gene {
    const KIND: EntityKind = EntityKind::Gene;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagVariant {
    pub id: String,
    #[serde(default)]
    pub rs_id: Option<String>,
    pub position: u64,
}

impl Node for TagVariant {
    const KIND: EntityKind = EntityKind::TagVariant;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Positioned for TagVariant {
    fn position(&self) -> u64 {
        self.position
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexVariant {
    pub id: String,
    #[serde(default)]
    pub rs_id: Option<String>,
    pub position: u64,
}

impl Node for IndexVariant {
    const KIND: EntityKind = EntityKind::IndexVariant;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Positioned for IndexVariant {
    fn position(&self) -> u64 {
        self.position
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Study {
    pub study_id: String,
    pub trait_reported: String,
    #[serde(default)]
    pub pub_author: Option<String>,
    #[serde(default)]
    pub pub_date: Option<String>,
    #[serde(default)]
    pub pub_journal: Option<String>,
    #[serde(default)]
    pub pmid: Option<String>,
}

impl Node for Study {
    const KIND: EntityKind = EntityKind::Study;

    fn id(&self) -> &str {
        &self.study_id
    }
}

// ============================================================================
// Raw edges
// ============================================================================

/// Gene ↔ tag variant functional association.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneTagVariant {
    pub gene_id: String,
    pub tag_variant_id: String,
    pub overall_score: f64,
}

/// Tag variant ↔ index variant ↔ study (LD and fine-mapping statistics).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagVariantIndexVariantStudy {
    pub tag_variant_id: String,
    pub index_variant_id: String,
    pub study_id: String,
    #[serde(default)]
    pub r2: Option<f64>,
    #[serde(default)]
    pub pval: Option<f64>,
    #[serde(default)]
    pub posterior_probability: Option<f64>,
}

impl TagVariantIndexVariantStudy {
    /// True when the edge carries a usable fine-mapping posterior.
    ///
    /// A posterior of exactly zero counts as absent.
    pub fn is_finemapped(&self) -> bool {
        self.posterior_probability.is_some_and(|pp| pp != 0.0)
    }
}

// ============================================================================
// Raw snapshot
// ============================================================================

/// One response of the locus service: every entity and edge in a window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocusData {
    #[serde(default)]
    pub genes: Vec<Gene>,
    #[serde(default)]
    pub tag_variants: Vec<TagVariant>,
    #[serde(default)]
    pub index_variants: Vec<IndexVariant>,
    #[serde(default)]
    pub studies: Vec<Study>,
    #[serde(default)]
    pub gene_tag_variants: Vec<GeneTagVariant>,
    #[serde(default)]
    pub tag_variant_index_variant_studies: Vec<TagVariantIndexVariantStudy>,
}

impl LocusData {
    /// Decode a locus response, with or without the `gecko` envelope.
    ///
    /// A present `gecko` key is always taken as the payload, so a malformed
    /// wrapped response is an error rather than an empty locus.
    pub fn from_json(text: &str) -> Result<Self> {
        let mut value: serde_json::Value = serde_json::from_str(text)?;
        let gecko = value
            .as_object_mut()
            .and_then(|object| object.remove("gecko"));
        Ok(serde_json::from_value(gecko.unwrap_or(value))?)
    }

    /// True when the window has no edges of either kind.
    pub fn has_no_edges(&self) -> bool {
        self.gene_tag_variants.is_empty() && self.tag_variant_index_variant_studies.is_empty()
    }
}

// ============================================================================
// Stage wrappers
// ============================================================================

/// An entity stamped with its selection state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selected<T> {
    #[serde(flatten)]
    pub item: T,
    pub selected: bool,
}

impl<T> Deref for Selected<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.item
    }
}

impl<T: Node> Node for Selected<T> {
    const KIND: EntityKind = T::KIND;

    fn id(&self) -> &str {
        self.item.id()
    }
}

impl<T: Positioned> Positioned for Selected<T> {
    fn position(&self) -> u64 {
        self.item.position()
    }
}

/// An entity or edge tagged with membership in the filtered subgraph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chained<T> {
    #[serde(flatten)]
    pub item: T,
    pub chained: bool,
}

impl<T> Deref for Chained<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.item
    }
}

impl<T: Node> Node for Chained<T> {
    const KIND: EntityKind = T::KIND;

    fn id(&self) -> &str {
        self.item.id()
    }
}

impl<T: Positioned> Positioned for Chained<T> {
    fn position(&self) -> u64 {
        self.item.position()
    }
}

/// Anything that carries a derived `selected` flag.
pub trait IsSelected {
    fn is_selected(&self) -> bool;
}

impl<T> IsSelected for Selected<T> {
    fn is_selected(&self) -> bool {
        self.selected
    }
}

impl<T: IsSelected> IsSelected for Chained<T> {
    fn is_selected(&self) -> bool {
        self.item.is_selected()
    }
}

// ============================================================================
// Enriched edges
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedGeneTagVariant {
    #[serde(flatten)]
    pub edge: GeneTagVariant,
    pub gene_tss: u64,
    pub tag_variant_position: u64,
    pub selected: bool,
}

impl Deref for EnrichedGeneTagVariant {
    type Target = GeneTagVariant;

    fn deref(&self) -> &GeneTagVariant {
        &self.edge
    }
}

impl IsSelected for EnrichedGeneTagVariant {
    fn is_selected(&self) -> bool {
        self.selected
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedTagVariantIndexVariantStudy {
    #[serde(flatten)]
    pub edge: TagVariantIndexVariantStudy,
    pub tag_variant_position: u64,
    pub index_variant_position: u64,
    pub trait_reported: String,
    pub selected: bool,
}

impl Deref for EnrichedTagVariantIndexVariantStudy {
    type Target = TagVariantIndexVariantStudy;

    fn deref(&self) -> &TagVariantIndexVariantStudy {
        &self.edge
    }
}

impl IsSelected for EnrichedTagVariantIndexVariantStudy {
    fn is_selected(&self) -> bool {
        self.selected
    }
}

// ============================================================================
// Stage snapshots
// ============================================================================

/// Every node and edge with positions, scores and `selected` attached.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedLocus {
    pub genes: Vec<Selected<Gene>>,
    pub tag_variants: Vec<Selected<TagVariant>>,
    pub index_variants: Vec<Selected<IndexVariant>>,
    pub studies: Vec<Selected<Study>>,
    pub gene_tag_variants: Vec<EnrichedGeneTagVariant>,
    pub tag_variant_index_variant_studies: Vec<EnrichedTagVariantIndexVariantStudy>,
}


/// The enriched graph with every element tagged `chained`.
///
/// Also the shape of the `plot` projection handed to the rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainedLocus {
    pub genes: Vec<Chained<Selected<Gene>>>,
    pub tag_variants: Vec<Chained<Selected<TagVariant>>>,
    pub index_variants: Vec<Chained<Selected<IndexVariant>>>,
    pub studies: Vec<Chained<Selected<Study>>>,
    pub gene_tag_variants: Vec<Chained<EnrichedGeneTagVariant>>,
    pub tag_variant_index_variant_studies: Vec<Chained<EnrichedTagVariantIndexVariantStudy>>,
}
