//! Flat table projection of the chained subgraph.
//!
//! Each row joins one gene/tag-variant edge with one tag/index/study edge
//! through their shared tag variant, carrying display labels instead of ids
//! alone.

use ahash::AHashMap;
use serde::Serialize;

use crate::enrich::{GENE_TAG_VARIANT_EDGE, TAG_INDEX_STUDY_EDGE};
use crate::error::Result;
use crate::lookups::LocusLookups;
use crate::model::{
    Chained, ChainedLocus, EnrichedGeneTagVariant, EnrichedTagVariantIndexVariantStudy,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocusRow {
    pub gene_id: String,
    pub gene_symbol: String,
    pub tag_variant_id: String,
    pub tag_variant_rs_id: Option<String>,
    pub index_variant_id: String,
    pub index_variant_rs_id: Option<String>,
    pub study_id: String,
    pub trait_reported: String,
    pub pub_author: Option<String>,
    pub overall_score: f64,
    pub r2: Option<f64>,
    pub pval: Option<f64>,
    pub posterior_probability: Option<f64>,
    /// Either joined edge touches the selection.
    pub selected: bool,
}

fn row(
    gene_tag_variant: &Chained<EnrichedGeneTagVariant>,
    tag_index_study: &Chained<EnrichedTagVariantIndexVariantStudy>,
    lookups: &LocusLookups,
) -> Result<LocusRow> {
    let gene = lookups.require_gene(&gene_tag_variant.gene_id, GENE_TAG_VARIANT_EDGE)?;
    let tag_variant =
        lookups.require_tag_variant(&gene_tag_variant.tag_variant_id, GENE_TAG_VARIANT_EDGE)?;
    let index_variant =
        lookups.require_index_variant(&tag_index_study.index_variant_id, TAG_INDEX_STUDY_EDGE)?;
    let study = lookups.require_study(&tag_index_study.study_id, TAG_INDEX_STUDY_EDGE)?;

    Ok(LocusRow {
        gene_id: gene.id.clone(),
        gene_symbol: gene.symbol.clone(),
        tag_variant_id: tag_variant.id.clone(),
        tag_variant_rs_id: tag_variant.rs_id.clone(),
        index_variant_id: index_variant.id.clone(),
        index_variant_rs_id: index_variant.rs_id.clone(),
        study_id: study.study_id.clone(),
        trait_reported: study.trait_reported.clone(),
        pub_author: study.pub_author.clone(),
        overall_score: gene_tag_variant.overall_score,
        r2: tag_index_study.r2,
        pval: tag_index_study.pval,
        posterior_probability: tag_index_study.posterior_probability,
        selected: gene_tag_variant.selected || tag_index_study.selected,
    })
}

/// Join the two edge collections of `graph` on tag variant id.
///
/// Rows follow the order of `graph.gene_tag_variants`, then of
/// `graph.tag_variant_index_variant_studies` within one gene edge.
pub fn locus_rows(graph: &ChainedLocus, lookups: &LocusLookups) -> Result<Vec<LocusRow>> {
    let mut by_tag_variant: AHashMap<&str, Vec<&Chained<EnrichedTagVariantIndexVariantStudy>>> =
        AHashMap::new();
    for edge in &graph.tag_variant_index_variant_studies {
        by_tag_variant
            .entry(edge.tag_variant_id.as_str())
            .or_default()
            .push(edge);
    }

    let mut rows = Vec::new();
    for gene_tag_variant in &graph.gene_tag_variants {
        let Some(edges) = by_tag_variant.get(gene_tag_variant.tag_variant_id.as_str()) else {
            continue;
        };
        for tag_index_study in edges {
            rows.push(row(gene_tag_variant, tag_index_study, lookups)?);
        }
    }
    Ok(rows)
}
