//! Graph enricher: denormalize positions onto edges and derive edge selection.
//!
//! An edge is selected when any of its endpoints is selected, so selecting
//! more nodes can only ever select more edges.

use crate::error::Result;
use crate::lookups::LocusLookups;
use crate::model::{EnrichedGeneTagVariant, EnrichedLocus, EnrichedTagVariantIndexVariantStudy};
use crate::selection::{MarkedLocus, SelectionSet};

pub(crate) const GENE_TAG_VARIANT_EDGE: &str = "gene/tag-variant";
pub(crate) const TAG_INDEX_STUDY_EDGE: &str = "tag-variant/index-variant/study";

/// Attach `geneTss`, variant positions and `traitReported` to every edge.
///
/// Fails on the first edge naming an id missing from `lookups`.
pub fn enrich(
    marked: MarkedLocus<'_>,
    lookups: &LocusLookups,
    selection: &SelectionSet,
) -> Result<EnrichedLocus> {
    let gene_tag_variants = marked
        .gene_tag_variants
        .iter()
        .map(|edge| {
            let gene = lookups.require_gene(&edge.gene_id, GENE_TAG_VARIANT_EDGE)?;
            let tag_variant =
                lookups.require_tag_variant(&edge.tag_variant_id, GENE_TAG_VARIANT_EDGE)?;
            Ok(EnrichedGeneTagVariant {
                gene_tss: gene.tss,
                tag_variant_position: tag_variant.position,
                selected: selection.genes.contains(&edge.gene_id)
                    || selection.tag_variants.contains(&edge.tag_variant_id),
                edge: edge.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let tag_variant_index_variant_studies = marked
        .tag_variant_index_variant_studies
        .iter()
        .map(|edge| {
            let tag_variant =
                lookups.require_tag_variant(&edge.tag_variant_id, TAG_INDEX_STUDY_EDGE)?;
            let index_variant =
                lookups.require_index_variant(&edge.index_variant_id, TAG_INDEX_STUDY_EDGE)?;
            let study = lookups.require_study(&edge.study_id, TAG_INDEX_STUDY_EDGE)?;
            Ok(EnrichedTagVariantIndexVariantStudy {
                tag_variant_position: tag_variant.position,
                index_variant_position: index_variant.position,
                trait_reported: study.trait_reported.clone(),
                selected: selection.tag_variants.contains(&edge.tag_variant_id)
                    || selection.index_variants.contains(&edge.index_variant_id)
                    || selection.studies.contains(&edge.study_id),
                edge: edge.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(EnrichedLocus {
        genes: marked.genes,
        tag_variants: marked.tag_variants,
        index_variants: marked.index_variants,
        studies: marked.studies,
        gene_tag_variants,
        tag_variant_index_variant_studies,
    })
}
