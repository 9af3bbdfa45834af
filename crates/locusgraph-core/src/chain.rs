//! Chain propagator: merge the filtered subgraph back onto the full graph.
//!
//! Connectivity was already resolved by the path filter, so this is a single
//! membership pass over the retained-row bitmaps.

use roaring::RoaringBitmap;

use crate::filter::FilteredLocus;
use crate::model::{Chained, ChainedLocus, EnrichedLocus};

fn tag<T>(items: Vec<T>, retained: &RoaringBitmap) -> Vec<Chained<T>> {
    items
        .into_iter()
        .enumerate()
        .map(|(row, item)| Chained {
            item,
            chained: retained.contains(row as u32),
        })
        .collect()
}

/// Tag every element of the unfiltered graph with `chained`.
///
/// `filtered` must have been computed from this same `graph`.
pub fn propagate_chain(graph: EnrichedLocus, filtered: &FilteredLocus) -> ChainedLocus {
    ChainedLocus {
        genes: tag(graph.genes, &filtered.genes),
        tag_variants: tag(graph.tag_variants, &filtered.tag_variants),
        index_variants: tag(graph.index_variants, &filtered.index_variants),
        studies: tag(graph.studies, &filtered.studies),
        gene_tag_variants: tag(graph.gene_tag_variants, &filtered.gene_tag_variants),
        tag_variant_index_variant_studies: tag(
            graph.tag_variant_index_variant_studies,
            &filtered.tag_variant_index_variant_studies,
        ),
    }
}
