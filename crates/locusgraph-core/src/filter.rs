//! Path filter: the subgraph in scope for the current selection.
//!
//! The result is a set of retained row indices per collection of the
//! enriched graph, held as Roaring bitmaps so the chain propagator can tag
//! the unfiltered graph with one membership test per row.

use ahash::AHashSet;
use roaring::RoaringBitmap;

use crate::model::{EnrichedLocus, IsSelected, Node};

/// Retained rows of each enriched collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredLocus {
    pub genes: RoaringBitmap,
    pub tag_variants: RoaringBitmap,
    pub index_variants: RoaringBitmap,
    pub studies: RoaringBitmap,
    pub gene_tag_variants: RoaringBitmap,
    pub tag_variant_index_variant_studies: RoaringBitmap,
    /// The selection was empty, so nothing was restricted.
    pub unrestricted: bool,
}

fn all_rows(len: usize) -> RoaringBitmap {
    let mut rows = RoaringBitmap::new();
    rows.insert_range(0..len as u32);
    rows
}

fn selected_rows<T: IsSelected>(items: &[T]) -> RoaringBitmap {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.is_selected())
        .map(|(row, _)| row as u32)
        .collect()
}

fn node_rows<T: Node + IsSelected>(items: &[T], endpoints: &AHashSet<&str>) -> RoaringBitmap {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.is_selected() || endpoints.contains(item.id()))
        .map(|(row, _)| row as u32)
        .collect()
}

impl FilteredLocus {
    /// Compute the in-scope subgraph.
    ///
    /// With an empty selection every row is retained. Otherwise an edge is
    /// retained iff it is selected, and a node iff it is selected or an
    /// endpoint of a retained edge.
    pub fn compute(graph: &EnrichedLocus, selection_is_empty: bool) -> Self {
        if selection_is_empty {
            tracing::debug!("empty selection; locus graph left unfiltered");
            return Self {
                genes: all_rows(graph.genes.len()),
                tag_variants: all_rows(graph.tag_variants.len()),
                index_variants: all_rows(graph.index_variants.len()),
                studies: all_rows(graph.studies.len()),
                gene_tag_variants: all_rows(graph.gene_tag_variants.len()),
                tag_variant_index_variant_studies: all_rows(
                    graph.tag_variant_index_variant_studies.len(),
                ),
                unrestricted: true,
            };
        }

        let gene_tag_variants = selected_rows(&graph.gene_tag_variants);
        let tag_variant_index_variant_studies =
            selected_rows(&graph.tag_variant_index_variant_studies);

        let mut gene_ids = AHashSet::new();
        let mut tag_variant_ids = AHashSet::new();
        let mut index_variant_ids = AHashSet::new();
        let mut study_ids = AHashSet::new();
        for row in &gene_tag_variants {
            let edge = &graph.gene_tag_variants[row as usize];
            gene_ids.insert(edge.gene_id.as_str());
            tag_variant_ids.insert(edge.tag_variant_id.as_str());
        }
        for row in &tag_variant_index_variant_studies {
            let edge = &graph.tag_variant_index_variant_studies[row as usize];
            tag_variant_ids.insert(edge.tag_variant_id.as_str());
            index_variant_ids.insert(edge.index_variant_id.as_str());
            study_ids.insert(edge.study_id.as_str());
        }

        let filtered = Self {
            genes: node_rows(&graph.genes, &gene_ids),
            tag_variants: node_rows(&graph.tag_variants, &tag_variant_ids),
            index_variants: node_rows(&graph.index_variants, &index_variant_ids),
            studies: node_rows(&graph.studies, &study_ids),
            gene_tag_variants,
            tag_variant_index_variant_studies,
            unrestricted: false,
        };
        tracing::debug!(
            genes = filtered.genes.len(),
            tag_variants = filtered.tag_variants.len(),
            index_variants = filtered.index_variants.len(),
            studies = filtered.studies.len(),
            gene_tag_variants = filtered.gene_tag_variants.len(),
            tag_variant_index_variant_studies = filtered.tag_variant_index_variant_studies.len(),
            "filtered locus graph to selection"
        );
        filtered
    }

    /// True when no edge of either kind survived filtering.
    pub fn has_no_edges(&self) -> bool {
        self.gene_tag_variants.is_empty() && self.tag_variant_index_variant_studies.is_empty()
    }
}
