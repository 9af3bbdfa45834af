//! Locusgraph: selection-aware views of a genomic locus association graph.
//!
//! A locus response holds genes, tag variants, index variants and studies,
//! joined by gene/tag-variant scores and tag/index/study LD and fine-mapping
//! statistics. Given a user selection, the engine works out which elements
//! are selected and which are chained to the selection, then projects the
//! graph into one of three rendering schemes.
//!
//! ```text
//! LocusData ─► LocusLookups ─► mark_selected ─► enrich ─► FilteredLocus
//!                                                  │            │
//!                                                  └──► propagate_chain ─► assemble ─► LocusView
//! ```
//!
//! The whole pipeline is synchronous and pure: the same data and selection
//! always give the same, identically ordered view.

pub mod chain;
pub mod enrich;
pub mod error;
pub mod filter;
pub mod locus;
pub mod lookups;
pub mod model;
pub mod scheme;
pub mod selection;
pub mod table;

use serde::Serialize;

pub use chain::propagate_chain;
pub use enrich::enrich;
pub use error::{LocusError, Result};
pub use filter::FilteredLocus;
pub use locus::LocusWindow;
pub use lookups::LocusLookups;
pub use model::{
    Chained, ChainedLocus, EnrichedGeneTagVariant, EnrichedLocus,
    EnrichedTagVariantIndexVariantStudy, EntityKind, Gene, GeneTagVariant, IndexVariant,
    LocusData, Selected, Study, TagVariant, TagVariantIndexVariantStudy,
};
pub use scheme::{assemble, Inclusion, LocusScheme, SchemePolicy};
pub use selection::{mark_selected, Selection, SelectionSet};
pub use table::{locus_rows, LocusRow};

/// Everything the rendering layer needs for one locus render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocusView {
    pub scheme: LocusScheme,
    pub plot: ChainedLocus,
    pub rows: Vec<LocusRow>,
    pub lookups: LocusLookups,
    /// The response has no edges at all.
    pub is_empty: bool,
    /// No edges survive the selection filter.
    pub is_empty_filtered: bool,
}

/// Compute the full view for one scheme, data snapshot and selection.
pub fn compute_locus_view(
    scheme: LocusScheme,
    data: &LocusData,
    selection: &Selection,
) -> Result<LocusView> {
    tracing::info!(
        gene_tag_variants = data.gene_tag_variants.len(),
        tag_variant_index_variant_studies = data.tag_variant_index_variant_studies.len(),
        %scheme,
        "rendering locus graph"
    );

    let lookups = LocusLookups::build(data);
    let selection = SelectionSet::from_selection(selection);
    let marked = mark_selected(data, &selection);
    let enriched = enrich(marked, &lookups, &selection)?;
    let filtered = FilteredLocus::compute(&enriched, selection.is_empty());

    let is_empty = data.has_no_edges();
    let is_empty_filtered = filtered.has_no_edges();

    let chained = propagate_chain(enriched, &filtered);
    let rows = locus_rows(&assemble(&chained, LocusScheme::Chained), &lookups)?;
    let plot = assemble(&chained, scheme);

    Ok(LocusView {
        scheme,
        plot,
        rows,
        lookups,
        is_empty,
        is_empty_filtered,
    })
}
