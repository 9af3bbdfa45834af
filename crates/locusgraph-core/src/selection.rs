//! User selection and the selection marker.
//!
//! The four id lists come verbatim from the user-facing controls. A missing
//! or empty list means nothing of that type is selected; it never means
//! "everything of that type".

use ahash::AHashSet;
use serde::{Deserialize, Deserializer, Serialize};

use crate::model::{
    Gene, GeneTagVariant, IndexVariant, LocusData, Node, Selected, Study, TagVariant,
    TagVariantIndexVariantStudy,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Option::is_none")]
    pub selected_genes: Option<Vec<String>>,
    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Option::is_none")]
    pub selected_tag_variants: Option<Vec<String>>,
    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Option::is_none")]
    pub selected_index_variants: Option<Vec<String>>,
    #[serde(default, deserialize_with = "one_or_many", skip_serializing_if = "Option::is_none")]
    pub selected_studies: Option<Vec<String>>,
}

/// Accept `"id"` as shorthand for `["id"]`.
fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => None,
        Some(OneOrMany::One(id)) => Some(vec![id]),
        Some(OneOrMany::Many(ids)) => Some(ids),
    })
}

fn list_is_empty(list: &Option<Vec<String>>) -> bool {
    list.as_ref().map_or(true, Vec::is_empty)
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genes<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_genes
            .get_or_insert_with(Vec::new)
            .extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_tag_variants<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_tag_variants
            .get_or_insert_with(Vec::new)
            .extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_index_variants<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_index_variants
            .get_or_insert_with(Vec::new)
            .extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_studies<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_studies
            .get_or_insert_with(Vec::new)
            .extend(ids.into_iter().map(Into::into));
        self
    }

    /// True iff all four lists are absent or empty.
    pub fn is_empty(&self) -> bool {
        list_is_empty(&self.selected_genes)
            && list_is_empty(&self.selected_tag_variants)
            && list_is_empty(&self.selected_index_variants)
            && list_is_empty(&self.selected_studies)
    }

    /// Append every id of `other` to this selection.
    pub fn merge(mut self, other: Selection) -> Self {
        if let Some(ids) = other.selected_genes {
            self = self.with_genes(ids);
        }
        if let Some(ids) = other.selected_tag_variants {
            self = self.with_tag_variants(ids);
        }
        if let Some(ids) = other.selected_index_variants {
            self = self.with_index_variants(ids);
        }
        if let Some(ids) = other.selected_studies {
            self = self.with_studies(ids);
        }
        self
    }
}

/// Hashed form of a [`Selection`] for constant-time membership tests.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    pub genes: AHashSet<String>,
    pub tag_variants: AHashSet<String>,
    pub index_variants: AHashSet<String>,
    pub studies: AHashSet<String>,
}

fn hash_ids(list: &Option<Vec<String>>) -> AHashSet<String> {
    list.iter().flatten().cloned().collect()
}

impl SelectionSet {
    pub fn from_selection(selection: &Selection) -> Self {
        Self {
            genes: hash_ids(&selection.selected_genes),
            tag_variants: hash_ids(&selection.selected_tag_variants),
            index_variants: hash_ids(&selection.selected_index_variants),
            studies: hash_ids(&selection.selected_studies),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
            && self.tag_variants.is_empty()
            && self.index_variants.is_empty()
            && self.studies.is_empty()
    }
}

/// The raw graph with `selected` stamped on every node.
///
/// Edges are still raw; the enricher derives their flags.
#[derive(Debug, Clone)]
pub struct MarkedLocus<'a> {
    pub genes: Vec<Selected<Gene>>,
    pub tag_variants: Vec<Selected<TagVariant>>,
    pub index_variants: Vec<Selected<IndexVariant>>,
    pub studies: Vec<Selected<Study>>,
    pub gene_tag_variants: &'a [GeneTagVariant],
    pub tag_variant_index_variant_studies: &'a [TagVariantIndexVariantStudy],
}

fn mark<T: Node + Clone>(items: &[T], ids: &AHashSet<String>) -> Vec<Selected<T>> {
    items
        .iter()
        .map(|item| Selected {
            selected: ids.contains(item.id()),
            item: item.clone(),
        })
        .collect()
}

/// Flag every node whose id appears in the matching selection list.
pub fn mark_selected<'a>(data: &'a LocusData, selection: &SelectionSet) -> MarkedLocus<'a> {
    MarkedLocus {
        genes: mark(&data.genes, &selection.genes),
        tag_variants: mark(&data.tag_variants, &selection.tag_variants),
        index_variants: mark(&data.index_variants, &selection.index_variants),
        studies: mark(&data.studies, &selection.studies),
        gene_tag_variants: &data.gene_tag_variants,
        tag_variant_index_variant_studies: &data.tag_variant_index_variant_studies,
    }
}
