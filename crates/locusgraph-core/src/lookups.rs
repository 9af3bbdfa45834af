//! Id → entity indexes over one locus snapshot.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{LocusError, Result};
use crate::model::{Gene, IndexVariant, LocusData, Node, Study, TagVariant};

/// One map per entity type, keyed by primary id.
///
/// Ordered maps keep the serialized form stable between runs. When a
/// response repeats an id the later entity wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocusLookups {
    pub genes: BTreeMap<String, Gene>,
    pub tag_variants: BTreeMap<String, TagVariant>,
    pub index_variants: BTreeMap<String, IndexVariant>,
    pub studies: BTreeMap<String, Study>,
}

fn index_by_id<T: Node + Clone>(items: &[T]) -> BTreeMap<String, T> {
    items
        .iter()
        .map(|item| (item.id().to_string(), item.clone()))
        .collect()
}

fn dangling<T: Node>(id: &str, edge: &'static str) -> LocusError {
    LocusError::DanglingReference {
        edge,
        entity: T::KIND,
        id: id.to_string(),
    }
}

impl LocusLookups {
    pub fn build(data: &LocusData) -> Self {
        Self {
            genes: index_by_id(&data.genes),
            tag_variants: index_by_id(&data.tag_variants),
            index_variants: index_by_id(&data.index_variants),
            studies: index_by_id(&data.studies),
        }
    }

    pub fn gene(&self, id: &str) -> Option<&Gene> {
        self.genes.get(id)
    }

    pub fn tag_variant(&self, id: &str) -> Option<&TagVariant> {
        self.tag_variants.get(id)
    }

    pub fn index_variant(&self, id: &str) -> Option<&IndexVariant> {
        self.index_variants.get(id)
    }

    pub fn study(&self, id: &str) -> Option<&Study> {
        self.studies.get(id)
    }

    pub(crate) fn require_gene(&self, id: &str, edge: &'static str) -> Result<&Gene> {
        self.gene(id).ok_or_else(|| dangling::<Gene>(id, edge))
    }

    pub(crate) fn require_tag_variant(&self, id: &str, edge: &'static str) -> Result<&TagVariant> {
        self.tag_variant(id)
            .ok_or_else(|| dangling::<TagVariant>(id, edge))
    }

    pub(crate) fn require_index_variant(
        &self,
        id: &str,
        edge: &'static str,
    ) -> Result<&IndexVariant> {
        self.index_variant(id)
            .ok_or_else(|| dangling::<IndexVariant>(id, edge))
    }

    pub(crate) fn require_study(&self, id: &str, edge: &'static str) -> Result<&Study> {
        self.study(id).ok_or_else(|| dangling::<Study>(id, edge))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntityKind;

    fn variant(id: &str, position: u64) -> TagVariant {
        TagVariant {
            id: id.to_string(),
            rs_id: None,
            position,
        }
    }

    #[test]
    fn later_duplicate_wins() {
        let data = LocusData {
            tag_variants: vec![variant("T1", 10), variant("T2", 20), variant("T1", 30)],
            ..LocusData::default()
        };
        let lookups = LocusLookups::build(&data);
        assert_eq!(lookups.tag_variants.len(), 2);
        assert_eq!(lookups.tag_variant("T1").map(|v| v.position), Some(30));
    }

    #[test]
    fn missing_id_is_a_dangling_reference() {
        let lookups = LocusLookups::build(&LocusData::default());
        let err = lookups.require_study("GCST1", "tag/index/study").unwrap_err();
        match err {
            LocusError::DanglingReference { edge, entity, id } => {
                assert_eq!(edge, "tag/index/study");
                assert_eq!(entity, EntityKind::Study);
                assert_eq!(id, "GCST1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn required_ids_resolve_through_the_getters() {
        let data = LocusData {
            tag_variants: vec![variant("T1", 10)],
            index_variants: vec![IndexVariant {
                id: "I1".to_string(),
                rs_id: Some("rs1".to_string()),
                position: 12,
            }],
            ..LocusData::default()
        };
        let lookups = LocusLookups::build(&data);
        assert_eq!(
            lookups.require_index_variant("I1", "edge").unwrap(),
            lookups.index_variant("I1").unwrap()
        );
        assert!(lookups.gene("G1").is_none());
        assert!(lookups.study("S1").is_none());
        assert!(matches!(
            lookups.require_gene("G1", "edge"),
            Err(LocusError::DanglingReference {
                entity: EntityKind::Gene,
                ..
            })
        ));
    }
}
