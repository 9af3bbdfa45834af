//! Worked locus scenarios run through `compute_locus_view`.

use locusgraph_core::{
    compute_locus_view, Gene, GeneTagVariant, IndexVariant, LocusData, LocusError, LocusScheme,
    Selection, Study, TagVariant, TagVariantIndexVariantStudy,
};

fn gene(id: &str, tss: u64) -> Gene {
    Gene {
        id: id.to_string(),
        symbol: format!("{id}-symbol"),
        tss,
        start: tss,
        end: tss + 10_000,
        exons: vec![tss, tss + 100, tss + 5_000, tss + 6_000],
    }
}

fn tag(id: &str, position: u64) -> TagVariant {
    TagVariant {
        id: id.to_string(),
        rs_id: Some(format!("rs{position}")),
        position,
    }
}

fn index(id: &str, position: u64) -> IndexVariant {
    IndexVariant {
        id: id.to_string(),
        rs_id: None,
        position,
    }
}

fn study(id: &str, trait_reported: &str) -> Study {
    Study {
        study_id: id.to_string(),
        trait_reported: trait_reported.to_string(),
        pub_author: Some("Author A".to_string()),
        pub_date: Some("2018-01-01".to_string()),
        pub_journal: Some("Nat Genet".to_string()),
        pmid: Some("PMID:1".to_string()),
    }
}

fn gtv(gene: &str, tag: &str, overall_score: f64) -> GeneTagVariant {
    GeneTagVariant {
        gene_id: gene.to_string(),
        tag_variant_id: tag.to_string(),
        overall_score,
    }
}

fn tivs(
    tag: &str,
    index: &str,
    study: &str,
    r2: f64,
    posterior_probability: Option<f64>,
) -> TagVariantIndexVariantStudy {
    TagVariantIndexVariantStudy {
        tag_variant_id: tag.to_string(),
        index_variant_id: index.to_string(),
        study_id: study.to_string(),
        r2: Some(r2),
        pval: Some(5e-8),
        posterior_probability,
    }
}

/// Component A: G1 - T1 - (I1, S1). Component B: G2 - T2 - (I2, S2).
fn two_components() -> LocusData {
    LocusData {
        genes: vec![gene("G1", 1_000_000), gene("G2", 5_000_000)],
        tag_variants: vec![tag("T1", 1_200_000), tag("T2", 900_000)],
        index_variants: vec![index("I1", 1_250_000), index("I2", 800_000)],
        studies: vec![study("S1", "LDL cholesterol"), study("S2", "Height")],
        gene_tag_variants: vec![gtv("G1", "T1", 0.2), gtv("G2", "T2", 0.9)],
        tag_variant_index_variant_studies: vec![
            tivs("T1", "I1", "S1", 0.8, None),
            tivs("T2", "I2", "S2", 0.7, Some(0.5)),
        ],
    }
}

#[test]
fn selecting_a_gene_chains_its_tag_variant() {
    let data = LocusData {
        genes: vec![gene("G1", 100)],
        tag_variants: vec![tag("T1", 150)],
        gene_tag_variants: vec![gtv("G1", "T1", 0.8)],
        ..LocusData::default()
    };
    let selection = Selection::new().with_genes(["G1"]);
    let view = compute_locus_view(LocusScheme::Chained, &data, &selection).unwrap();

    assert_eq!(view.plot.genes.len(), 1);
    assert_eq!(view.plot.tag_variants.len(), 1);
    assert!(view.plot.genes[0].selected);
    assert!(view.plot.genes[0].chained);
    // Reached through the selected edge, not named directly.
    assert!(view.plot.tag_variants[0].chained);
    assert!(!view.plot.tag_variants[0].selected);

    let edge = &view.plot.gene_tag_variants[0];
    assert!(edge.selected);
    assert!(edge.chained);
    assert_eq!(edge.gene_tss, 100);
    assert_eq!(edge.tag_variant_position, 150);

    assert!(!view.is_empty);
    assert!(!view.is_empty_filtered);
    // No tag/index/study edge to join against.
    assert!(view.rows.is_empty());
}

#[test]
fn disjoint_component_is_unchained_and_sorted_first_in_all() {
    let data = two_components();
    let selection = Selection::new().with_studies(["S1"]);

    for scheme in LocusScheme::ALL_SCHEMES {
        let view = compute_locus_view(scheme, &data, &selection).unwrap();
        let plot = &view.plot;
        assert!(plot.genes.iter().filter(|g| g.id == "G2").all(|g| !g.chained));
        assert!(plot.tag_variants.iter().filter(|v| v.id == "T2").all(|v| !v.chained));
        assert!(plot.index_variants.iter().filter(|v| v.id == "I2").all(|v| !v.chained));
        assert!(plot.studies.iter().filter(|s| s.study_id == "S2").all(|s| !s.chained));
    }

    let all = compute_locus_view(LocusScheme::All, &data, &selection).unwrap();
    let tags: Vec<&str> = all.plot.tag_variants.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(tags, vec!["T2", "T1"]);
    let indexes: Vec<&str> = all.plot.index_variants.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(indexes, vec!["I2", "I1"]);
    // B's fine-mapped edge still sorts below A's chained LD-only edge.
    let edges: Vec<&str> = all
        .plot
        .tag_variant_index_variant_studies
        .iter()
        .map(|e| e.study_id.as_str())
        .collect();
    assert_eq!(edges, vec!["S2", "S1"]);
    // Genes and studies keep input order.
    assert_eq!(all.plot.genes[0].id, "G1");
    assert_eq!(all.plot.studies[1].study_id, "S2");
}

#[test]
fn all_genes_keeps_every_gene_but_only_chained_rest() {
    let data = two_components();
    let selection = Selection::new().with_genes(["G1"]);
    let view = compute_locus_view(LocusScheme::AllGenes, &data, &selection).unwrap();

    let genes: Vec<(&str, bool)> = view
        .plot
        .genes
        .iter()
        .map(|g| (g.id.as_str(), g.chained))
        .collect();
    assert_eq!(genes, vec![("G1", true), ("G2", false)]);
    assert_eq!(view.plot.tag_variants.len(), 1);
    assert_eq!(view.plot.tag_variants[0].id, "T1");
    // T1 is only an endpoint, so its tag/index/study edge is not selected.
    assert!(view.plot.tag_variant_index_variant_studies.is_empty());
    assert!(view.plot.index_variants.is_empty());
    assert!(view.plot.studies.is_empty());
}

#[test]
fn finemapped_edge_sorts_after_stronger_ld_edge() {
    let data = LocusData {
        tag_variants: vec![tag("T1", 10), tag("T2", 20)],
        index_variants: vec![index("I1", 30)],
        studies: vec![study("S1", "Asthma")],
        tag_variant_index_variant_studies: vec![
            tivs("T1", "I1", "S1", 0.3, Some(0.6)),
            tivs("T2", "I1", "S1", 0.9, None),
        ],
        ..LocusData::default()
    };
    let view = compute_locus_view(LocusScheme::Chained, &data, &Selection::new()).unwrap();
    let order: Vec<&str> = view
        .plot
        .tag_variant_index_variant_studies
        .iter()
        .map(|e| e.tag_variant_id.as_str())
        .collect();
    assert_eq!(order, vec!["T2", "T1"]);
    assert!(view
        .plot
        .tag_variant_index_variant_studies
        .iter()
        .all(|e| e.chained));
}

#[test]
fn no_edges_is_empty_regardless_of_selection() {
    let data = LocusData {
        genes: vec![gene("G1", 100)],
        tag_variants: vec![tag("T1", 150)],
        ..LocusData::default()
    };
    for selection in [Selection::new(), Selection::new().with_genes(["G1"])] {
        let view = compute_locus_view(LocusScheme::All, &data, &selection).unwrap();
        assert!(view.is_empty);
        assert!(view.is_empty_filtered);
    }
}

#[test]
fn selection_matching_nothing_empties_the_filtered_graph() {
    let data = two_components();
    let selection = Selection::new().with_index_variants(["not-in-window"]);
    let view = compute_locus_view(LocusScheme::Chained, &data, &selection).unwrap();
    assert!(!view.is_empty);
    assert!(view.is_empty_filtered);
    assert!(view.plot.genes.is_empty());
    assert!(view.rows.is_empty());
}

#[test]
fn rows_join_chained_edges_with_labels() {
    let data = two_components();
    let view = compute_locus_view(LocusScheme::All, &data, &Selection::new()).unwrap();
    // Rows follow the sorted gene/tag edges: G1 (0.2) before G2 (0.9).
    let rows: Vec<(&str, &str, &str)> = view
        .rows
        .iter()
        .map(|r| (r.gene_symbol.as_str(), r.index_variant_id.as_str(), r.trait_reported.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("G1-symbol", "I1", "LDL cholesterol"),
            ("G2-symbol", "I2", "Height"),
        ]
    );
    assert_eq!(view.rows[1].posterior_probability, Some(0.5));
    assert_eq!(view.rows[0].tag_variant_rs_id.as_deref(), Some("rs1200000"));
}

#[test]
fn dangling_edge_fails_the_view() {
    let mut data = two_components();
    data.gene_tag_variants.push(gtv("G9", "T1", 0.1));
    let err = compute_locus_view(LocusScheme::All, &data, &Selection::new()).unwrap_err();
    assert!(matches!(err, LocusError::DanglingReference { ref id, .. } if id == "G9"));
    assert_eq!(
        err.to_string(),
        "gene/tag-variant edge references unknown gene 'G9'"
    );
}

#[test]
fn lookups_and_flags_serialize_for_the_renderer() {
    let data = two_components();
    let view = compute_locus_view(LocusScheme::Chained, &data, &Selection::new()).unwrap();
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["scheme"], "CHAINED");
    assert_eq!(json["isEmpty"], false);
    assert_eq!(json["isEmptyFiltered"], false);
    assert_eq!(json["lookups"]["studies"]["S2"]["traitReported"], "Height");
    assert_eq!(json["plot"]["geneTagVariants"][0]["geneTss"], 1_000_000);
    assert_eq!(json["plot"]["genes"][0]["exons"][3], 1_006_000);
    assert_eq!(json["rows"][0]["geneSymbol"], "G1-symbol");
}
