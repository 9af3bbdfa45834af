//! Text rendering of a locus view.

use colored::Colorize;
use locusgraph_core::{LocusRow, LocusView};

fn float(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.3}"))
}

fn pval(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2e}"))
}

fn label(rs_id: &Option<String>, id: &str) -> String {
    rs_id.clone().unwrap_or_else(|| id.to_string())
}

fn row_line(row: &LocusRow) -> String {
    format!(
        "{:<12} {:<14} {:<14} {:<28} {:>6} {:>6} {:>9} {:>6}",
        row.gene_symbol,
        label(&row.tag_variant_rs_id, &row.tag_variant_id),
        label(&row.index_variant_rs_id, &row.index_variant_id),
        row.trait_reported,
        format!("{:.3}", row.overall_score),
        float(row.r2),
        pval(row.pval),
        float(row.posterior_probability),
    )
}

/// Header, one line per row and a summary line.
///
/// Selected rows are bold when `color` is set.
pub fn render_table(view: &LocusView, color: bool) -> String {
    let header = format!(
        "{:<12} {:<14} {:<14} {:<28} {:>6} {:>6} {:>9} {:>6}",
        "gene", "tag variant", "index variant", "trait", "score", "r2", "pval", "pp"
    );
    let mut out = if color {
        header.bold().to_string()
    } else {
        header
    };
    out.push('\n');

    for row in &view.rows {
        let line = row_line(row);
        if color && row.selected {
            out.push_str(&line.green().bold().to_string());
        } else {
            out.push_str(&line);
        }
        out.push('\n');
    }

    let summary = if view.is_empty {
        "no associations in this locus".to_string()
    } else if view.is_empty_filtered {
        "no associations match the selection".to_string()
    } else {
        format!(
            "{} rows; {} genes, {} tag variants, {} index variants, {} studies ({})",
            view.rows.len(),
            view.plot.genes.len(),
            view.plot.tag_variants.len(),
            view.plot.index_variants.len(),
            view.plot.studies.len(),
            view.scheme,
        )
    };
    if color {
        out.push_str(&summary.dimmed().to_string());
    } else {
        out.push_str(&summary);
    }
    out.push('\n');
    out
}
