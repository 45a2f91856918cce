use askama::Template;
use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
};
use metrics::counter;
use std::collections::HashMap;
use tracing::info;

use radmap_core::export::{DataType, ExportOptions, ExportRequest, OutputFormat};
use radmap_core::reconcile::{reconcile_calls, GenotypeView};

use crate::models::{ExportParams, GenotypePageParams};
use crate::state::AppState;
use crate::templates::{GenotypesTemplate, IndexTemplate, NoGenotypesTemplate};

pub async fn index(State(state): State<AppState>) -> Response {
    match state.storage.batches().await {
        Ok(batches) => {
            let template = IndexTemplate { batches };
            Html(template.render().expect("Template rendering failed")).into_response()
        }
        Err(e) => Html(format!("<h1>Error loading batches: {}</h1>", e)).into_response(),
    }
}

pub async fn genotype_page(
    State(state): State<AppState>,
    Query(params): Query<GenotypePageParams>,
) -> Response {
    counter!("radmap_genotype_page_views_total").increment(1);

    // Grid height is sized from the batch's total sample count, not from
    // how many samples returned a genotype for this locus.
    let sample_count = match state.storage.sample_count(params.batch_id).await {
        Ok(count) => count,
        Err(e) => return Html(format!("<h1>Error loading samples: {}</h1>", e)).into_response(),
    };

    let calls = match state
        .storage
        .locus_calls(params.batch_id, params.tag_id)
        .await
    {
        Ok(calls) => calls,
        Err(e) => {
            return Html(format!("<h1>Error loading genotypes: {}</h1>", e)).into_response()
        }
    };

    match reconcile_calls(&calls) {
        GenotypeView::NoGenotypes => {
            let template = NoGenotypesTemplate;
            Html(template.render().expect("Template rendering failed")).into_response()
        }
        GenotypeView::Rows(rows) => {
            let template = GenotypesTemplate {
                batch_id: params.batch_id,
                tag_id: params.tag_id,
                database: state.database.clone(),
                columns: state.layout.columns(),
                grid_rows: state.layout.row_count(sample_count as usize),
                grid: state.layout.arrange(rows),
            };
            Html(template.render().expect("Template rendering failed")).into_response()
        }
    }
}

pub async fn export_batch(
    State(state): State<AppState>,
    Query(params): Query<ExportParams>,
    Query(raw): Query<HashMap<String, String>>,
) -> Response {
    let request = ExportRequest {
        database: state.database.clone(),
        batch_id: params.id,
        options: ExportOptions {
            data_type: DataType::from_param(&params.dtype),
            map_type: params.mtype.clone(),
            depth_limit: params.dlim,
            manual_corrections: params.mcor > 0,
            format: OutputFormat::from_param(&params.otype),
            email: params.email.clone(),
        },
        filters: collect_filters(&raw),
    };

    if let Err(e) = request.validate() {
        return Html(format!("<h1>Invalid export request: {}</h1>", e)).into_response();
    }

    let loci = match state.storage.locus_count(params.id).await {
        Ok(count) => count,
        Err(e) => return Html(format!("<h1>Error counting loci: {}</h1>", e)).into_response(),
    };

    match state.exporter.submit(&request).await {
        Ok(job) => {
            info!("export job {} submitted for batch {}", job.id, params.id);
            let xml = export_receipt_xml(loci, &params.email, &job.command);
            ([(header::CONTENT_TYPE, "text/xml")], xml).into_response()
        }
        Err(e) => Html(format!("<h1>Error launching export: {}</h1>", e)).into_response(),
    }
}

/// Collect whitelist-checked filter pairs from the raw query string: the
/// `filter_type` parameter lists the active filters, and each filter's
/// value arrives as `filter_<name>`.
fn collect_filters(raw: &HashMap<String, String>) -> Vec<(String, String)> {
    let Some(active) = raw.get("filter_type") else {
        return Vec::new();
    };

    active
        .split(',')
        .filter(|name| !name.is_empty())
        .map(|name| {
            let value = raw
                .get(&format!("filter_{name}"))
                .cloned()
                .unwrap_or_default();
            (name.to_string(), value)
        })
        .collect()
}

/// The acceptance receipt answered to the submitter, before the job runs.
fn export_receipt_xml(loci: i64, email: &str, msg: &str) -> String {
    format!(
        "<?xml version=\"1.0\"?>\n\
         <export>\n\
         <loci>{}</loci>\n\
         <email>{email}</email>\n\
         <msg>{msg}</msg>\n\
         </export>\n",
        number_format(loci)
    )
}

/// Thousands-separated count for the receipt, e.g. 12345 -> "12,345".
fn number_format(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_are_split_and_paired_with_their_values() {
        let raw = HashMap::from([
            ("filter_type".to_string(), "prog,mark".to_string()),
            ("filter_prog".to_string(), "20".to_string()),
            ("filter_mark".to_string(), "lmxll".to_string()),
            ("id".to_string(), "1".to_string()),
        ]);
        let filters = collect_filters(&raw);
        assert_eq!(
            filters,
            vec![
                ("prog".to_string(), "20".to_string()),
                ("mark".to_string(), "lmxll".to_string()),
            ]
        );
    }

    #[test]
    fn missing_filter_type_means_no_filters() {
        assert!(collect_filters(&HashMap::new()).is_empty());
    }

    #[test]
    fn receipt_xml_carries_count_email_and_command() {
        let xml = export_receipt_xml(1234, "jody@example.org", "export_sql.pl -D radtags");
        assert!(xml.contains("<loci>1,234</loci>"));
        assert!(xml.contains("<email>jody@example.org</email>"));
        assert!(xml.contains("<msg>export_sql.pl -D radtags</msg>"));
    }

    #[test]
    fn number_format_groups_thousands() {
        assert_eq!(number_format(0), "0");
        assert_eq!(number_format(999), "999");
        assert_eq!(number_format(1000), "1,000");
        assert_eq!(number_format(1234567), "1,234,567");
    }
}
