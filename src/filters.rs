use serde::Serialize;

use crate::domain::ProjectId;

/// GDC search filter expression. Serializes to the portal's tagged tree
/// shape: `{"op": "in"|"and", "content": ...}`. Field names and value lists
/// must match the portal schema verbatim; a misspelled field does not error,
/// it silently matches nothing.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "op", content = "content", rename_all = "lowercase")]
pub enum Filter {
    In { field: String, value: Vec<String> },
    And(Vec<Filter>),
}

impl Filter {
    /// Leaf predicate: `field` takes one of `values`.
    pub fn field_in<I, S>(field: &str, values: I) -> Filter
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter::In {
            field: field.to_string(),
            value: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Conjunction of `filters`.
    pub fn all_of(filters: Vec<Filter>) -> Filter {
        Filter::And(filters)
    }
}

/// Filter selecting STAR-Counts gene expression files for one TCGA cohort.
pub fn expression_data_filter(project: &ProjectId) -> Filter {
    Filter::all_of(vec![
        Filter::field_in("cases.project.project_id", [project.as_str()]),
        Filter::field_in("cases.project.program.name", ["TCGA"]),
        Filter::field_in("files.analysis.workflow_type", ["STAR - Counts"]),
        Filter::field_in("files.data_category", ["Transcriptome Profiling"]),
        Filter::field_in("files.data_format", ["tsv"]),
        Filter::field_in("files.data_type", ["Gene Expression Quantification"]),
        Filter::field_in("files.experimental_strategy", ["RNA-Seq"]),
    ])
}

/// Filter selecting BCR XML clinical supplement files for one TCGA cohort.
pub fn clinical_data_filter(project: &ProjectId) -> Filter {
    Filter::all_of(vec![
        Filter::field_in("cases.project.project_id", [project.as_str()]),
        Filter::field_in("cases.project.program.name", ["TCGA"]),
        Filter::field_in("files.data_category", ["clinical"]),
        Filter::field_in("files.data_format", ["bcr xml"]),
        Filter::field_in("files.data_type", ["Clinical Supplement"]),
    ])
}
