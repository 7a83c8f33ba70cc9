use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::{FileId, ProjectId};
use crate::error::GdcError;
use crate::filters::{Filter, clinical_data_filter, expression_data_filter};

pub const GDC_BASE_URL: &str = "https://api.gdc.cancer.gov";

/// Substring marking projects that belong to the TCGA program.
const PROGRAM_MARKER: &str = "TCGA";

// The portal caps results at the requested page size. These are large enough
// to return every hit in one page for TCGA-scale queries.
const PROJECT_PAGE_SIZE: &str = "2000";
const FILE_PAGE_SIZE: &str = "10000";

const SAMPLE_FIELDS: &str = "cases.samples.sample_id,cases.samples.submitter_id";

pub trait PortalClient: Send + Sync {
    /// Ids of all projects under the TCGA program, in response order.
    fn list_tcga_projects(&self) -> Result<Vec<String>, GdcError>;

    /// Requests a TSV manifest for `file_ids` and writes the body verbatim to
    /// `destination`. A non-200 status is logged and the write skipped; it is
    /// not an error.
    fn generate_manifest(&self, file_ids: &[FileId], destination: &Path) -> Result<(), GdcError>;

    /// Maps each file id to the submitter id of its first case's first sample.
    fn map_files_to_samples(
        &self,
        file_ids: &[FileId],
    ) -> Result<HashMap<String, String>, GdcError>;

    /// Ids of STAR-Counts gene expression files for one cohort.
    fn expression_file_ids(&self, project: &ProjectId) -> Result<Vec<String>, GdcError>;

    /// Ids of BCR XML clinical supplement files for one cohort.
    fn clinical_file_ids(&self, project: &ProjectId) -> Result<Vec<String>, GdcError>;

    /// Downloads `file_ids` as one payload (a tar.gz archive when more than
    /// one id is given). The buffer is returned as-is, without status or
    /// content-type validation.
    fn download_files(&self, file_ids: &[FileId]) -> Result<Vec<u8>, GdcError>;
}

/// Query parameters for the files endpoint. The filter tree is embedded as a
/// JSON string, which is how the portal expects it in both GET query strings
/// and POST bodies.
#[derive(Debug, Clone, Serialize)]
pub struct FilesQuery {
    filters: String,
    fields: String,
    format: String,
    size: String,
}

impl FilesQuery {
    pub fn new(filter: &Filter, fields: &str) -> Result<Self, GdcError> {
        Ok(Self {
            filters: serde_json::to_string(filter)
                .map_err(|err| GdcError::FilterEncode(err.to_string()))?,
            fields: fields.to_string(),
            format: "JSON".to_string(),
            size: FILE_PAGE_SIZE.to_string(),
        })
    }
}

#[derive(Clone)]
pub struct GdcHttpClient {
    client: Client,
    base_url: String,
}

impl GdcHttpClient {
    pub fn new() -> Result<Self, GdcError> {
        Self::with_base_url(GDC_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, GdcError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("gdc-portal/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| GdcError::GdcHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|err| GdcError::GdcHttp(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn handle_status(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, GdcError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response
            .text()
            .unwrap_or_else(|_| "GDC request failed".to_string());
        Err(GdcError::GdcStatus { status, message })
    }

    fn file_ids_for_filter(&self, filter: &Filter) -> Result<Vec<String>, GdcError> {
        let query = FilesQuery::new(filter, "file_id")?;
        let response = self
            .client
            .get(self.endpoint("files"))
            .query(&query)
            .send()
            .map_err(|err| GdcError::GdcHttp(err.to_string()))?;
        let response = Self::handle_status(response)?;
        let raw: Value = response
            .json()
            .map_err(|err| GdcError::GdcHttp(err.to_string()))?;
        Ok(extract_file_ids(&raw))
    }
}

impl PortalClient for GdcHttpClient {
    fn list_tcga_projects(&self) -> Result<Vec<String>, GdcError> {
        let response = self
            .client
            .get(self.endpoint("projects"))
            .query(&[("size", PROJECT_PAGE_SIZE)])
            .send()
            .map_err(|err| GdcError::GdcHttp(err.to_string()))?;
        let response = Self::handle_status(response)?;
        let raw: Value = response
            .json()
            .map_err(|err| GdcError::GdcHttp(err.to_string()))?;
        Ok(extract_project_ids(&raw))
    }

    fn generate_manifest(&self, file_ids: &[FileId], destination: &Path) -> Result<(), GdcError> {
        let response = self
            .client
            .post(self.endpoint("manifest"))
            .header(ACCEPT, "application/tsv")
            .json(&json!({ "ids": file_ids }))
            .send()
            .map_err(|err| GdcError::GdcHttp(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|err| GdcError::GdcHttp(err.to_string()))?;
        write_manifest_body(status, &body, destination)?;
        Ok(())
    }

    fn map_files_to_samples(
        &self,
        file_ids: &[FileId],
    ) -> Result<HashMap<String, String>, GdcError> {
        let filter = Filter::field_in(
            "file_id",
            file_ids.iter().map(|id| id.as_str().to_string()),
        );
        let query = FilesQuery::new(&filter, SAMPLE_FIELDS)?;
        let response = self
            .client
            .post(self.endpoint("files"))
            .json(&query)
            .send()
            .map_err(|err| GdcError::GdcHttp(err.to_string()))?;
        let response = Self::handle_status(response)?;
        let raw: Value = response
            .json()
            .map_err(|err| GdcError::GdcHttp(err.to_string()))?;
        extract_sample_ids(&raw)
    }

    fn expression_file_ids(&self, project: &ProjectId) -> Result<Vec<String>, GdcError> {
        self.file_ids_for_filter(&expression_data_filter(project))
    }

    fn clinical_file_ids(&self, project: &ProjectId) -> Result<Vec<String>, GdcError> {
        self.file_ids_for_filter(&clinical_data_filter(project))
    }

    fn download_files(&self, file_ids: &[FileId]) -> Result<Vec<u8>, GdcError> {
        let response = self
            .client
            .post(self.endpoint("data"))
            .json(&json!({ "ids": file_ids }))
            .send()
            .map_err(|err| GdcError::GdcHttp(err.to_string()))?;
        let bytes = response
            .bytes()
            .map_err(|err| GdcError::GdcHttp(err.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Project ids from a projects-endpoint response, keeping only ids that
/// contain the TCGA program marker.
pub fn extract_project_ids(raw: &Value) -> Vec<String> {
    hits(raw)
        .iter()
        .filter_map(|hit| hit.get("id").and_then(|v| v.as_str()))
        .filter(|id| id.contains(PROGRAM_MARKER))
        .map(|id| id.to_string())
        .collect()
}

/// File ids from a files-endpoint response, in hit order.
pub fn extract_file_ids(raw: &Value) -> Vec<String> {
    hits(raw)
        .iter()
        .filter_map(|hit| hit.get("id").and_then(|v| v.as_str()))
        .map(|id| id.to_string())
        .collect()
}

/// File id → submitter sample id, taking the first case's first sample of
/// each hit. A hit without that nesting is an error rather than a panic;
/// files attached to multiple cases or samples keep only the first.
pub fn extract_sample_ids(raw: &Value) -> Result<HashMap<String, String>, GdcError> {
    let mut mapping = HashMap::new();
    for hit in hits(raw) {
        let file_id = hit
            .get("id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| GdcError::UnexpectedResponse("file hit without id".to_string()))?;
        let submitter_id = hit
            .get("cases")
            .and_then(|v| v.as_array())
            .and_then(|cases| cases.first())
            .and_then(|case| case.get("samples"))
            .and_then(|v| v.as_array())
            .and_then(|samples| samples.first())
            .and_then(|sample| sample.get("submitter_id"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| GdcError::MissingSampleData(file_id.to_string()))?;
        mapping.insert(file_id.to_string(), submitter_id.to_string());
    }
    Ok(mapping)
}

/// Writes a manifest response body to `destination` on status 200. Any other
/// status logs a warning and writes nothing; only the write itself can fail.
pub fn write_manifest_body(status: u16, body: &str, destination: &Path) -> Result<bool, GdcError> {
    if status != 200 {
        tracing::warn!(status, "manifest request failed, skipping write");
        return Ok(false);
    }
    fs::write(destination, body).map_err(|err| {
        GdcError::Filesystem(format!("write manifest {}: {err}", destination.display()))
    })?;
    Ok(true)
}

fn hits(raw: &Value) -> &[Value] {
    raw.get("data")
        .and_then(|v| v.get("hits"))
        .and_then(|v| v.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn files_query_embeds_filter_as_json_string() {
        let filter = Filter::field_in("file_id", ["u1"]);
        let query = FilesQuery::new(&filter, "file_id").unwrap();
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value["fields"], "file_id");
        assert_eq!(value["format"], "JSON");
        assert_eq!(value["size"], "10000");
        let embedded: Value = serde_json::from_str(value["filters"].as_str().unwrap()).unwrap();
        assert_eq!(embedded["op"], "in");
    }

    #[test]
    fn hits_tolerates_missing_structure() {
        assert!(hits(&json!({})).is_empty());
        assert!(hits(&json!({"data": {}})).is_empty());
        assert!(hits(&json!({"data": {"hits": "nope"}})).is_empty());
    }
}
