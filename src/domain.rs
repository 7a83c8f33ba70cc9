use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GdcError;

/// Identifier of a study cohort, e.g. `TCGA-BRCA`. Opaque beyond being a
/// non-empty token; the portal is the authority on which ids exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProjectId {
    type Err = GdcError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_string();
        if normalized.is_empty() || normalized.contains(char::is_whitespace) {
            return Err(GdcError::InvalidProjectId(value.to_string()));
        }
        Ok(Self(normalized))
    }
}

/// UUID of one data file, as issued by the portal. Treated as an opaque
/// token; no UUID syntax is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FileId {
    type Err = GdcError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_string();
        if normalized.is_empty() {
            return Err(GdcError::InvalidFileId(value.to_string()));
        }
        Ok(Self(normalized))
    }
}
