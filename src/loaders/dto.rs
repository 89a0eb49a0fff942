use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadCounts {
    pub loaded: u64,
    /// Rows already present, or whose user could not be found.
    pub skipped: u64,
}

#[derive(Debug, Serialize)]
pub struct LoadResponse {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub counts: LoadCounts,
}

#[derive(Debug, Serialize)]
pub struct DatasetOutcome {
    pub dataset: &'static str,
    pub file: &'static str,
    pub found: bool,
    #[serde(flatten)]
    pub counts: LoadCounts,
}

#[derive(Debug, Serialize)]
pub struct LoadAllResponse {
    pub success: bool,
    pub message: String,
    pub datasets: Vec<DatasetOutcome>,
}
