use thiserror::Error;

/// Failure to decode a graph dataset at the host boundary.
#[derive(Debug, Error)]
pub enum DatasetError {
	#[error("invalid graph dataset: {0}")]
	Json(#[from] serde_json::Error),
}
