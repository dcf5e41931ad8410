use std::path::{Path, PathBuf};

use bulkcancel_exec::executor::{RequestConfig, RequestSpec};

use crate::RequestArgs;

pub const DEFAULT_CONFIG_FILE: &str = "bulkcancel.yaml";

pub fn resolve_config_path(user: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = user {
        return Some(p.to_path_buf());
    }
    let default = PathBuf::from(DEFAULT_CONFIG_FILE);
    default.exists().then_some(default)
}

/// Reads a request config, trying JSON first and YAML second.
pub fn load_request_config(path: &Path) -> Result<RequestConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read request config {}: {e}", path.display()))?;
    if let Ok(v) = serde_json::from_str(&content) {
        return Ok(v);
    }
    serde_yaml::from_str(&content).map_err(|e| {
        format!(
            "request config {} is neither valid JSON nor YAML: {e}",
            path.display()
        )
    })
}

/// Loads the config named by the args (if any) and applies the endpoint override.
pub fn build_request_config(request: &RequestArgs) -> Result<RequestConfig, String> {
    let mut cfg = match resolve_config_path(request.config.as_deref()) {
        Some(path) => load_request_config(&path)?,
        None => RequestConfig::default(),
    };
    if let Some(endpoint) = &request.endpoint {
        cfg.endpoint = Some(endpoint.clone());
    }
    Ok(cfg)
}

pub fn build_request_spec(cfg: &RequestConfig) -> Result<RequestSpec, String> {
    RequestSpec::from_config(cfg).map_err(|e| e.to_string())
}
