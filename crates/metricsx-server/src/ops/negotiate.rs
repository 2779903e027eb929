//! `Accept` header negotiation between the JSON map and the YAML tree.

use axum::http::{header::ACCEPT, HeaderMap};

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const YAML_CONTENT_TYPE: &str = "application/yaml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaType {
    #[default]
    Json,
    Yaml,
}

impl MediaType {
    pub fn content_type(self) -> &'static str {
        match self {
            MediaType::Json => JSON_CONTENT_TYPE,
            MediaType::Yaml => YAML_CONTENT_TYPE,
        }
    }

    fn from_range(range: &str) -> Option<Self> {
        let essence = range.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        match essence.as_str() {
            "application/yaml" | "application/x-yaml" | "text/yaml" => Some(MediaType::Yaml),
            "application/json" | "application/*" | "*/*" => Some(MediaType::Json),
            _ => None,
        }
    }
}

/// First recognised media range wins; JSON when nothing is recognised.
///
/// Quality values are not ranked: entries are taken in header order.
pub fn negotiate(headers: &HeaderMap) -> MediaType {
    headers
        .get_all(ACCEPT)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .find_map(MediaType::from_range)
        .unwrap_or_default()
}
