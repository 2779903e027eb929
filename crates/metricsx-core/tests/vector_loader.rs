//! JSON test vector loader shared by the tree writer tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::Arc;

use serde::Deserialize;

use metricsx_core::{Counter, Metric, MetricRegistry};

#[derive(Debug, Deserialize)]
pub struct TreeVector {
    pub description: String,
    pub metrics: Vec<MetricSpec>,
    pub expect: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MetricSpec {
    Counter { name: String, count: i64 },
    Gauge { name: String, value: serde_json::Value },
    Other { name: String, display: String },
}

impl MetricSpec {
    pub fn register(&self, registry: &MetricRegistry) {
        match self {
            MetricSpec::Counter { name, count } => {
                let c = Arc::new(Counter::new());
                c.inc_by(*count);
                registry.register(name.as_str(), Metric::from(c));
            }
            MetricSpec::Gauge { name, value } => {
                let v = value.as_i64().expect("integer gauge values only");
                registry.gauge(name.as_str(), move || v);
            }
            MetricSpec::Other { name, display } => {
                registry.register(name.as_str(), Metric::other(display.clone()));
            }
        }
    }
}

pub fn load(name: &str) -> TreeVector {
    let s = std::fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}
