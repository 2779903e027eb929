//! Flat JSON rendering.
//!
//! ```json
//! { "jobs.done": { "type": "counter", "count": 3 },
//!   "queue.depth": { "type": "gauge", "value": 7 } }
//! ```

use serde_json::{Map, Value as Json};

use crate::metric::MetricKind;
use crate::registry::Snapshot;

use super::attributes::{attributes_for, VALUE};

pub fn render_json(snapshot: &Snapshot) -> Json {
    let mut root = Map::new();
    for (name, metric) in snapshot {
        let mut obj = Map::new();
        obj.insert("type".to_string(), Json::from(metric.kind().as_str()));
        if metric.kind() == MetricKind::Other {
            obj.insert(VALUE.to_string(), Json::from(metric.to_string()));
        }
        for (label, value) in attributes_for(metric) {
            obj.insert(label.to_string(), value.to_json());
        }
        root.insert(name.clone(), Json::Object(obj));
    }
    Json::Object(root)
}
