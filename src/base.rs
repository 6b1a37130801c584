//! Base webpack configuration
//!
//! The fragment every generated config starts from, before feature rules
//! and user overrides are layered on top. Deliberately minimal: `entry` and
//! `output` are the user's responsibility and their absence is a hard error
//! downstream.

use crate::features::GeneratorContext;
use serde_json::{json, Value};

pub fn base_config(context: &GeneratorContext) -> Value {
    let (mode, devtool) = if context.production {
        ("production", "source-map")
    } else {
        ("development", "inline-source-map")
    };

    json!({
        "mode": mode,
        "devtool": devtool,
        "resolve": {
            "extensions": [".js", ".jsx", ".json"]
        },
        "stats": {
            "children": false
        }
    })
}
