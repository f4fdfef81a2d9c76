use fxsignal_core::AppConfig;
use serde_json::{json, Value};

use crate::error::CliError;

pub fn run(config: &AppConfig) -> Result<Value, CliError> {
    let supported: Vec<Value> = config
        .supported
        .iter()
        .map(|code| {
            json!({
                "code": code,
                "flag": code.flag(),
                "region": code.region(),
            })
        })
        .collect();
    Ok(json!({ "supported": supported }))
}
