//! Per-operation fallback policy.
//!
//! The charting client cannot render transport errors: a hard 500 from the
//! feed wedges the chart until reload. So every operation defines, in one
//! place, (1) what counts as a usable upstream answer and (2) the substitute
//! payload owed to the client when no usable answer exists.
//!
//! | operation       | usable answer              | substitute                      |
//! |-----------------|----------------------------|---------------------------------|
//! | config          | 2xx with JSON body         | minimal capability descriptor   |
//! | symbols         | 2xx with JSON body         | placeholder for the ticker      |
//! | search          | any completed exchange     | 502 `{"s":"error",...}`         |
//! | history         | 2xx with JSON body         | `{"s":"no_data"}`               |
//! | time            | any 2xx                    | current Unix seconds, as text   |
//! | timescale_marks | 2xx with JSON body         | `[]`                            |
//!
//! Search is the one operation with no degraded payload: its error bodies are
//! protocol-valid, so completed exchanges forward verbatim and only a failed
//! transport earns the 502 envelope.

use chrono::Utc;
use serde_json::json;

use crate::domain::udf::{ConfigDescriptor, SymbolInfo, UdfOperation, requested_symbol};
use crate::domain::upstream::UpstreamResponse;

/// What the endpoint must serve when the upstream gave no usable answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Substitute {
    /// Protocol-valid degraded payload, served 200.
    Json(serde_json::Value),
    /// Plain-text degraded payload, served 200.
    Text(String),
    /// Error envelope, served 502 Bad Gateway.
    BadGateway(serde_json::Value),
}

/// Whether an upstream answer can be forwarded for this operation.
pub fn usable(op: UdfOperation, response: &UpstreamResponse) -> bool {
    match op {
        UdfOperation::Search => true,
        UdfOperation::Time => response.is_success(),
        UdfOperation::Config
        | UdfOperation::Symbols
        | UdfOperation::History
        | UdfOperation::TimescaleMarks => response.is_success() && response.json().is_some(),
    }
}

/// Substitute payload for a feed call with no usable upstream answer.
/// `params` must already be normalized; symbols reads its ticker from them.
pub fn substitute(op: UdfOperation, params: &[(String, String)]) -> Substitute {
    match op {
        UdfOperation::Config => Substitute::Json(json!(ConfigDescriptor::minimal())),
        UdfOperation::Symbols => {
            Substitute::Json(json!(SymbolInfo::placeholder(requested_symbol(params))))
        }
        UdfOperation::Search => {
            Substitute::BadGateway(json!({"s": "error", "errmsg": "upstream unavailable"}))
        }
        UdfOperation::History => Substitute::Json(json!({"s": "no_data"})),
        UdfOperation::Time => Substitute::Text(Utc::now().timestamp().to_string()),
        UdfOperation::TimescaleMarks => Substitute::Json(json!([])),
    }
}
