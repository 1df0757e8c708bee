//! UDF wire vocabulary.
//!
//! Operation names and response shapes for the Universal Data Feed protocol
//! spoken by the charting client. The structs here are serialized as-is onto
//! the wire, so field names follow the protocol rather than Rust convention.

use serde::Serialize;

use crate::domain::resolution::Resolution;

/// Symbol assumed when the client omits or blanks the `symbol` parameter.
pub const DEFAULT_SYMBOL: &str = "VNINDEX";

/// Query pairs as received from the client, order and duplicates preserved.
pub type QueryPairs = Vec<(String, String)>;

/// The six feed operations this adapter serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UdfOperation {
    Config,
    Symbols,
    Search,
    History,
    Time,
    TimescaleMarks,
}

impl UdfOperation {
    pub const ALL: [UdfOperation; 6] = [
        UdfOperation::Config,
        UdfOperation::Symbols,
        UdfOperation::Search,
        UdfOperation::History,
        UdfOperation::Time,
        UdfOperation::TimescaleMarks,
    ];

    /// Path segment used on both the client-facing route and the upstream URL.
    pub fn wire_name(&self) -> &'static str {
        match self {
            UdfOperation::Config => "config",
            UdfOperation::Symbols => "symbols",
            UdfOperation::Search => "search",
            UdfOperation::History => "history",
            UdfOperation::Time => "time",
            UdfOperation::TimescaleMarks => "timescale_marks",
        }
    }
}

impl std::fmt::Display for UdfOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// Ensure a usable `symbol` pair: trimmed, uppercased, defaulting to
/// [`DEFAULT_SYMBOL`] when the client sent none or an empty value.
pub fn normalize_symbol_params(mut params: QueryPairs) -> QueryPairs {
    match params.iter_mut().find(|(key, _)| key == "symbol") {
        Some((_, value)) => {
            let trimmed = value.trim();
            *value = if trimmed.is_empty() {
                DEFAULT_SYMBOL.to_string()
            } else {
                trimmed.to_uppercase()
            };
        }
        None => params.push(("symbol".to_string(), DEFAULT_SYMBOL.to_string())),
    }
    params
}

/// The `symbol` value carried in a normalized parameter list.
pub fn requested_symbol(params: &[(String, String)]) -> &str {
    params
        .iter()
        .find(|(key, _)| key == "symbol")
        .map(|(_, value)| value.as_str())
        .unwrap_or(DEFAULT_SYMBOL)
}

/// Feed capability descriptor answered on `/tv/config`.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigDescriptor {
    pub supports_search: bool,
    pub supports_group_request: bool,
    pub supports_marks: bool,
    pub supports_timescale_marks: bool,
    pub supports_time: bool,
    pub exchanges: Vec<ExchangeDescriptor>,
    pub symbols_types: Vec<SymbolTypeDescriptor>,
    pub supported_resolutions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExchangeDescriptor {
    pub value: String,
    pub name: String,
    pub desc: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SymbolTypeDescriptor {
    pub name: String,
    pub value: String,
}

impl ConfigDescriptor {
    /// Minimal capabilities the chart can always rely on: server time and the
    /// daily/weekly/monthly resolutions. Everything optional is switched off
    /// so the client never renders controls the degraded feed cannot honor.
    pub fn minimal() -> Self {
        Self {
            supports_search: false,
            supports_group_request: false,
            supports_marks: false,
            supports_timescale_marks: false,
            supports_time: true,
            exchanges: Vec::new(),
            symbols_types: Vec::new(),
            supported_resolutions: Resolution::supported_strings(),
        }
    }
}

/// Instrument descriptor answered on `/tv/symbols`.
#[derive(Debug, Clone, Serialize)]
pub struct SymbolInfo {
    pub name: String,
    pub ticker: String,
    pub description: String,
    #[serde(rename = "type")]
    pub instrument_type: String,
    pub session: String,
    pub timezone: String,
    pub exchange: String,
    pub pricescale: u32,
    pub minmov: u32,
    pub supported_resolutions: Vec<String>,
    pub has_no_volume: bool,
}

impl SymbolInfo {
    /// Descriptor for a ticker the upstream could not describe. Defaults fit
    /// the Ho Chi Minh exchange: its trading session, timezone and two-decimal
    /// price scale. Expects the ticker already normalized.
    pub fn placeholder(ticker: &str) -> Self {
        Self {
            name: ticker.to_string(),
            ticker: ticker.to_string(),
            description: ticker.to_string(),
            instrument_type: "stock".to_string(),
            session: "0900-1500".to_string(),
            timezone: "Asia/Ho_Chi_Minh".to_string(),
            exchange: "HOSE".to_string(),
            pricescale: 100,
            minmov: 1,
            supported_resolutions: vec![Resolution::Daily.as_str().to_string()],
            has_no_volume: false,
        }
    }
}
