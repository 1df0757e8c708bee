//! Chart resolution tokens.
//!
//! The upstream backend only understands the canonical tokens `D`, `W` and
//! `M`. Charting clients send a wider dialect: lowercase variants and the
//! day-count spellings `1D`, `1W`, `1M`. Recognized spellings are rewritten
//! to the canonical token; anything else travels to the upstream untouched
//! so new upstream resolutions need no change here.

/// A bar resolution the upstream backend serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Daily,
    Weekly,
    Monthly,
}

impl Resolution {
    pub const ALL: [Resolution; 3] = [Resolution::Daily, Resolution::Weekly, Resolution::Monthly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Daily => "D",
            Resolution::Weekly => "W",
            Resolution::Monthly => "M",
        }
    }

    /// Parse a client-supplied resolution string, accepting the `1D`/`1W`/`1M`
    /// aliases and any letter case. Returns `None` for unrecognized tokens.
    pub fn from_client(raw: &str) -> Option<Resolution> {
        let upper = raw.trim().to_uppercase();
        let token = match upper.strip_prefix('1') {
            Some(rest) if matches!(rest, "D" | "W" | "M") => rest,
            _ => upper.as_str(),
        };
        match token {
            "D" => Some(Resolution::Daily),
            "W" => Some(Resolution::Weekly),
            "M" => Some(Resolution::Monthly),
            _ => None,
        }
    }

    pub fn supported_strings() -> Vec<String> {
        Self::ALL.iter().map(|r| r.as_str().to_string()).collect()
    }
}

/// Rewrite every `resolution` query pair to its canonical token, leaving
/// unrecognized values and all other pairs exactly as received.
pub fn normalize_resolution_params(params: Vec<(String, String)>) -> Vec<(String, String)> {
    params
        .into_iter()
        .map(|(key, value)| {
            if key == "resolution" {
                match Resolution::from_client(&value) {
                    Some(resolution) => (key, resolution.as_str().to_string()),
                    None => (key, value),
                }
            } else {
                (key, value)
            }
        })
        .collect()
}
