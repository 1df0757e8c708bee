//! Upstream gateway port trait.

use async_trait::async_trait;

use crate::domain::error::UpstreamError;
use crate::domain::udf::UdfOperation;
use crate::domain::upstream::UpstreamResponse;

/// One outbound call to the stock-data backend per feed operation.
///
/// Implementations make exactly one attempt: no retries, no internal
/// fallback. A completed HTTP exchange is `Ok` whatever its status code;
/// `Err` means the exchange itself failed (connect, timeout, read).
#[async_trait]
pub trait UpstreamPort {
    async fn fetch(
        &self,
        op: UdfOperation,
        params: &[(String, String)],
    ) -> Result<UpstreamResponse, UpstreamError>;
}
