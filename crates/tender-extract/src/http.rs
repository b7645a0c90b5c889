//! Response status handling for the extraction API.

use crate::error::ExtractionError;

/// Pass successful responses through; turn anything else into
/// [`ExtractionError::Api`] carrying the response body.
pub(crate) async fn check_response(
    resp: reqwest::Response,
) -> Result<reqwest::Response, ExtractionError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    Err(ExtractionError::Api {
        status: status.as_u16(),
        message: resp.text().await.unwrap_or_default(),
    })
}
