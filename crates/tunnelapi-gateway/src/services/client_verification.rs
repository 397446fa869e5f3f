use tunnelapi_core::error::Result;
use tunnelapi_core::protocol::{Params, RequestName};

use crate::context::ApiContext;
use crate::dispatch::ApiHandler;

/// `client-verification`: the attestation payload is accepted without being
/// checked; only the common parameters are validated. No event is logged.
#[derive(Debug, Default)]
pub struct ClientVerificationHandler;

impl ClientVerificationHandler {
    pub fn new() -> Self {
        Self
    }
}

impl ApiHandler for ClientVerificationHandler {
    fn request(&self) -> RequestName {
        RequestName::ClientVerification
    }

    fn handle(&self, ctx: &ApiContext<'_>, params: Params<'_>) -> Result<Vec<u8>> {
        super::validate_request(ctx, self.request(), params)?;
        Ok(Vec::new())
    }
}
