//! Applies a parameter contract to a decoded payload.

use tunnelapi_core::error::{ApiError, Result};
use tunnelapi_core::protocol::Params;

use crate::config::ApiConfig;

use super::registry::ParamSpec;

/// Check `params` against `specs` in list order and stop at the first failure.
///
/// Every contract parameter is carried as a JSON string; any other shape is
/// a type mismatch even if its text form would pass the validator.
pub fn validate_params(config: &ApiConfig, params: Params<'_>, specs: &[ParamSpec]) -> Result<()> {
    for spec in specs {
        let Some(value) = params.get(spec.name) else {
            if spec.is_optional() {
                continue;
            }
            return Err(ApiError::MissingParam(spec.name.to_string()));
        };

        let value = value
            .as_str()
            .ok_or_else(|| ApiError::TypeMismatch(spec.name.to_string()))?;

        if !(spec.validator)(config, value) {
            return Err(ApiError::InvalidParam(spec.name.to_string()));
        }
    }

    Ok(())
}
