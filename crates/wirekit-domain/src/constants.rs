//! Domain layer constants

/// Prefix marking a contextual key as a primitive parameter name rather than a contract
pub const PRIMITIVE_PARAMETER_PREFIX: char = '$';

/// Default limit on nested resolutions within one call chain
pub const DEFAULT_MAX_BUILD_DEPTH: usize = 64;

/// Build the contextual lookup key for a primitive parameter
pub fn primitive_key(parameter: &str) -> String {
    format!("{PRIMITIVE_PARAMETER_PREFIX}{parameter}")
}
