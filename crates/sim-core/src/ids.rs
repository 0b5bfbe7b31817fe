//! ID prefix constants and format helpers.
//!
//! Persisted aggregates carry opaque ids of the form `{prefix}-{8 hex chars}`
//! (e.g. `sim-a3f8b2c1`), assigned exactly once at insert. User preferences
//! are keyed by the caller-supplied user id instead.

/// Prefix for project ids.
pub const PROJECT: &str = "prj";

/// Prefix for simulation-history entry ids.
pub const HISTORY: &str = "sim";

/// All prefixes assigned by the stores.
pub const ALL_PREFIXES: &[&str] = &[PROJECT, HISTORY];

/// Check whether `id` has the `{prefix}-{8 hex}` shape.
#[must_use]
pub fn is_well_formed(id: &str, prefix: &str) -> bool {
    let Some(rest) = id.strip_prefix(prefix) else {
        return false;
    };
    let Some(hex) = rest.strip_prefix('-') else {
        return false;
    };
    hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_generated_shape() {
        assert!(is_well_formed("sim-a3f8b2c1", HISTORY));
        assert!(is_well_formed("prj-00000001", PROJECT));
    }

    #[test]
    fn rejects_wrong_prefix_or_length() {
        assert!(!is_well_formed("prj-a3f8b2c1", HISTORY));
        assert!(!is_well_formed("sim-a3f8", HISTORY));
        assert!(!is_well_formed("sim-zzzzzzzz", HISTORY));
        assert!(!is_well_formed("sima3f8b2c1", HISTORY));
    }
}
