//! Common utilities

use uuid::Uuid;

/// Generate a collection-prefixed record id, e.g. `lf_9f8e...`
pub fn new_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_prefix() {
        let id = new_id("trip");
        assert!(id.starts_with("trip_"));
        // prefix + underscore + 32 hex chars
        assert_eq!(id.len(), "trip_".len() + 32);
    }

    #[test]
    fn test_new_id_unique() {
        assert_ne!(new_id("lf"), new_id("lf"));
    }
}
