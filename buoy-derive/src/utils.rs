//! Utility functions for code generation

/// Convert a snake_case field name to a camelCase property name
///
/// Leading underscores are dropped; the first segment stays lowercase.
pub fn camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize = false;
    for c in s.trim_start_matches('_').chars() {
        if c == '_' {
            capitalize = true;
        } else if capitalize {
            result.extend(c.to_uppercase());
            capitalize = false;
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("created_by"), "createdBy");
        assert_eq!(camel_case("modified_time"), "modifiedTime");
        assert_eq!(camel_case("name"), "name");
        assert_eq!(camel_case("_internal_id"), "internalId");
        assert_eq!(camel_case("a__b"), "aB");
    }
}
