//! Layer merging.

/// Recursively deep-merge `overlay` into `base`.
///
/// - Tables merge recursively per-field.
/// - Scalars and arrays from the overlay **replace** the base value.
pub fn deep_merge(base: &mut toml::Value, overlay: &toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                if let Some(base_val) = base_table.get_mut(key) {
                    deep_merge(base_val, overlay_val);
                } else {
                    base_table.insert(key.clone(), overlay_val.clone());
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> toml::Value {
        toml::from_str(s).unwrap()
    }

    #[test]
    fn test_tables_merge_per_key() {
        let mut base = parse("[approval]\nenabled = true\ntimeout_secs = 30\n");
        deep_merge(&mut base, &parse("[approval]\ntimeout_secs = 10\n"));

        assert_eq!(base["approval"]["enabled"].as_bool(), Some(true));
        assert_eq!(base["approval"]["timeout_secs"].as_integer(), Some(10));
    }

    #[test]
    fn test_arrays_replace() {
        let mut base = parse("[logging]\ndirectives = [\"a=debug\", \"b=warn\"]\n");
        deep_merge(&mut base, &parse("[logging]\ndirectives = [\"c=trace\"]\n"));

        let directives = base["logging"]["directives"].as_array().unwrap();
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0].as_str(), Some("c=trace"));
    }

    #[test]
    fn test_new_keys_are_added() {
        let mut base = parse("[status]\nenabled = true\n");
        deep_merge(&mut base, &parse("[skills]\nenabled = false\n"));
        assert_eq!(base["skills"]["enabled"].as_bool(), Some(false));
        assert_eq!(base["status"]["enabled"].as_bool(), Some(true));
    }
}
