/// Reads an environment variable, treating unset, empty and non-UTF-8 values alike.
///
/// This is a thin wrapper around `std::env::var` so that callers never have to
/// tell "set to nothing" apart from "not set".
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn non_empty_var(name: &str) -> Option<String> {
    non_empty(std::env::var(name).ok())
}

/// Normalizes an optional value so that blank strings become `None`.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_treated_as_unset() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("   ".to_string())), None);
        assert_eq!(non_empty(Some("BINANCE".to_string())), Some("BINANCE".to_string()));
    }

    #[test]
    fn unset_variable_reads_as_none() {
        assert_eq!(non_empty_var("SHARED_UTILS_SURELY_UNSET_VARIABLE"), None);
    }
}
