//! Autocomplete hints for the input line.

use crate::command::CommandRegistry;

/// Keywords matching the input, in registry order. Blank input has no hints.
pub fn compute_hints(registry: &CommandRegistry, input: &str) -> Vec<String> {
    let normalized = input.trim().to_lowercase();
    if normalized.is_empty() {
        return Vec::new();
    }
    registry
        .prefix_search(&normalized)
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input_has_no_hints() {
        let registry = CommandRegistry::builtin();
        assert!(compute_hints(registry, "").is_empty());
        assert!(compute_hints(registry, "   ").is_empty());
    }

    #[test]
    fn test_hints_ignore_case_and_padding() {
        let registry = CommandRegistry::builtin();
        assert_eq!(compute_hints(registry, " PRO"), vec!["projects"]);
        assert_eq!(compute_hints(registry, "th"), vec!["theme"]);
    }
}
