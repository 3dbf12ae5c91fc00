use termfolio_core::command::CommandRegistry;

/// One `keyword  description` row per command, in registry order.
pub fn rows(registry: &CommandRegistry) -> Vec<String> {
    let width = registry.keywords().map(str::len).max().unwrap_or(0);
    registry
        .commands()
        .iter()
        .map(|command| format!("{:<width$}  {}", command.keyword, command.description))
        .collect()
}

pub fn print() {
    for row in rows(CommandRegistry::builtin()) {
        println!("{}", row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_start_with_help() {
        let rows = rows(CommandRegistry::builtin());
        assert_eq!(rows.len(), 12);
        assert!(rows[0].starts_with("help "));
        assert!(rows.last().unwrap().starts_with("points"));
    }
}
