//! Table naming for model types

/// Derive the expected table name for a model type name.
///
/// An underscore is inserted before every uppercase letter except the first
/// character, the result is lowercased, and an `s` is appended unless the
/// name already ends in one. The suffix check is literal, so `Bus` maps to
/// `bus` rather than `buses`.
pub fn table_name(type_name: &str) -> String {
    let mut snake = String::with_capacity(type_name.len() + 4);
    for (i, c) in type_name.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            snake.push('_');
        }
        snake.extend(c.to_lowercase());
    }
    if !snake.ends_with('s') {
        snake.push('s');
    }
    snake
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_name() {
        assert_eq!(table_name("EventTeam"), "event_teams");
        assert_eq!(table_name("Team"), "teams");
        assert_eq!(table_name("User"), "users");
        assert_eq!(table_name("OrderItemDetail"), "order_item_details");
    }

    #[test]
    fn test_table_name_literal_suffix() {
        // no linguistic pluralization: an existing trailing `s` is kept as is
        assert_eq!(table_name("Bus"), "bus");
        assert_eq!(table_name("Status"), "status");
        assert_eq!(table_name("UserSettings"), "user_settings");
    }

    #[test]
    fn test_table_name_consecutive_capitals() {
        assert_eq!(table_name("HTTPLog"), "h_t_t_p_logs");
        assert_eq!(table_name("lowercase"), "lowercases");
    }
}
