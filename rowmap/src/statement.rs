//! INSERT and UPDATE generation for models
//!
//! Statements are plain text with every value escaped and single-quoted;
//! executing and committing them is the session's job.

use crate::error::{Error, Result};
use crate::model::{Model, ModelSchema};
use crate::traits::Escape;
use crate::value::Value;

/// Render a value as a quoted, escaped SQL literal, or `NULL`.
fn literal<E: Escape + ?Sized>(value: &Value, escaper: &E) -> String {
    match value.to_sql_text() {
        Some(text) => format!("'{}'", escaper.escape(&text)),
        None => "NULL".to_string(),
    }
}

/// Build `INSERT INTO <table> (<columns>) VALUES (<values>)` for a model.
pub fn build_insert<M: Model, E: Escape + ?Sized>(model: &M, escaper: &E) -> String {
    insert_sql(M::schema(), &model.to_values(), escaper)
}

/// Build `UPDATE <table> SET <assignments> <where>;` for a model.
///
/// `where_clause` is used verbatim and must include the `WHERE` keyword.
/// Without it, or when it is blank, the first primary-key field supplies
/// `WHERE <field> = '<value>'`.
pub fn build_update<M: Model, E: Escape + ?Sized>(
    model: &M,
    where_clause: Option<&str>,
    escaper: &E,
) -> Result<String> {
    update_sql(M::schema(), &model.to_values(), where_clause, escaper)
}

/// Schema-level form of [`build_insert`]; `values` follow field order.
pub fn insert_sql<E: Escape + ?Sized>(schema: &ModelSchema, values: &[Value], escaper: &E) -> String {
    let columns = schema.column_names().collect::<Vec<_>>().join(", ");
    let literals = values
        .iter()
        .map(|v| literal(v, escaper))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        schema.table_name(),
        columns,
        literals
    )
}

/// Schema-level form of [`build_update`]; `values` follow field order.
pub fn update_sql<E: Escape + ?Sized>(
    schema: &ModelSchema,
    values: &[Value],
    where_clause: Option<&str>,
    escaper: &E,
) -> Result<String> {
    let where_clause = match where_clause.filter(|clause| !clause.trim().is_empty()) {
        Some(clause) => clause.to_string(),
        None => primary_key_clause(schema, values, escaper)?,
    };

    let assignments = schema
        .column_names()
        .zip(values)
        .map(|(column, value)| format!("{} = {}", column, literal(value, escaper)))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!(
        "UPDATE {} SET {} {};",
        schema.table_name(),
        assignments,
        where_clause
    ))
}

fn primary_key_clause<E: Escape + ?Sized>(
    schema: &ModelSchema,
    values: &[Value],
    escaper: &E,
) -> Result<String> {
    let (index, field) = schema.primary_key().ok_or(Error::MissingPrimaryKey {
        model: schema.type_name,
    })?;
    // a NULL key cannot select its own row
    let text = values
        .get(index)
        .and_then(Value::to_sql_text)
        .ok_or(Error::NullPrimaryKey {
            model: schema.type_name,
            field: field.name,
        })?;
    Ok(format!("WHERE {} = '{}'", field.name, escaper.escape(&text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mysql::MySqlEscaper;
    use crate::{Model, PrimaryKey};

    #[derive(Debug, Model)]
    struct EventTeam {
        id: PrimaryKey<i64>,
        name: String,
        age: Option<i64>,
    }

    #[derive(Debug, Model)]
    struct Note {
        title: String,
        body: String,
    }

    fn alice() -> EventTeam {
        EventTeam {
            id: PrimaryKey(1),
            name: "Alice".into(),
            age: None,
        }
    }

    #[test]
    fn test_build_insert() {
        let sql = build_insert(&alice(), &MySqlEscaper::default());
        assert_eq!(
            sql,
            "INSERT INTO event_teams (id, name, age) VALUES ('1', 'Alice', NULL)"
        );
    }

    #[test]
    fn test_build_insert_escapes_values() {
        let note = Note {
            title: "it's".into(),
            body: "a\nb".into(),
        };
        let sql = build_insert(&note, &MySqlEscaper::default());
        assert_eq!(sql, r"INSERT INTO notes (title, body) VALUES ('it\'s', 'a\nb')");
    }

    #[test]
    fn test_build_update_uses_primary_key() {
        let mut team = alice();
        team.age = Some(30);
        let sql = build_update(&team, None, &MySqlEscaper::default()).unwrap();
        assert_eq!(
            sql,
            "UPDATE event_teams SET id = '1', name = 'Alice', age = '30' WHERE id = '1';"
        );
    }

    #[test]
    fn test_build_update_with_where_clause() {
        let note = Note {
            title: "t".into(),
            body: "b".into(),
        };
        let sql = build_update(&note, Some("WHERE title = 'old'"), &MySqlEscaper::default()).unwrap();
        assert_eq!(sql, "UPDATE notes SET title = 't', body = 'b' WHERE title = 'old';");
    }

    #[test]
    fn test_build_update_without_primary_key() {
        let note = Note {
            title: "t".into(),
            body: "b".into(),
        };
        let err = build_update(&note, None, &MySqlEscaper::default()).unwrap_err();
        assert!(matches!(err, Error::MissingPrimaryKey { model: "Note" }));
    }

    #[test]
    fn test_first_primary_key_wins() {
        #[derive(Debug, Model)]
        struct Pair {
            left: PrimaryKey<String>,
            right: PrimaryKey<String>,
        }

        let pair = Pair {
            left: PrimaryKey("a".into()),
            right: PrimaryKey("b".into()),
        };
        let sql = build_update(&pair, None, &MySqlEscaper::default()).unwrap();
        assert!(sql.ends_with("WHERE left = 'a';"));
    }

    #[test]
    fn test_blank_where_clause_falls_back_to_primary_key() {
        let escaper = MySqlEscaper::default();
        for clause in ["", "   ", "\n\t"] {
            let sql = build_update(&alice(), Some(clause), &escaper).unwrap();
            assert_eq!(
                sql,
                "UPDATE event_teams SET id = '1', name = 'Alice', age = NULL WHERE id = '1';"
            );
        }

        let note = Note {
            title: "t".into(),
            body: "b".into(),
        };
        let err = build_update(&note, Some(""), &escaper).unwrap_err();
        assert!(matches!(err, Error::MissingPrimaryKey { model: "Note" }));
    }

    #[test]
    fn test_primary_key_value_is_escaped() {
        #[derive(Debug, Model)]
        struct Customer {
            code: PrimaryKey<String>,
            city: String,
        }

        let customer = Customer {
            code: PrimaryKey("O'Brien".into()),
            city: "Cork".into(),
        };
        let sql = build_update(&customer, None, &MySqlEscaper::default()).unwrap();
        assert_eq!(
            sql,
            r"UPDATE customers SET code = 'O\'Brien', city = 'Cork' WHERE code = 'O\'Brien';"
        );
    }

    #[test]
    fn test_null_primary_key_is_rejected() {
        #[derive(Debug, Model)]
        struct Ticket {
            id: Option<PrimaryKey<i64>>,
            subject: String,
        }

        let ticket = Ticket {
            id: None,
            subject: "s".into(),
        };
        let err = build_update(&ticket, None, &MySqlEscaper::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::NullPrimaryKey {
                model: "Ticket",
                field: "id"
            }
        ));

        let sql = build_update(&ticket, Some("WHERE subject = 's'"), &MySqlEscaper::default()).unwrap();
        assert!(sql.ends_with("WHERE subject = 's';"));
    }
}
