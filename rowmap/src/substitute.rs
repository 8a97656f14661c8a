//! Positional `?` placeholder substitution

use crate::error::{Error, Result};
use crate::traits::Escape;
use crate::value::Value;

/// The placeholder token recognised in query text.
pub const PLACEHOLDER: char = '?';

/// Substitute `values` into the `?` placeholders of `query`, left to right.
///
/// Each value is converted to its textual form and escaped with `escaper`;
/// the engine does not add quotes, so string literals are written as `'?'`
/// in the query. `NULL` is inserted bare. Searching resumes after the text
/// just inserted, so a `?` inside a substituted value is never treated as a
/// placeholder.
///
/// Supplying more values than placeholders fails with
/// [`Error::SubstitutionCount`]; supplying fewer leaves the trailing
/// placeholders in place.
///
/// # Example
///
/// ```ignore
/// let sql = substitute("SELECT * FROM users WHERE name = '?'", &["O'Brien".into()], &MySqlEscaper::default())?;
/// assert_eq!(sql, r"SELECT * FROM users WHERE name = 'O\'Brien'");
/// ```
pub fn substitute<E: Escape + ?Sized>(query: &str, values: &[Value], escaper: &E) -> Result<String> {
    if values.is_empty() {
        return Ok(query.to_string());
    }

    let mut out = String::with_capacity(query.len() + values.len() * 8);
    let mut rest = query;

    for (replaced, value) in values.iter().enumerate() {
        let index = rest.find(PLACEHOLDER).ok_or(Error::SubstitutionCount {
            values: values.len(),
            placeholders: replaced,
        })?;
        out.push_str(&rest[..index]);
        match value.to_sql_text() {
            Some(text) => out.push_str(&escaper.escape(&text)),
            None => out.push_str("NULL"),
        }
        rest = &rest[index + PLACEHOLDER.len_utf8()..];
    }

    out.push_str(rest);
    Ok(out)
}
