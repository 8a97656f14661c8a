//! Construction-time validation of supplied field values

use crate::error::{Error, Result};
use crate::model::{FieldValues, ModelSchema};
use crate::value::ValueKind;

/// Check `values` against the declared fields of `schema`.
///
/// Every declared field needs a value unless it is marked
/// `#[model(default)]`. A value must have exactly the declared kind; the
/// only exception is `Null` for an optional field. Names the schema does not
/// declare are ignored.
pub fn validate(schema: &ModelSchema, values: &FieldValues) -> Result<()> {
    if schema.fields.is_empty() {
        return Err(Error::Construction(format!(
            "model {} declares no fields and should not be instantiated directly",
            schema.type_name
        )));
    }

    for field in schema.fields {
        let Some(value) = values.get(field.name) else {
            if field.has_default {
                continue;
            }
            return Err(Error::MissingValue {
                model: schema.type_name,
                field: field.name,
            });
        };

        let actual = value.kind();
        if actual == field.kind || (actual == ValueKind::Null && field.nullable) {
            continue;
        }

        return Err(Error::TypeMismatch {
            model: schema.type_name,
            field: field.name,
            expected: field.kind,
            actual,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldDef;
    use crate::{Model, PrimaryKey};
    use crate::value::Value;

    #[derive(Debug, Model)]
    struct User {
        id: PrimaryKey<i64>,
        name: String,
        age: Option<i64>,
    }

    fn alice() -> FieldValues {
        FieldValues::new().set("id", 1i64).set("name", "Alice")
    }

    #[test]
    fn test_optional_may_be_null() {
        let user = User::from_values(alice().set("age", Value::Null)).unwrap();
        assert_eq!(*user.id, 1);
        assert_eq!(user.name, "Alice");
        assert_eq!(user.age, None);

        let user = User::from_values(alice().set("age", 30i64)).unwrap();
        assert_eq!(user.age, Some(30));
    }

    #[test]
    fn test_missing_value() {
        let values = FieldValues::new().set("id", 1i64).set("age", Value::Null);
        match User::from_values(values) {
            Err(Error::MissingValue { model, field }) => {
                assert_eq!(model, "User");
                assert_eq!(field, "name");
            }
            other => panic!("expected MissingValue, got {other:?}"),
        }

        // an optional field still has to be supplied, even as NULL
        assert!(matches!(
            User::from_values(alice()),
            Err(Error::MissingValue { field: "age", .. })
        ));
    }

    #[test]
    fn test_type_mismatch() {
        let values = alice().set("name", 42i32).set("age", Value::Null);
        match User::from_values(values) {
            Err(Error::TypeMismatch {
                field,
                expected,
                actual,
                ..
            }) => {
                assert_eq!(field, "name");
                assert_eq!(expected, ValueKind::String);
                assert_eq!(actual, ValueKind::I32);
            }
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_primary_key_is_unwrapped_and_not_nullable() {
        let values = alice().set("id", "one").set("age", Value::Null);
        assert!(matches!(
            User::from_values(values),
            Err(Error::TypeMismatch {
                field: "id",
                expected: ValueKind::I64,
                ..
            })
        ));

        let values = alice().set("id", Value::Null).set("age", Value::Null);
        assert!(matches!(
            User::from_values(values),
            Err(Error::TypeMismatch { field: "id", .. })
        ));
    }

    #[test]
    fn test_extra_names_are_ignored() {
        let values = alice().set("age", Value::Null).set("nickname", "Al");
        assert!(User::from_values(values).is_ok());
    }

    #[test]
    fn test_schema_without_fields() {
        static BARE: ModelSchema = ModelSchema {
            type_name: "Model",
            table: None,
            fields: &[],
        };
        assert!(matches!(
            validate(&BARE, &FieldValues::new()),
            Err(Error::Construction(_))
        ));

        static ONE: ModelSchema = ModelSchema {
            type_name: "Tag",
            table: None,
            fields: &[FieldDef {
                name: "label",
                kind: ValueKind::String,
                nullable: false,
                primary_key: false,
                has_default: false,
            }],
        };
        assert!(validate(&ONE, &FieldValues::new().set("label", "x")).is_ok());
    }
}
