use std::fmt::{Error, Result, Write as _};

use super::{RecordDataType, RecordField};

/// Format record fields in a readable style:
/// primitive fields are rendered in one line, compound fields are pretty-printed.
/// Nested fields follow the same rule.
pub fn format_record_schema(
    fields: impl AsRef<[RecordField]>,
) -> std::result::Result<String, Error> {
    let mut out = String::new();

    for field in fields.as_ref() {
        format_labeled_type(&field.name, &field.data_type, Some(field.nullable), 0, &mut out)?;
    }

    Ok(out)
}

fn format_labeled_type(
    label: &str,
    data_type: &RecordDataType,
    nullable: Option<bool>,
    indent: usize,
    out: &mut String,
) -> Result {
    let pad = " ".repeat(indent);
    if data_type.is_primitive() {
        write!(out, "{pad}{label}: {{ type: {}", primitive_name(data_type))?;
        if let Some(format) = data_type.format() {
            write!(out, ", format: \"{format}\"")?;
        }
        if let Some(nullable) = nullable {
            write!(out, ", nullable: {nullable}")?;
        }
        writeln!(out, " }}")?;
    } else {
        writeln!(out, "{pad}{label}:")?;
        format_compound_type(data_type, nullable, indent + 4, out)?;
    }
    Ok(())
}

fn format_compound_type(
    data_type: &RecordDataType,
    nullable: Option<bool>,
    indent: usize,
    out: &mut String,
) -> Result {
    let pad = " ".repeat(indent);
    writeln!(out, "{pad}type: {}", data_type.type_name())?;
    if let Some(nullable) = nullable {
        writeln!(out, "{pad}nullable: {nullable}")?;
    }

    match data_type {
        RecordDataType::Record(schema) => {
            writeln!(out, "{pad}fields:")?;
            for child in schema.iter() {
                format_labeled_type(
                    &child.name,
                    &child.data_type,
                    Some(child.nullable),
                    indent + 4,
                    out,
                )?;
            }
        }
        RecordDataType::Array(elem) => format_labeled_type("item", elem, None, indent, out)?,
        RecordDataType::Map(value) => format_labeled_type("value", value, None, indent, out)?,
        _ => unreachable!("{data_type:?} is not a compound type"),
    }

    Ok(())
}

fn primitive_name(data_type: &RecordDataType) -> String {
    match data_type {
        RecordDataType::Decimal { precision, scale } => format!("decimal({precision},{scale})"),
        other => other.type_name().to_string(),
    }
}
