//! Column-type grammar implemented with nom parser combinators.
//!
//! Accepts the list form used by the `columns.types` table property:
//! types separated by `,`, `:` or `;`, e.g.
//! `int,string,array<map<string,bigint>>,struct<a:int,b:varchar(20)>`.
//! Keywords are case-insensitive and whitespace between tokens is ignored.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, tag_no_case},
    character::complete::{alpha1, alphanumeric1, char, digit1, multispace0, multispace1, one_of},
    combinator::{map, map_res, opt, recognize, value},
    error::{Error, ErrorKind},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
};

use super::types::{
    DEFAULT_DECIMAL_PRECISION, DEFAULT_DECIMAL_SCALE, MAX_CHAR_LENGTH, MAX_DECIMAL_PRECISION,
    MAX_VARCHAR_LENGTH, PrimitiveType, StructField, TypeInfo,
};
use crate::error::ConfigError;

/// Parse a column-type property into one [`TypeInfo`] per column.
///
/// An empty or blank input yields an empty list.
pub fn parse_type_list(input: &str) -> Result<Vec<TypeInfo>, ConfigError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    let types = match type_list(input) {
        Ok((remaining, types)) if remaining.is_empty() => types,
        Ok((remaining, _)) => {
            return Err(type_parse_error(
                input,
                format!("unexpected trailing characters: {remaining:?}"),
            ));
        }
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => {
            return Err(type_parse_error(
                input,
                format!("unexpected input at {:?}", e.input),
            ));
        }
        Err(nom::Err::Incomplete(_)) => {
            return Err(type_parse_error(input, "incomplete type string".to_string()));
        }
    };

    for type_info in &types {
        validate(type_info).map_err(|detail| type_parse_error(input, detail))?;
    }
    Ok(types)
}

fn type_parse_error(input: &str, detail: String) -> ConfigError {
    ConfigError::TypeParse {
        input: input.to_string(),
        detail,
    }
}

fn validate(type_info: &TypeInfo) -> Result<(), String> {
    match type_info {
        TypeInfo::Primitive(PrimitiveType::Decimal { precision, scale }) => {
            if *precision == 0 || *precision > MAX_DECIMAL_PRECISION {
                Err(format!(
                    "decimal precision {precision} is outside 1..={MAX_DECIMAL_PRECISION}"
                ))
            } else if scale > precision {
                Err(format!(
                    "decimal scale {scale} exceeds precision {precision}"
                ))
            } else {
                Ok(())
            }
        }
        TypeInfo::Primitive(PrimitiveType::Varchar(len)) if !(1..=MAX_VARCHAR_LENGTH).contains(len) => {
            Err(format!("varchar length {len} is outside 1..={MAX_VARCHAR_LENGTH}"))
        }
        TypeInfo::Primitive(PrimitiveType::Char(len)) if !(1..=MAX_CHAR_LENGTH).contains(len) => {
            Err(format!("char length {len} is outside 1..={MAX_CHAR_LENGTH}"))
        }
        TypeInfo::Primitive(_) => Ok(()),
        TypeInfo::List(elem) => validate(elem),
        TypeInfo::Map { key, value } => {
            validate(key)?;
            validate(value)
        }
        TypeInfo::Struct(fields) => fields.iter().try_for_each(|f| validate(&f.type_info)),
        TypeInfo::Union(members) => members.iter().try_for_each(validate),
    }
}

/// Parse the top-level list, consuming trailing whitespace.
fn type_list(input: &str) -> IResult<&str, Vec<TypeInfo>> {
    terminated(separated_list1(list_separator, type_info), multispace0)(input)
}

fn list_separator(input: &str) -> IResult<&str, char> {
    delimited(multispace0, one_of(",:;"), multispace0)(input)
}

/// Parse any type expression, skipping leading whitespace.
fn type_info(input: &str) -> IResult<&str, TypeInfo> {
    preceded(
        multispace0,
        alt((
            list_type,
            map_type,
            struct_type,
            union_type,
            map(primitive_type, TypeInfo::Primitive),
        )),
    )(input)
}

/// Parse array<T>
fn list_type(input: &str) -> IResult<&str, TypeInfo> {
    map(
        tuple((keyword("array"), sym('<'), type_info, sym('>'))),
        |(_, _, elem, _)| TypeInfo::list(elem),
    )(input)
}

/// Parse map<K,V>
fn map_type(input: &str) -> IResult<&str, TypeInfo> {
    map(
        tuple((
            keyword("map"),
            sym('<'),
            type_info,
            sym(','),
            type_info,
            sym('>'),
        )),
        |(_, _, key, _, value, _)| TypeInfo::map(key, value),
    )(input)
}

/// Parse struct<name:T,...>
fn struct_type(input: &str) -> IResult<&str, TypeInfo> {
    map(
        tuple((
            keyword("struct"),
            sym('<'),
            separated_list1(sym(','), struct_member),
            sym('>'),
        )),
        |(_, _, fields, _)| TypeInfo::Struct(fields),
    )(input)
}

fn struct_member(input: &str) -> IResult<&str, StructField> {
    map(
        tuple((multispace0, identifier, sym(':'), type_info)),
        |(_, name, _, type_info)| StructField::new(name, type_info),
    )(input)
}

/// Parse uniontype<T,...>
fn union_type(input: &str) -> IResult<&str, TypeInfo> {
    map(
        tuple((
            keyword("uniontype"),
            sym('<'),
            separated_list1(sym(','), type_info),
            sym('>'),
        )),
        |(_, _, members, _)| TypeInfo::Union(members),
    )(input)
}

/// Parse primitive type names (order matters: longer matches first)
fn primitive_type(input: &str) -> IResult<&str, PrimitiveType> {
    alt((
        value(
            PrimitiveType::TimestampLocalTz,
            tuple((
                keyword("timestamp"),
                multispace1,
                keyword("with"),
                multispace1,
                keyword("local"),
                multispace1,
                keyword("time"),
                multispace1,
                keyword("zone"),
            )),
        ),
        value(PrimitiveType::Timestamp, keyword("timestamp")),
        varchar_type,
        char_type,
        decimal_type,
        value(PrimitiveType::Void, keyword("void")),
        value(PrimitiveType::Boolean, keyword("boolean")),
        value(PrimitiveType::Byte, keyword("tinyint")),
        value(PrimitiveType::Short, keyword("smallint")),
        value(PrimitiveType::Int, alt((keyword("integer"), keyword("int")))),
        value(PrimitiveType::Long, keyword("bigint")),
        value(PrimitiveType::Float, keyword("float")),
        value(PrimitiveType::Double, keyword("double")),
        value(PrimitiveType::String, keyword("string")),
        value(PrimitiveType::Binary, keyword("binary")),
        value(PrimitiveType::Date, keyword("date")),
        value(
            PrimitiveType::IntervalYearMonth,
            keyword("interval_year_month"),
        ),
        value(PrimitiveType::IntervalDayTime, keyword("interval_day_time")),
    ))(input)
}

/// Parse varchar(N)
fn varchar_type(input: &str) -> IResult<&str, PrimitiveType> {
    map(
        tuple((keyword("varchar"), sym('('), number, sym(')'))),
        |(_, _, len, _)| PrimitiveType::Varchar(len),
    )(input)
}

/// Parse char(N)
fn char_type(input: &str) -> IResult<&str, PrimitiveType> {
    map(
        tuple((keyword("char"), sym('('), number, sym(')'))),
        |(_, _, len, _)| PrimitiveType::Char(len),
    )(input)
}

/// Parse decimal, decimal(P) or decimal(P,S)
fn decimal_type(input: &str) -> IResult<&str, PrimitiveType> {
    map(
        pair(
            keyword("decimal"),
            opt(delimited(
                sym('('),
                pair(number, opt(preceded(sym(','), number))),
                sym(')'),
            )),
        ),
        |(_, args)| match args {
            None => PrimitiveType::Decimal {
                precision: DEFAULT_DECIMAL_PRECISION,
                scale: DEFAULT_DECIMAL_SCALE,
            },
            Some((precision, scale)) => PrimitiveType::Decimal {
                precision,
                scale: scale.unwrap_or(DEFAULT_DECIMAL_SCALE),
            },
        },
    )(input)
}

/// Case-insensitive keyword that must not run into an identifier character.
fn keyword<'a>(kw: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    terminated(tag_no_case(kw), keyword_boundary)
}

/// Single punctuation character surrounded by optional whitespace.
fn sym<'a>(c: char) -> impl FnMut(&'a str) -> IResult<&'a str, char> {
    delimited(multispace0, char(c), multispace0)
}

fn keyword_boundary(input: &str) -> IResult<&str, ()> {
    if input.chars().next().is_some_and(is_ident_continue) {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Verify)));
    }
    Ok((input, ()))
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Parse an identifier (alphanumeric + underscore, must start with alpha or _)
fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))(input)
}

fn number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, str::parse::<u32>)(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_requires_boundary() {
        assert!(keyword("int")("integer").is_err());
        assert_eq!(keyword("int")("INT,"), Ok((",", "INT")));
    }

    #[test]
    fn number_rejects_overflow() {
        assert!(number("99999999999").is_err());
        assert_eq!(number("38)"), Ok((")", 38)));
    }
}
