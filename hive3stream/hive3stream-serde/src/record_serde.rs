//! Record-to-row conversion for one table-write session.

use hive3stream_core::{Record, RecordField, RecordSchema};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, warn};

use crate::{
    error::{ConfigError, ConversionError, FieldError},
    position::FieldPositionMap,
    properties::{DecimalMode, TableProperties},
    row::{Row, RowValue},
    table::TableSchema,
    timestamp::TimestampParser,
    type_info::{PrimitiveType, TypeInfo},
};

/// Running statistics of an adapter instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SerDeStats {
    row_count: u64,
}

impl SerDeStats {
    /// Records converted successfully so far.
    pub fn row_count(&self) -> u64 {
        self.row_count
    }
}

/// Converts self-describing records into rows of a fixed table schema.
///
/// Field positions are resolved once in [`initialize`](Self::initialize);
/// each call to [`deserialize`](Self::deserialize) then produces a fresh
/// row with one slot per table column.
#[derive(Debug, Clone)]
pub struct RecordSerDe {
    table: TableSchema,
    positions: FieldPositionMap,
    timestamps: TimestampParser,
    decimal_mode: DecimalMode,
    stats: SerDeStats,
}

impl RecordSerDe {
    /// Build the table schema and resolve `source` against it.
    pub fn initialize(
        properties: &TableProperties,
        source: &RecordSchema,
    ) -> Result<Self, ConfigError> {
        debug!(
            columns = ?properties.column_names,
            types = properties.column_types.len(),
            "initializing record serde"
        );

        let table = TableSchema::new(&properties.column_names, &properties.column_types)?;
        let positions = FieldPositionMap::resolve(&table, source)?;

        debug!(
            mapped = positions.len(),
            unmapped = ?positions.unmapped(),
            decimal_mode = %properties.decimal_mode,
            "resolved field positions"
        );

        Ok(Self {
            table,
            positions,
            timestamps: TimestampParser::new(properties.timestamp_formats.clone()),
            decimal_mode: properties.decimal_mode,
            stats: SerDeStats::default(),
        })
    }

    /// Convert one record into a row.
    ///
    /// Fields the table does not declare are skipped and columns the record
    /// lacks stay absent. A field that fails to convert rejects the record and
    /// leaves the statistics untouched.
    pub fn deserialize<R: Record + ?Sized>(&mut self, record: &R) -> Result<Row, ConversionError> {
        let mut row = Row::absent(self.table.len());

        for field in record.schema().iter() {
            let Some(ordinal) = self.positions.get(&field.name) else {
                continue;
            };
            let Some(column) = self.table.column(ordinal) else {
                continue;
            };

            match self.convert_field(record, field, &column.type_info) {
                Ok(value) => row.set(ordinal, value),
                Err(source) => {
                    let error = ConversionError {
                        record: record.identity(),
                        field: field.name.clone(),
                        source,
                    };
                    warn!(
                        field = %field.name,
                        column = %column.name,
                        error = %error,
                        "failed to convert record"
                    );
                    return Err(error);
                }
            }
        }

        self.stats.row_count += 1;
        Ok(row)
    }

    pub fn stats(&self) -> SerDeStats {
        self.stats
    }

    pub fn table_schema(&self) -> &TableSchema {
        &self.table
    }

    pub fn positions(&self) -> &FieldPositionMap {
        &self.positions
    }

    pub fn decimal_mode(&self) -> DecimalMode {
        self.decimal_mode
    }

    fn convert_field<R: Record + ?Sized>(
        &self,
        record: &R,
        field: &RecordField,
        type_info: &TypeInfo,
    ) -> Result<Option<RowValue>, FieldError> {
        let name = field.name.as_str();

        let primitive = match type_info {
            TypeInfo::Primitive(p) => *p,
            TypeInfo::List(_) => {
                return Ok(record.get_as_array(name)?.map(|items| {
                    RowValue::List(items.iter().map(RowValue::from_value).collect())
                }));
            }
            TypeInfo::Map { .. } | TypeInfo::Struct(_) => {
                return match record.get_value(name) {
                    Some(value) => Ok(RowValue::from_typed_value(value, &field.data_type)?),
                    None => Ok(None),
                };
            }
            TypeInfo::Union(_) => return Err(unsupported(type_info)),
        };

        let value = match primitive {
            PrimitiveType::Byte | PrimitiveType::Short | PrimitiveType::Int => {
                record.get_as_int(name)?.map(RowValue::Int)
            }
            PrimitiveType::Long => record.get_as_long(name)?.map(RowValue::Long),
            PrimitiveType::Boolean => record.get_as_boolean(name)?.map(RowValue::Boolean),
            PrimitiveType::Float => record.get_as_float(name)?.map(RowValue::Float),
            PrimitiveType::Double => record.get_as_double(name)?.map(RowValue::Double),
            PrimitiveType::String | PrimitiveType::Varchar(_) | PrimitiveType::Char(_) => {
                record.get_as_string(name)?.map(RowValue::String)
            }
            PrimitiveType::Binary => record.get_as_bytes(name)?.map(RowValue::Binary),
            PrimitiveType::Date => record
                .get_as_date(name, field.data_type.format())?
                .map(RowValue::Date),
            PrimitiveType::Timestamp => match record.get_value(name) {
                Some(raw) => self
                    .timestamps
                    .parse(raw, field.data_type.format())?
                    .map(RowValue::Timestamp),
                None => None,
            },
            PrimitiveType::Decimal { precision, scale } => match self.decimal_mode {
                DecimalMode::Double => record.get_as_double(name)?.map(RowValue::Double),
                DecimalMode::Exact => record
                    .get_as_decimal(name)?
                    .map(|d| fit_decimal(d, precision, scale))
                    .transpose()?
                    .map(RowValue::Decimal),
            },
            PrimitiveType::Void
            | PrimitiveType::TimestampLocalTz
            | PrimitiveType::IntervalYearMonth
            | PrimitiveType::IntervalDayTime => return Err(unsupported(type_info)),
        };
        Ok(value)
    }
}

fn unsupported(type_info: &TypeInfo) -> FieldError {
    FieldError::UnsupportedType {
        type_name: type_info.to_string(),
    }
}

/// Round `value` to `scale` and check the integer digits fit `precision`.
fn fit_decimal(value: Decimal, precision: u32, scale: u32) -> Result<Decimal, FieldError> {
    let rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    let integer = rounded.trunc().abs().normalize().mantissa();
    let digits = if integer == 0 { 0 } else { integer.ilog10() + 1 };

    if digits > precision.saturating_sub(scale) {
        return Err(FieldError::DecimalOverflow {
            value: value.to_string(),
            precision,
            scale,
        });
    }
    Ok(rounded)
}
