use chrono::format::{ParseResult, Parsed, StrftimeItems, parse};
use chrono::{NaiveDateTime, NaiveTime};

use crate::engine::errors::IntentError;
use crate::engine::types::ScalarValue;

/// Default strftime pattern for date columns and date-range endpoints.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses date values with a caller-supplied strftime pattern.
pub struct DateParser;

impl DateParser {
    /// Parse a string into a point in time.
    ///
    /// Fields the format leaves out take strptime defaults: month and day 1,
    /// hour and minute 0. So `%Y-%m` resolves to the first of the month at
    /// midnight. The whole input must match; surrounding text is an error.
    pub fn parse_str(input: &str, format: &str) -> Result<NaiveDateTime, IntentError> {
        Self::resolve(input, format).map_err(|_| IntentError::DateParse {
            value: input.to_string(),
            format: format.to_string(),
        })
    }

    fn resolve(input: &str, format: &str) -> ParseResult<NaiveDateTime> {
        let mut parsed = Parsed::new();
        parse(&mut parsed, input, StrftimeItems::new(format))?;

        let week_based = parsed.week_from_sun().is_some() || parsed.week_from_mon().is_some();
        if parsed.month().is_none() && parsed.ordinal().is_none() && !week_based {
            parsed.set_month(1)?;
        }
        if parsed.day().is_none() && parsed.ordinal().is_none() && !week_based {
            parsed.set_day(1)?;
        }
        if parsed.hour_div_12().is_none() && parsed.hour_mod_12().is_none() {
            parsed.set_hour(0)?;
        }
        if parsed.minute().is_none() {
            parsed.set_minute(0)?;
        }
        parsed.to_naive_datetime_with_offset(0)
    }

    /// Parse a table cell.
    ///
    /// Returns `None` for null cells. `Date` cells are taken as-is, strings are
    /// parsed with `format`, and anything else is a parse error.
    pub fn parse_cell(
        value: &ScalarValue,
        format: &str,
    ) -> Result<Option<NaiveDateTime>, IntentError> {
        match value {
            ScalarValue::Null => Ok(None),
            ScalarValue::Date(d) => Ok(Some(d.and_time(NaiveTime::MIN))),
            ScalarValue::Utf8(s) => Self::parse_str(s, format).map(Some),
            other => Err(IntentError::DateParse {
                value: other.to_string_repr(),
                format: format.to_string(),
            }),
        }
    }
}
