/*
 * Licensed to the Apache Software Foundation (ASF) under one
 * or more contributor license agreements.  See the NOTICE file
 * distributed with this work for additional information
 * regarding copyright ownership.  The ASF licenses this file
 * to you under the Apache License, Version 2.0 (the
 * "License"); you may not use this file except in compliance
 * with the License.  You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing,
 * software distributed under the License is distributed on an
 * "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
 * KIND, either express or implied.  See the License for the
 * specific language governing permissions and limitations
 * under the License.
 */

//! Typed environment variable values and their coercion rules.

use crate::error::ParseError;
use chrono::NaiveDateTime;
use strum::Display;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATETIME_FORMAT_T: &str = "%Y-%m-%dT%H:%M:%S";

/// The closed set of kinds a schema field may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ValueKind {
    String,
    Int,
    Long,
    Float,
    Double,
    Bool,
    DateTime,
}

/// A coerced environment variable value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl Value {
    /// Coerce a raw environment variable string into the requested kind.
    ///
    /// Parsing is culture-invariant: base-10 integers, `.` as the decimal
    /// separator, `true`/`false` literals only for booleans (any case), and
    /// `YYYY-MM-DD HH:MM:SS` datetimes (a `T` separator is also accepted).
    pub fn parse(kind: ValueKind, raw: &str) -> Result<Self, ParseError> {
        match kind {
            ValueKind::String => Ok(Self::String(raw.to_owned())),
            ValueKind::Int => Ok(Self::Int(raw.parse()?)),
            ValueKind::Long => Ok(Self::Long(raw.parse()?)),
            ValueKind::Float => Ok(Self::Float(raw.parse()?)),
            ValueKind::Double => Ok(Self::Double(raw.parse()?)),
            ValueKind::Bool => match raw.to_ascii_lowercase().as_str() {
                "true" => Ok(Self::Bool(true)),
                "false" => Ok(Self::Bool(false)),
                _ => Err(ParseError::Bool),
            },
            ValueKind::DateTime => {
                let parsed = NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT)
                    .or_else(|_| NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT_T))?;
                Ok(Self::DateTime(parsed))
            }
        }
    }

    /// The kind this value was coerced to.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::String(_) => ValueKind::String,
            Self::Int(_) => ValueKind::Int,
            Self::Long(_) => ValueKind::Long,
            Self::Float(_) => ValueKind::Float,
            Self::Double(_) => ValueKind::Double,
            Self::Bool(_) => ValueKind::Bool,
            Self::DateTime(_) => ValueKind::DateTime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parse_handles_strings_verbatim() {
        assert_eq!(
            Value::parse(ValueKind::String, "tests_db").unwrap(),
            Value::String("tests_db".to_owned())
        );
        assert_eq!(
            Value::parse(ValueKind::String, "  padded  ").unwrap(),
            Value::String("  padded  ".to_owned())
        );
    }

    #[test]
    fn parse_handles_integers() {
        assert_eq!(
            Value::parse(ValueKind::Int, "7431").unwrap(),
            Value::Int(7431)
        );
        assert_eq!(
            Value::parse(ValueKind::Int, "-123").unwrap(),
            Value::Int(-123)
        );
        assert_eq!(
            Value::parse(ValueKind::Long, "7431").unwrap(),
            Value::Long(7431)
        );
    }

    #[test]
    fn parse_rejects_out_of_range_integers() {
        let result = Value::parse(ValueKind::Int, "4294967296");
        assert!(matches!(result, Err(ParseError::Int(_))));
    }

    #[test]
    fn parse_rejects_non_numeric_integers() {
        assert!(matches!(
            Value::parse(ValueKind::Int, "tests_db"),
            Err(ParseError::Int(_))
        ));
        assert!(matches!(
            Value::parse(ValueKind::Long, "1.5"),
            Err(ParseError::Int(_))
        ));
    }

    #[test]
    fn parse_handles_decimals_with_dot_separator() {
        assert_eq!(
            Value::parse(ValueKind::Float, "6.458").unwrap(),
            Value::Float(6.458)
        );
        assert_eq!(
            Value::parse(ValueKind::Double, "6.458").unwrap(),
            Value::Double(6.458)
        );
        assert!(matches!(
            Value::parse(ValueKind::Double, "6,458"),
            Err(ParseError::Float(_))
        ));
    }

    #[test]
    fn parse_handles_boolean_literals_case_insensitively() {
        assert_eq!(
            Value::parse(ValueKind::Bool, "true").unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            Value::parse(ValueKind::Bool, "FALSE").unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            Value::parse(ValueKind::Bool, "True").unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn parse_rejects_non_boolean_literals() {
        assert!(matches!(
            Value::parse(ValueKind::Bool, "tests_db"),
            Err(ParseError::Bool)
        ));
        assert!(matches!(
            Value::parse(ValueKind::Bool, "1"),
            Err(ParseError::Bool)
        ));
        assert!(matches!(
            Value::parse(ValueKind::Bool, ""),
            Err(ParseError::Bool)
        ));
    }

    #[test]
    fn parse_handles_datetimes() {
        let expected = NaiveDate::from_ymd_opt(2022, 2, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            Value::parse(ValueKind::DateTime, "2022-02-01 00:00:00").unwrap(),
            Value::DateTime(expected)
        );
        assert_eq!(
            Value::parse(ValueKind::DateTime, "2022-02-01T00:00:00").unwrap(),
            Value::DateTime(expected)
        );
    }

    #[test]
    fn parse_rejects_unparseable_datetimes() {
        assert!(matches!(
            Value::parse(ValueKind::DateTime, "yesterday"),
            Err(ParseError::DateTime(_))
        ));
    }

    #[test]
    fn kind_matches_parsed_variant() {
        let value = Value::parse(ValueKind::Double, "1.5").unwrap();
        assert_eq!(value.kind(), ValueKind::Double);
    }

    #[test]
    fn value_kind_displays_lowercase() {
        assert_eq!(ValueKind::Bool.to_string(), "bool");
        assert_eq!(ValueKind::DateTime.to_string(), "datetime");
    }
}
