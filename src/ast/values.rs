use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::util::literal::quote;

/// A literal value in an expression or bound to a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Literal {
    /// Unescaped string content
    String(String),
    /// Numeric literal kept as its source text (`1`, `1.5`, `10L`, `2.0BD`)
    Numeric(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    /// Enum constant, rendered as written
    Enum(String),
    /// Entity type literal, rendered as written
    Entity(String),
}

impl Literal {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Literal::Numeric(_))
    }
}

/// Renders the literal as query text: strings are quoted with `''`
/// escapes, temporal values use JDBC escape syntax.
impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::String(s) => write!(f, "{}", quote(s)),
            Literal::Numeric(n) => write!(f, "{}", n),
            Literal::Date(d) => write!(f, "{{d '{}'}}", d.format("%Y-%m-%d")),
            Literal::Time(t) => write!(f, "{{t '{}'}}", t.format("%H:%M:%S")),
            Literal::Timestamp(ts) => {
                write!(f, "{{ts '{}", ts.format("%Y-%m-%d %H:%M:%S"))?;
                let nanos = ts.nanosecond();
                if nanos > 0 {
                    write!(f, ".{:09}", nanos)?;
                }
                write!(f, "'}}")
            }
            Literal::Enum(text) | Literal::Entity(text) => write!(f, "{}", text),
        }
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self {
        Literal::Numeric(n.to_string())
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Numeric(n.to_string())
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Literal::Numeric(n.to_string())
    }
}

impl From<NaiveDate> for Literal {
    fn from(d: NaiveDate) -> Self {
        Literal::Date(d)
    }
}

impl From<NaiveTime> for Literal {
    fn from(t: NaiveTime) -> Self {
        Literal::Time(t)
    }
}

impl From<NaiveDateTime> for Literal {
    fn from(ts: NaiveDateTime) -> Self {
        Literal::Timestamp(ts)
    }
}

/// Value bound to a parameter expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterValue {
    Single(Literal),
    Collection(Vec<Literal>),
}

impl ParameterValue {
    pub fn is_empty_collection(&self) -> bool {
        matches!(self, ParameterValue::Collection(values) if values.is_empty())
    }
}

impl std::fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterValue::Single(literal) => write!(f, "{}", literal),
            ParameterValue::Collection(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_rendering() {
        assert_eq!(Literal::from("it's").to_string(), "'it''s'");
        assert_eq!(Literal::from(42).to_string(), "42");
        assert_eq!(Literal::from(-3).to_string(), "-3");

        let date = NaiveDate::from_ymd_opt(1991, 5, 21).unwrap();
        assert_eq!(Literal::from(date).to_string(), "{d '1991-05-21'}");

        let time = NaiveTime::from_hms_opt(1, 59, 9).unwrap();
        assert_eq!(Literal::from(time).to_string(), "{t '01:59:09'}");

        let ts = date.and_hms_opt(11, 59, 59).unwrap();
        assert_eq!(Literal::from(ts).to_string(), "{ts '1991-05-21 11:59:59'}");

        let ts = date.and_hms_milli_opt(11, 59, 59, 100).unwrap();
        assert_eq!(Literal::from(ts).to_string(), "{ts '1991-05-21 11:59:59.100000000'}");
    }

    #[test]
    fn test_collection_value() {
        let value = ParameterValue::Collection(vec![Literal::from(1), Literal::from("a")]);
        assert_eq!(value.to_string(), "1, 'a'");
        assert!(!value.is_empty_collection());
        assert!(ParameterValue::Collection(vec![]).is_empty_collection());
        assert!(!ParameterValue::Single(Literal::from(1)).is_empty_collection());
    }
}
