//! Scalar adapters: text conversions for values that are not natively text.
//!
//! Each adapter is a pure, two-way, lossless conversion between a typed value
//! and its GEXF attribute representation. An adapter never fails on a value
//! it produced itself.

use thiserror::Error;

/// Failed to interpret a date attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("invalid date {text:?}: expected YYYY-MM-DD")]
    Pattern { text: String },

    #[error("date {year:04}-{month:02}-{day:02} is not a valid calendar date")]
    OutOfRange { year: i32, month: u8, day: u8 },
}

/// A token outside one of the closed enumerations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {what} token {token:?}")]
pub struct UnknownEnumValue {
    /// Which enumeration was being decoded (e.g. "edge type").
    pub what: &'static str,
    /// The offending token.
    pub token: String,
}

/// Failed to interpret a color channel attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("color channel {channel} value {text:?} is not a number")]
    NotANumber { channel: &'static str, text: String },

    #[error("color channel {channel} value {value} outside [0, 255]")]
    OutOfRange { channel: &'static str, value: i64 },
}

/// A calendar date at day precision, serialized as `YYYY-MM-DD`.
///
/// Fields are public so documents can be assembled directly; out-of-domain
/// combinations (e.g. February 30th) are rejected by [`Date::new`] and again
/// by [`Date::format`] at encode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Date {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl Date {
    /// Creates a date, rejecting impossible calendar dates.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, DateError> {
        validate(year, month, day)?;
        Ok(Self { year, month, day })
    }

    /// Parses the strict `YYYY-MM-DD` pattern.
    pub fn parse(text: &str) -> Result<Self, DateError> {
        let bytes = text.as_bytes();
        let shaped = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !shaped {
            return Err(DateError::Pattern {
                text: text.to_string(),
            });
        }
        let pattern = || DateError::Pattern {
            text: text.to_string(),
        };
        let year: i32 = text[0..4].parse().map_err(|_| pattern())?;
        let month: u8 = text[5..7].parse().map_err(|_| pattern())?;
        let day: u8 = text[8..10].parse().map_err(|_| pattern())?;
        Self::new(year, month, day)
    }

    /// Renders the `YYYY-MM-DD` token, re-validating the fields first.
    pub fn format(&self) -> Result<String, DateError> {
        validate(self.year, self.month, self.day)?;
        Ok(format!(
            "{:04}-{:02}-{:02}",
            self.year, self.month, self.day
        ))
    }
}

fn validate(year: i32, month: u8, day: u8) -> Result<(), DateError> {
    let valid = (0..=9999).contains(&year)
        && (1..=12).contains(&month)
        && day >= 1
        && day <= days_in_month(year, month);
    if valid {
        Ok(())
    } else {
        Err(DateError::OutOfRange { year, month, day })
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Declares a closed enumeration with a fixed token per variant.
///
/// The invocation's variant list is the single source of truth for both
/// directions, so encode and decode cannot drift.
macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        $name:ident : $what:literal {
            $($(#[$vmeta:meta])* $variant:ident => $token:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Returns the wire token for this value.
            pub fn as_token(self) -> &'static str {
                match self {
                    $(Self::$variant => $token),+
                }
            }

            /// Decodes a wire token by exact match.
            pub fn from_token(token: &str) -> Result<Self, UnknownEnumValue> {
                match token {
                    $($token => Ok(Self::$variant),)+
                    _ => Err(UnknownEnumValue {
                        what: $what,
                        token: token.to_string(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_token())
            }
        }
    };
}

token_enum! {
    /// Directionality of an edge.
    EdgeType: "edge type" {
        Directed => "directed",
        Undirected => "undirected",
        Mutual => "mutual",
    }
}

token_enum! {
    /// Type of node and edge identifiers.
    IdType: "id type" {
        String => "string",
        Integer => "integer",
    }
}

token_enum! {
    /// Whether the graph carries dynamics.
    GraphMode: "graph mode" {
        Static => "static",
        Dynamic => "dynamic",
    }
}

token_enum! {
    /// Which element class an attribute block declares slots for.
    AttributeClass: "attribute class" {
        Node => "node",
        Edge => "edge",
    }
}

impl Default for EdgeType {
    fn default() -> Self {
        EdgeType::Directed
    }
}

impl Default for IdType {
    fn default() -> Self {
        IdType::String
    }
}

impl Default for GraphMode {
    fn default() -> Self {
        GraphMode::Static
    }
}

impl Default for AttributeClass {
    fn default() -> Self {
        AttributeClass::Node
    }
}

/// Decodes one color channel from its decimal numeral.
pub fn channel_from_text(channel: &'static str, text: &str) -> Result<u8, ChannelError> {
    let value: i64 = text.parse().map_err(|_| ChannelError::NotANumber {
        channel,
        text: text.to_string(),
    })?;
    if !(0..=255).contains(&value) {
        return Err(ChannelError::OutOfRange { channel, value });
    }
    Ok(value as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn test_date_parse_valid() {
        let date = Date::parse("2009-03-20").unwrap();
        assert_eq!(
            date,
            Date {
                year: 2009,
                month: 3,
                day: 20
            }
        );
        assert_eq!(date.format().unwrap(), "2009-03-20");
    }

    #[test]
    fn test_date_parse_rejects_bad_pattern() {
        for text in [
            "",
            "20090320",
            "2009-3-20",
            "2009-03-2",
            "2009/03/20",
            "2009-03-20T00:00:00Z",
            "-009-03-20",
            "2009-03-20 ",
        ] {
            assert!(
                matches!(Date::parse(text), Err(DateError::Pattern { .. })),
                "accepted {text:?}"
            );
        }
    }

    #[test]
    fn test_date_parse_rejects_impossible_dates() {
        for text in ["2009-02-30", "2009-13-01", "2009-00-10", "2009-04-31", "2009-02-29"] {
            assert!(
                matches!(Date::parse(text), Err(DateError::OutOfRange { .. })),
                "accepted {text:?}"
            );
        }
        // 2008 is a leap year.
        assert!(Date::parse("2008-02-29").is_ok());
    }

    #[test]
    fn test_date_format_rejects_mutated_fields() {
        let mut date = Date::new(2009, 3, 20).unwrap();
        date.day = 42;
        assert!(matches!(date.format(), Err(DateError::OutOfRange { .. })));
    }

    #[test]
    fn test_edge_type_tokens() {
        for (value, token) in [
            (EdgeType::Directed, "directed"),
            (EdgeType::Undirected, "undirected"),
            (EdgeType::Mutual, "mutual"),
        ] {
            assert_eq!(value.as_token(), token);
            assert_eq!(EdgeType::from_token(token).unwrap(), value);
        }
        let err = EdgeType::from_token("sideways").unwrap_err();
        assert_eq!(err.what, "edge type");
        assert_eq!(err.token, "sideways");
        // Exact match only: no case folding, no padding.
        assert!(EdgeType::from_token("Directed").is_err());
        assert!(EdgeType::from_token(" directed").is_err());
    }

    #[test]
    fn test_remaining_enum_tokens() {
        assert_eq!(IdType::from_token("integer").unwrap(), IdType::Integer);
        assert_eq!(GraphMode::from_token("dynamic").unwrap(), GraphMode::Dynamic);
        assert_eq!(AttributeClass::from_token("edge").unwrap(), AttributeClass::Edge);
        assert!(IdType::from_token("uuid").is_err());
        assert!(GraphMode::from_token("streaming").is_err());
        assert!(AttributeClass::from_token("graph").is_err());
    }

    #[test]
    fn test_enum_defaults() {
        assert_eq!(EdgeType::default(), EdgeType::Directed);
        assert_eq!(IdType::default(), IdType::String);
        assert_eq!(GraphMode::default(), GraphMode::Static);
        assert_eq!(AttributeClass::default(), AttributeClass::Node);
    }

    #[test]
    fn test_channel_bounds() {
        assert_eq!(channel_from_text("r", "0").unwrap(), 0);
        assert_eq!(channel_from_text("g", "255").unwrap(), 255);
        assert!(matches!(
            channel_from_text("b", "256"),
            Err(ChannelError::OutOfRange { value: 256, .. })
        ));
        assert!(matches!(
            channel_from_text("r", "-1"),
            Err(ChannelError::OutOfRange { value: -1, .. })
        ));
        assert!(matches!(
            channel_from_text("g", "red"),
            Err(ChannelError::NotANumber { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_date_roundtrip(year in 0i32..=9999, month in 1u8..=12, day in 1u8..=31) {
            prop_assume!(day <= days_in_month(year, month));
            let date = Date::new(year, month, day).unwrap();
            let token = date.format().unwrap();
            prop_assert_eq!(Date::parse(&token).unwrap(), date);
        }

        #[test]
        fn prop_channel_roundtrip(value: u8) {
            let token = value.to_string();
            prop_assert_eq!(channel_from_text("r", &token).unwrap(), value);
        }
    }
}
