//! Ordered scalar metadata attached to error instances

use crate::error::ErrtypeError;
use core::fmt;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Field names owned by the instance itself
pub const RESERVED_KEYS: [&str; 7] = [
    "message", "instance", "code", "namespace", "type", "expose", "stack",
];

/// A scalar metadata value
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum MetaValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl MetaValue {
    /// Convert a JSON scalar
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The value is null, an array or an object
    /// - The number fits neither `i64` nor `f64`
    pub fn from_json(value: &Value) -> Result<Self, ErrtypeError> {
        match *value {
            Value::Bool(b) => Ok(Self::Bool(b)),
            Value::String(ref s) => Ok(Self::Str(s.clone())),
            Value::Number(ref n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float))
                .ok_or_else(|| ErrtypeError::metadata(format!("Unsupported number: {n}"))),
            Value::Null | Value::Array(_) | Value::Object(_) => Err(ErrtypeError::metadata(
                format!("Metadata values must be scalars, got: {value}"),
            )),
        }
    }
}

/// How a float is written, shared by text and JSON output
enum FloatForm {
    NonFinite,
    Whole(i64),
    Fraction(f64),
}

impl FloatForm {
    #[allow(clippy::cast_possible_truncation, reason = "Checked integral and below 2^53")]
    fn of(x: f64) -> Self {
        if !x.is_finite() {
            Self::NonFinite
        } else if x.fract() == 0.0 && x.abs() < 9.007_199_254_740_992e15 {
            // Integral values within 2^53 print without a fractional part.
            Self::Whole(x as i64)
        } else {
            Self::Fraction(x)
        }
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => match FloatForm::of(x) {
                FloatForm::NonFinite if x.is_nan() => f.write_str("NaN"),
                FloatForm::NonFinite if x.is_sign_negative() => f.write_str("-Infinity"),
                FloatForm::NonFinite => f.write_str("Infinity"),
                FloatForm::Whole(i) => write!(f, "{i}"),
                FloatForm::Fraction(x) => {
                    let text = serde_json::to_string(&x).map_err(|_| fmt::Error)?;
                    f.write_str(&text)
                }
            },
            Self::Str(ref s) => f.write_str(s),
        }
    }
}

impl Serialize for MetaValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::Bool(b) => serializer.serialize_bool(b),
            Self::Int(i) => serializer.serialize_i64(i),
            Self::Float(x) => match FloatForm::of(x) {
                FloatForm::NonFinite => serializer.serialize_none(),
                FloatForm::Whole(i) => serializer.serialize_i64(i),
                FloatForm::Fraction(x) => serializer.serialize_f64(x),
            },
            Self::Str(ref s) => serializer.serialize_str(s),
        }
    }
}

impl From<bool> for MetaValue {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for MetaValue {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for MetaValue {
    #[inline]
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for MetaValue {
    #[inline]
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for MetaValue {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for MetaValue {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for MetaValue {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// Insertion-ordered metadata fields
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Metadata(IndexMap<String, MetaValue>);

impl Metadata {
    /// Create empty metadata
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing an existing value in place
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The key is one of [`RESERVED_KEYS`]
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Result<Option<MetaValue>, ErrtypeError>
    where
        K: Into<String>,
        V: Into<MetaValue>,
    {
        let key = key.into();
        if RESERVED_KEYS.contains(&key.as_str()) {
            return Err(ErrtypeError::reserved_key(key));
        }
        Ok(self.0.insert(key, value.into()))
    }

    /// Insert a field (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The key is one of [`RESERVED_KEYS`]
    #[inline]
    pub fn with<K, V>(mut self, key: K, value: V) -> Result<Self, ErrtypeError>
    where
        K: Into<String>,
        V: Into<MetaValue>,
    {
        self.insert(key, value)?;
        Ok(self)
    }

    /// Collect pairs in order, stopping at the first reserved key
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any key is one of [`RESERVED_KEYS`]
    pub fn try_from_pairs<I>(pairs: I) -> Result<Self, ErrtypeError>
    where
        I: IntoIterator<Item = (String, MetaValue)>,
    {
        pairs
            .into_iter()
            .try_fold(Self::new(), |meta, (key, value)| meta.with(key, value))
    }

    /// Look up a field
    #[must_use]
    #[inline]
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.0.get(key)
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fields in insertion order
    #[inline]
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, MetaValue> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Metadata {
    type Item = (&'a String, &'a MetaValue);
    type IntoIter = indexmap::map::Iter<'a, String, MetaValue>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Build [`Metadata`] from `key => value` pairs
///
/// Evaluates to `Result<Metadata, ErrtypeError>`, failing on the first
/// reserved key.
///
/// ```
/// let meta = errtype::metadata! { "a" => 1, "b" => "two" }.unwrap();
/// assert_eq!(meta.len(), 2);
/// ```
#[macro_export]
macro_rules! metadata {
    () => {
        ::core::result::Result::<$crate::factory::Metadata, $crate::error::ErrtypeError>::Ok(
            $crate::factory::Metadata::new(),
        )
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::factory::Metadata::try_from_pairs([
            $((
                ::core::convert::Into::<::std::string::String>::into($key),
                ::core::convert::Into::<$crate::factory::MetaValue>::into($value),
            )),+
        ])
    };
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn preserves_insertion_order() {
        let meta = Metadata::new()
            .with("zeta", 1)
            .unwrap()
            .with("alpha", "two")
            .unwrap()
            .with("mid", true)
            .unwrap();
        let keys: Vec<&str> = meta.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn replacing_keeps_position() {
        let mut meta = crate::metadata! { "a" => 1, "b" => 2 }.unwrap();
        let old = meta.insert("a", "again").unwrap();
        assert_eq!(old, Some(MetaValue::Int(1)));
        assert_eq!(
            serde_json::to_string(&meta).unwrap(),
            r#"{"a":"again","b":2}"#
        );
    }

    #[test]
    fn reserved_keys_are_rejected() {
        for key in RESERVED_KEYS {
            let err = Metadata::new().with(key, 1).unwrap_err();
            assert_eq!(err, ErrtypeError::reserved_key(key));
        }
        assert!(crate::metadata! { "ok" => 1, "type" => "x" }.is_err());
    }

    #[test]
    fn display_uses_plain_scalar_text() {
        assert_eq!(MetaValue::from(1).to_string(), "1");
        assert_eq!(MetaValue::from(2.5).to_string(), "2.5");
        assert_eq!(MetaValue::from("two").to_string(), "two");
        assert_eq!(MetaValue::from(false).to_string(), "false");
        assert_eq!(MetaValue::from(f64::NAN).to_string(), "NaN");
    }

    #[test]
    fn text_and_json_agree_on_floats() {
        for x in [1e21, 3.0, 0.25, -1.5e-7, 9.007_199_254_740_992e15] {
            let value = MetaValue::Float(x);
            assert_eq!(value.to_string(), serde_json::to_string(&value).unwrap());
        }

        let meta = crate::metadata! { "big" => 1e21 }.unwrap();
        let json = serde_json::to_string(&meta).unwrap();
        let text = meta.iter().map(|(k, v)| format!("{k}={v}")).collect::<String>();
        assert_eq!(text, format!("big={}", &json[7..json.len() - 1]));
    }

    #[test]
    fn macro_converts_mixed_keys_and_values() {
        let key = String::from("owned");
        let meta = crate::metadata! { key => 2.5, "flag" => true, "n" => 3_i64 }.unwrap();
        assert_eq!(meta.get("owned"), Some(&MetaValue::Float(2.5)));
        assert_eq!(meta.get("flag"), Some(&MetaValue::Bool(true)));
        assert_eq!(meta.get("n"), Some(&MetaValue::Int(3)));
    }

    #[test]
    fn whole_floats_serialize_as_integers() {
        assert_eq!(serde_json::to_value(MetaValue::Float(3.0)).unwrap(), json!(3));
        assert_eq!(serde_json::to_value(MetaValue::Float(0.25)).unwrap(), json!(0.25));
        assert_eq!(
            serde_json::to_value(MetaValue::Float(f64::NAN)).unwrap(),
            json!(null)
        );
    }

    #[test]
    fn from_json_accepts_only_scalars() {
        assert_eq!(MetaValue::from_json(&json!(7)).unwrap(), MetaValue::Int(7));
        assert_eq!(
            MetaValue::from_json(&json!(1.5)).unwrap(),
            MetaValue::Float(1.5)
        );
        assert_eq!(
            MetaValue::from_json(&json!("x")).unwrap(),
            MetaValue::Str("x".to_owned())
        );
        MetaValue::from_json(&json!([1])).unwrap_err();
        MetaValue::from_json(&json!({"a": 1})).unwrap_err();
        MetaValue::from_json(&json!(null)).unwrap_err();
    }
}
