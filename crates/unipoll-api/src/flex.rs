// Permissive scalar codec.
//
// The controller emits the same field as a number, a quoted number, a
// word like "auto", `null`, a bool, or `[]` depending on firmware. These
// wrappers keep both a numeric and a text form so nothing is lost.

use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};

// ── FlexInt ─────────────────────────────────────────────────────────

/// A number the controller may send as a number, a string, `null`,
/// a bool, or an empty array.
///
/// `val` is always finite. `txt` is the canonical text form: the string
/// verbatim when one was sent, otherwise the number printed without an
/// exponent. Re-encoding emits a JSON number, so text like `"auto"` does
/// not survive a round trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlexInt {
    pub val: f64,
    pub txt: String,
}

impl FlexInt {
    pub fn new(val: f64) -> Self {
        let val = finite_or_zero(val);
        Self {
            val,
            txt: val.to_string(),
        }
    }

    pub fn val(&self) -> f64 {
        self.val
    }

    pub fn txt(&self) -> &str {
        &self.txt
    }

    /// Exact 64-bit integer form.
    ///
    /// Counters above 2^53 lose precision in `val`, so the text form is
    /// parsed first and the float is only truncated as a fallback.
    #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
    pub fn int64(&self) -> i64 {
        self.txt
            .parse::<i64>()
            .unwrap_or_else(|_| self.val.trunc() as i64)
    }

    pub fn is_zero(&self) -> bool {
        self.val == 0.0
    }

    fn from_text(txt: &str) -> Self {
        Self {
            val: txt.parse::<f64>().map_or(0.0, finite_or_zero),
            txt: txt.to_owned(),
        }
    }

    fn zero() -> Self {
        Self {
            val: 0.0,
            txt: "0".into(),
        }
    }
}

impl From<i64> for FlexInt {
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    fn from(v: i64) -> Self {
        Self {
            val: v as f64,
            txt: v.to_string(),
        }
    }
}

impl fmt::Display for FlexInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.txt)
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

struct FlexIntVisitor;

impl<'de> Visitor<'de> for FlexIntVisitor {
    type Value = FlexInt;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number, numeric string, null, bool, or empty array")
    }

    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<FlexInt, E> {
        Ok(FlexInt {
            val: v as f64,
            txt: v.to_string(),
        })
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<FlexInt, E> {
        Ok(FlexInt::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<FlexInt, E> {
        Ok(FlexInt::new(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<FlexInt, E> {
        Ok(FlexInt::from_text(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<FlexInt, E> {
        Ok(if v {
            FlexInt {
                val: 1.0,
                txt: "true".into(),
            }
        } else {
            FlexInt {
                val: 0.0,
                txt: "false".into(),
            }
        })
    }

    fn visit_unit<E: de::Error>(self) -> Result<FlexInt, E> {
        Ok(FlexInt::zero())
    }

    fn visit_none<E: de::Error>(self) -> Result<FlexInt, E> {
        Ok(FlexInt::zero())
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<FlexInt, D::Error> {
        d.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<FlexInt, A::Error> {
        if seq.next_element::<IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(1, &"an empty array"));
        }
        Ok(FlexInt::zero())
    }
}

impl<'de> Deserialize<'de> for FlexInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FlexIntVisitor)
    }
}

impl Serialize for FlexInt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.txt.parse::<i64>() {
            Ok(exact) => serializer.serialize_i64(exact),
            Err(_) if self.val.fract() == 0.0 => serializer.serialize_i64(self.int64()),
            Err(_) => serializer.serialize_f64(self.val),
        }
    }
}

// ── FlexBool ────────────────────────────────────────────────────────

/// Words the controller uses for "on".
pub const TRUTHY: [&str; 10] = [
    "1", "true", "yes", "t", "armed", "active", "enabled", "ready", "up", "ok",
];

/// A boolean the controller may send as a bool, a word, or a number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlexBool {
    pub val: bool,
    pub txt: String,
}

impl FlexBool {
    pub fn new(val: bool) -> Self {
        Self {
            val,
            txt: val.to_string(),
        }
    }

    pub fn val(&self) -> bool {
        self.val
    }

    pub fn txt(&self) -> &str {
        &self.txt
    }

    fn from_text(txt: &str) -> Self {
        let norm = txt.trim().to_lowercase();
        Self {
            val: TRUTHY.contains(&norm.as_str()),
            txt: txt.to_owned(),
        }
    }
}

impl From<bool> for FlexBool {
    fn from(v: bool) -> Self {
        Self::new(v)
    }
}

struct FlexBoolVisitor;

impl<'de> Visitor<'de> for FlexBoolVisitor {
    type Value = FlexBool;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a bool, a number, or a truthy word")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<FlexBool, E> {
        Ok(FlexBool::new(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<FlexBool, E> {
        Ok(FlexBool::from_text(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<FlexBool, E> {
        Ok(FlexBool {
            val: v != 0,
            txt: v.to_string(),
        })
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<FlexBool, E> {
        Ok(FlexBool {
            val: v != 0,
            txt: v.to_string(),
        })
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<FlexBool, E> {
        Ok(FlexBool {
            val: v != 0.0,
            txt: v.to_string(),
        })
    }

    fn visit_unit<E: de::Error>(self) -> Result<FlexBool, E> {
        Ok(FlexBool::new(false))
    }

    fn visit_none<E: de::Error>(self) -> Result<FlexBool, E> {
        Ok(FlexBool::new(false))
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<FlexBool, D::Error> {
        d.deserialize_any(self)
    }

    // Containers are never truthy.
    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<FlexBool, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(FlexBool::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<FlexBool, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(FlexBool::default())
    }
}

impl<'de> Deserialize<'de> for FlexBool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FlexBoolVisitor)
    }
}

impl Serialize for FlexBool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.val)
    }
}

// ── IpGeo ───────────────────────────────────────────────────────────

/// Geolocation attached to IDS and event records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoIp {
    pub asn: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub continent_code: String,
    pub country_code: String,
    pub country_name: String,
    pub organization: String,
}

/// [`GeoIp`] that also accepts `[]` (and `null`), which the controller
/// sends in place of an empty object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IpGeo(pub GeoIp);

impl std::ops::Deref for IpGeo {
    type Target = GeoIp;

    fn deref(&self) -> &GeoIp {
        &self.0
    }
}

impl<'de> Deserialize<'de> for IpGeo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Shape {
            Empty([(); 0]),
            Null(()),
            Geo(GeoIp),
        }

        Ok(match Shape::deserialize(deserializer)? {
            Shape::Empty(_) | Shape::Null(()) => Self::default(),
            Shape::Geo(geo) => Self(geo),
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Five {
        five: FlexInt,
        seven: FlexInt,
        auto: FlexInt,
        nil: FlexInt,
        wild: FlexInt,
    }

    fn pair(f: &FlexInt) -> (f64, &str) {
        (f.val, f.txt.as_str())
    }

    #[test]
    fn flex_int_mixed_forms() {
        let raw = r#"{"five":"5","seven":7,"auto":"auto","nil":null,"wild":[]}"#;
        let v: Five = serde_json::from_str(raw).unwrap();
        assert_eq!(pair(&v.five), (5.0, "5"));
        assert_eq!(pair(&v.seven), (7.0, "7"));
        assert_eq!(pair(&v.auto), (0.0, "auto"));
        assert_eq!(pair(&v.nil), (0.0, "0"));
        assert_eq!(pair(&v.wild), (0.0, "0"));
    }

    #[test]
    fn flex_int_rejects_object_and_filled_array() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Channel {
            channel: FlexInt,
        }
        assert!(serde_json::from_str::<Channel>(r#"{"channel":{}}"#).is_err());
        assert!(serde_json::from_str::<Channel>(r#"{"channel":[1]}"#).is_err());
    }

    #[test]
    fn flex_int_edge_values() {
        let empty: FlexInt = serde_json::from_value(json!("")).unwrap();
        assert_eq!(pair(&empty), (0.0, ""));

        let t: FlexInt = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(pair(&t), (1.0, "true"));

        let f: FlexInt = serde_json::from_value(json!(false)).unwrap();
        assert_eq!(pair(&f), (0.0, "false"));

        let frac: FlexInt = serde_json::from_value(json!(12.5)).unwrap();
        assert_eq!(pair(&frac), (12.5, "12.5"));

        let nan: FlexInt = serde_json::from_value(json!("NaN")).unwrap();
        assert_eq!(pair(&nan), (0.0, "NaN"));
    }

    #[test]
    fn flex_int_keeps_large_counters_exact() {
        let big: FlexInt = serde_json::from_str("37599596992669123").unwrap();
        assert_eq!(big.int64(), 37_599_596_992_669_123);
        assert_eq!(serde_json::to_string(&big).unwrap(), "37599596992669123");
    }

    #[test]
    fn flex_int_reencodes_as_number() {
        let v: FlexInt = serde_json::from_value(json!("42")).unwrap();
        assert_eq!(serde_json::to_value(&v).unwrap(), json!(42));
        let auto: FlexInt = serde_json::from_value(json!("auto")).unwrap();
        assert_eq!(serde_json::to_value(&auto).unwrap(), json!(0));
    }

    #[test]
    fn flex_bool_truthiness() {
        let inputs = [
            json!("yes"),
            json!("Up"),
            json!("armed"),
            json!("0"),
            json!(""),
            json!(true),
        ];
        let got: Vec<bool> = inputs
            .into_iter()
            .map(|v| serde_json::from_value::<FlexBool>(v).unwrap().val)
            .collect();
        assert_eq!(got, vec![true, true, true, false, false, true]);
    }

    #[test]
    fn flex_bool_every_truthy_word_and_padding() {
        for word in TRUTHY {
            let padded = format!("  {}  ", word.to_uppercase());
            let b: FlexBool = serde_json::from_value(json!(padded)).unwrap();
            assert!(b.val, "{word} should be truthy");
            assert_eq!(b.txt, padded);
        }
        let off: FlexBool = serde_json::from_value(json!("disabled")).unwrap();
        assert!(!off.val);
    }

    #[test]
    fn flex_bool_numbers_null_and_containers() {
        let two: FlexBool = serde_json::from_value(json!(2)).unwrap();
        assert!(two.val);
        let zero: FlexBool = serde_json::from_value(json!(0)).unwrap();
        assert!(!zero.val);
        let nil: FlexBool = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(nil, FlexBool::new(false));
        let arr: FlexBool = serde_json::from_value(json!([1, 2])).unwrap();
        assert!(!arr.val);
    }

    #[test]
    fn ip_geo_empty_array_is_default() {
        let geo: IpGeo = serde_json::from_str("[]").unwrap();
        assert_eq!(geo, IpGeo::default());

        let geo: IpGeo =
            serde_json::from_value(json!({"asn": 15169, "city": "Mountain View"})).unwrap();
        assert_eq!(geo.asn, 15169);
        assert_eq!(geo.city, "Mountain View");
    }
}
