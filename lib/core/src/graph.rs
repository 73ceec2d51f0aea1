// Vertices and weighted directed edges
use serde::{Deserialize, Serialize};

/// Opaque, JSON-shaped vertex payload
pub type VertexData = serde_json::Value;

pub type VertexId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub id: VertexId,
    #[serde(default)]
    pub data: VertexData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    #[serde(with = "weight")]
    pub weight: f64,
}

impl Vertex {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<VertexId>, data: VertexData) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

impl Edge {
    #[inline]
    #[must_use]
    pub fn new(from: impl Into<VertexId>, to: impl Into<VertexId>, weight: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }

    /// Same ordered endpoints and bitwise-equal weight (NaN == NaN)
    #[inline]
    pub fn same_as(&self, other: &Edge) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.weight.to_bits() == other.weight.to_bits()
    }
}

/// Serde adapter for edge weights.
///
/// JSON has no literal for NaN or the infinities, so finite weights are
/// written as numbers and the rest as the strings `"NaN"`, `"Infinity"`
/// and `"-Infinity"`. Reading also accepts `null` as NaN.
pub mod weight {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(weight: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if weight.is_finite() {
            serializer.serialize_f64(*weight)
        } else if weight.is_nan() {
            serializer.serialize_str("NaN")
        } else if weight.is_sign_positive() {
            serializer.serialize_str("Infinity")
        } else {
            serializer.serialize_str("-Infinity")
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(WeightVisitor)
    }

    struct WeightVisitor;

    impl<'de> Visitor<'de> for WeightVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number, null, or one of \"NaN\", \"Infinity\", \"-Infinity\"")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            match v {
                "NaN" => Ok(f64::NAN),
                "Infinity" | "inf" => Ok(f64::INFINITY),
                "-Infinity" | "-inf" => Ok(f64::NEG_INFINITY),
                _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
            }
        }

        fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
            Ok(f64::NAN)
        }

        fn visit_none<E: de::Error>(self) -> Result<f64, E> {
            Ok(f64::NAN)
        }
    }
}
