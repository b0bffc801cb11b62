//! Serde support for [`GlyphId`].
//!
//! Human-readable formats use the `txid:vout` string. Other formats use a
//! `(txid, vout)` tuple.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::id::GlyphId;

impl Serialize for GlyphId {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        if s.is_human_readable() {
            s.serialize_str(&self.to_string())
        } else {
            let mut tuple = s.serialize_tuple(2)?;
            tuple.serialize_element(self.txid())?;
            tuple.serialize_element(&self.vout())?;
            tuple.end()
        }
    }
}

impl<'de> Deserialize<'de> for GlyphId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        if d.is_human_readable() {
            struct StrVisitor;

            impl de::Visitor<'_> for StrVisitor {
                type Value = GlyphId;

                fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "a txid:vout string")
                }

                fn visit_str<E: de::Error>(self, v: &str) -> Result<GlyphId, E> {
                    GlyphId::from_str(v).map_err(E::custom)
                }
            }

            d.deserialize_str(StrVisitor)
        } else {
            struct TupleVisitor;

            impl<'de> Visitor<'de> for TupleVisitor {
                type Value = GlyphId;

                fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "a (txid, vout) tuple")
                }

                fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<GlyphId, A::Error> {
                    let txid: String = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                    let vout: u32 = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                    Ok(GlyphId::new(txid, vout))
                }
            }

            d.deserialize_tuple(2, TupleVisitor)
        }
    }
}
