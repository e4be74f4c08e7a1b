//! Turns a raw log line into the JSON document sent to Logstash.
//!
//! Lines that are JSON objects keep their fields and gain a `docker` key.
//! Anything else (plain text, arrays, scalars, `null`) is wrapped as
//! `{"message": <line>, "docker": {...}}`.
//!
//! Nesting depth is not limited, and `\u` escapes of unpaired UTF-16
//! surrogates are read as U+FFFD, so such objects are still merged.

use crate::error::Result;
use crate::message::DockerInfo;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key the container metadata is stored under.
pub const DOCKER_KEY: &str = "docker";

/// Wrapper for lines that are not JSON objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogstashMessage<'a> {
    pub message: &'a str,
    pub docker: &'a DockerInfo,
}

/// The document sent for one record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Envelope<'a> {
    /// The line was not a JSON object
    Wrapped(LogstashMessage<'a>),
    /// The line was a JSON object; `docker` has been set on it
    Merged(Map<String, Value>),
}

impl<'a> Envelope<'a> {
    /// Build the envelope for `raw`.
    ///
    /// An existing `docker` key in a JSON object line is overwritten with
    /// `docker`.
    pub fn from_raw(raw: &'a str, docker: &'a DockerInfo) -> Result<Self> {
        match parse_value(raw) {
            Some(Value::Object(mut fields)) => {
                fields.insert(DOCKER_KEY.to_string(), serde_json::to_value(docker)?);
                Ok(Envelope::Merged(fields))
            }
            _ => Ok(Envelope::Wrapped(LogstashMessage {
                message: raw,
                docker,
            })),
        }
    }

    pub fn is_merged(&self) -> bool {
        matches!(self, Envelope::Merged(_))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

fn parse_value(raw: &str) -> Option<Value> {
    parse_unbounded(raw).ok().or_else(|| {
        replace_lone_surrogates(raw).and_then(|fixed| parse_unbounded(&fixed).ok())
    })
}

fn parse_unbounded(raw: &str) -> serde_json::Result<Value> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}

/// Rewrite `\uXXXX` escapes of unpaired surrogates to `\ufffd`.
///
/// Returns `None` when nothing had to be replaced.
fn replace_lone_surrogates(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut replaced = false;
    let mut rest = raw;

    while let Some(pos) = rest.find('\\') {
        let (head, tail) = rest.split_at(pos);
        out.push_str(head);

        let (keep, len) = match unicode_escape(tail) {
            Some(0xD800..=0xDBFF)
                if matches!(
                    tail.get(6..).and_then(unicode_escape),
                    Some(0xDC00..=0xDFFF)
                ) =>
            {
                (true, 12)
            }
            Some(0xD800..=0xDFFF) => (false, 6),
            Some(_) => (true, 6),
            // Any other escape, including `\\`, is copied as is.
            None => (true, tail.char_indices().nth(2).map_or(tail.len(), |(i, _)| i)),
        };

        let (escape, remainder) = tail.split_at(len);
        if keep {
            out.push_str(escape);
        } else {
            out.push_str("\\ufffd");
            replaced = true;
        }
        rest = remainder;
    }
    out.push_str(rest);

    replaced.then_some(out)
}

/// Code unit of a `\uXXXX` escape at the start of `s`.
fn unicode_escape(s: &str) -> Option<u32> {
    let hex = s.strip_prefix("\\u")?.get(..4)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

/// Encode `raw` with `docker` attached, ready to be written to the collector.
pub fn normalize(raw: &str, docker: &DockerInfo) -> Result<Vec<u8>> {
    Envelope::from_raw(raw, docker)?.to_bytes()
}
