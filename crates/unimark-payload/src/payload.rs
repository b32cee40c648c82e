//! Metadata payload types and their canonical serialization (component D).

use serde_json::{Map, Value};

use crate::error::PayloadError;
use crate::timestamp::normalize_timestamp;

/// Reserved top-level field names for the basic payload form. A `custom`
/// entry sharing one of these names is a [`PayloadError::FieldCollision`].
pub const BASIC_RESERVED_FIELDS: &[&str] =
    &["signer_id", "timestamp", "model_id", "generation_id", "custom"];

/// Reserved top-level field names for the manifest payload form.
pub const MANIFEST_RESERVED_FIELDS: &[&str] = &[
    "signer_id",
    "timestamp",
    "claim_generator",
    "actions",
    "ai_info",
    "custom_claims",
];

/// A compact metadata record: the common case of signer/timestamp plus a
/// handful of well-known fields and an open bag of caller-defined data.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicPayload {
    pub signer_id: String,
    /// Accepted as epoch seconds (int/float) or an ISO-8601 string; see
    /// [`crate::timestamp::normalize_timestamp`] for the accepted forms.
    pub timestamp: Value,
    pub model_id: Option<String>,
    pub generation_id: Option<String>,
    pub custom: Map<String, Value>,
}

/// A nested metadata record modeled on a content-provenance manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestPayload {
    pub signer_id: String,
    pub timestamp: Value,
    pub claim_generator: String,
    pub actions: Vec<Value>,
    pub ai_info: Map<String, Value>,
    pub custom_claims: Map<String, Value>,
}

/// The two payload variants the envelope format tag distinguishes.
#[derive(Debug, Clone, PartialEq)]
pub enum Metadata {
    Basic(BasicPayload),
    Manifest(ManifestPayload),
}

impl Metadata {
    /// The wire format tag for this variant: `0 = basic`, `1 = manifest`.
    pub fn format_tag(&self) -> u8 {
        match self {
            Metadata::Basic(_) => 0,
            Metadata::Manifest(_) => 1,
        }
    }

    /// Serializes this payload to canonical JSON bytes: lexicographically
    /// key-sorted at every nesting level, no insignificant whitespace,
    /// timestamp normalized to second-precision ISO-8601 UTC.
    ///
    /// Fails with [`PayloadError::MissingRequiredField`] or
    /// [`PayloadError::FieldCollision`] per the contract in §4.4; those
    /// checks run before serialization so a caller never receives partially
    /// canonical bytes.
    pub fn canonicalize(&self) -> Result<Vec<u8>, PayloadError> {
        let value = match self {
            Metadata::Basic(p) => basic_to_value(p)?,
            Metadata::Manifest(p) => manifest_to_value(p)?,
        };
        // serde_json::Map is BTreeMap-backed without the `preserve_order`
        // feature, so key order here is already the required lexicographic
        // order; `to_vec` emits compact (no-whitespace) separators.
        serde_json::to_vec(&value).map_err(|e| PayloadError::CorruptPayload(e.to_string()))
    }

    /// Parses canonical payload bytes produced by [`Metadata::canonicalize`]
    /// (or an equivalent producer) back into a [`Metadata`] tree, given the
    /// wire format tag that accompanied them.
    pub fn from_canonical(format_tag: u8, bytes: &[u8]) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| PayloadError::CorruptPayload(e.to_string()))?;
        let obj = value
            .as_object()
            .ok_or_else(|| PayloadError::CorruptPayload("payload is not a JSON object".into()))?;

        match format_tag {
            0 => Ok(Metadata::Basic(basic_from_object(obj)?)),
            1 => Ok(Metadata::Manifest(manifest_from_object(obj)?)),
            other => Err(PayloadError::CorruptPayload(format!(
                "unrecognized format tag {other}"
            ))),
        }
    }

    /// Pulls `signer_id` out of canonical payload bytes without fully
    /// parsing the payload shape; used by verification before a key is
    /// resolved and the rest of the payload is trusted.
    pub fn peek_signer_id(bytes: &[u8]) -> Result<String, PayloadError> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| PayloadError::CorruptPayload(e.to_string()))?;
        value
            .get("signer_id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(PayloadError::MissingSignerId)
    }
}

fn require_string(obj: &Map<String, Value>, field: &'static str) -> Result<String, PayloadError> {
    obj.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(PayloadError::MissingRequiredField(field))
}

fn require_timestamp(obj: &Map<String, Value>) -> Result<Value, PayloadError> {
    obj.get("timestamp")
        .cloned()
        .ok_or(PayloadError::MissingRequiredField("timestamp"))
}

fn check_no_collision(
    custom: &Map<String, Value>,
    reserved: &[&str],
) -> Result<(), PayloadError> {
    for key in custom.keys() {
        if reserved.contains(&key.as_str()) {
            return Err(PayloadError::FieldCollision(key.clone()));
        }
    }
    Ok(())
}

fn basic_to_value(p: &BasicPayload) -> Result<Value, PayloadError> {
    if p.signer_id.is_empty() {
        return Err(PayloadError::MissingRequiredField("signer_id"));
    }
    check_no_collision(&p.custom, BASIC_RESERVED_FIELDS)?;

    let mut obj = Map::new();
    obj.insert("signer_id".into(), Value::String(p.signer_id.clone()));
    obj.insert(
        "timestamp".into(),
        Value::String(normalize_timestamp(&p.timestamp)?),
    );
    if let Some(model_id) = &p.model_id {
        obj.insert("model_id".into(), Value::String(model_id.clone()));
    }
    if let Some(generation_id) = &p.generation_id {
        obj.insert("generation_id".into(), Value::String(generation_id.clone()));
    }
    if !p.custom.is_empty() {
        obj.insert("custom".into(), Value::Object(p.custom.clone()));
    }
    Ok(Value::Object(obj))
}

fn basic_from_object(obj: &Map<String, Value>) -> Result<BasicPayload, PayloadError> {
    let signer_id = require_string(obj, "signer_id")?;
    let timestamp = require_timestamp(obj)?;
    let model_id = obj.get("model_id").and_then(Value::as_str).map(str::to_string);
    let generation_id = obj
        .get("generation_id")
        .and_then(Value::as_str)
        .map(str::to_string);
    let custom = obj
        .get("custom")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    Ok(BasicPayload {
        signer_id,
        timestamp,
        model_id,
        generation_id,
        custom,
    })
}

fn manifest_to_value(p: &ManifestPayload) -> Result<Value, PayloadError> {
    if p.signer_id.is_empty() {
        return Err(PayloadError::MissingRequiredField("signer_id"));
    }
    check_no_collision(&p.custom_claims, MANIFEST_RESERVED_FIELDS)?;
    check_no_collision(&p.ai_info, MANIFEST_RESERVED_FIELDS)?;

    let mut obj = Map::new();
    obj.insert("signer_id".into(), Value::String(p.signer_id.clone()));
    obj.insert(
        "timestamp".into(),
        Value::String(normalize_timestamp(&p.timestamp)?),
    );
    obj.insert(
        "claim_generator".into(),
        Value::String(p.claim_generator.clone()),
    );
    obj.insert("actions".into(), Value::Array(p.actions.clone()));
    obj.insert("ai_info".into(), Value::Object(p.ai_info.clone()));
    obj.insert("custom_claims".into(), Value::Object(p.custom_claims.clone()));
    Ok(Value::Object(obj))
}

fn manifest_from_object(obj: &Map<String, Value>) -> Result<ManifestPayload, PayloadError> {
    let signer_id = require_string(obj, "signer_id")?;
    let timestamp = require_timestamp(obj)?;
    let claim_generator = obj
        .get("claim_generator")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default();
    let actions = obj
        .get("actions")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let ai_info = obj
        .get("ai_info")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    let custom_claims = obj
        .get("custom_claims")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    Ok(ManifestPayload {
        signer_id,
        timestamp,
        claim_generator,
        actions,
        ai_info,
        custom_claims,
    })
}
