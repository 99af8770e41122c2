//! Encoder: domain values to generic archive trees.
//!
//! The encoder is a pure recursive function from [`BenchValue`] to
//! [`serde_json::Value`]. Scalars pass through unchanged, sequences
//! encode element-wise, mappings use the key-pair scheme described on
//! [`encode_map`], and record types are wrapped in tagged envelopes
//! the decoder dispatches on.

use serde_json::{Map, Number, Value};

use bench_model::{
    BenchMap, BenchValue, Group, Parameters, Trial, TrialEstimate, TrialJudgement, TrialRatio,
};

use crate::error::{ArchiveError, Result};
use crate::registry::{
    FIELDS_KEY, FORMAT_MAGIC, FORMAT_TAG_KEY, TYPE_KEY, TypeTag, VERSIONS_KEY, version_info,
};

/// Encode a domain value as a generic tree.
///
/// Total over every [`BenchValue`] variant except
/// [`BenchValue::Definition`], which fails with
/// [`ArchiveError::NotSerializable`] before any output is produced.
pub fn encode(value: &BenchValue) -> Result<Value> {
    match value {
        BenchValue::Null => Ok(Value::Null),
        BenchValue::Bool(b) => Ok(Value::Bool(*b)),
        BenchValue::Int(i) => Ok(Value::from(*i)),
        BenchValue::Float(f) => number(*f),
        BenchValue::Str(s) => Ok(Value::from(s.as_str())),
        BenchValue::Seq(items) => Ok(Value::Array(encode_all(items)?)),
        BenchValue::Map(map) => encode_map(map),
        BenchValue::Tuple(items) => Ok(envelope(
            TypeTag::Tuple,
            Value::Array(encode_all(items)?),
        )),
        BenchValue::Params(params) => Ok(envelope(TypeTag::Parameters, params_fields(params)?)),
        BenchValue::Trial(trial) => Ok(envelope(TypeTag::Trial, trial_fields(trial)?)),
        BenchValue::Estimate(estimate) => Ok(envelope(
            TypeTag::TrialEstimate,
            estimate_fields(estimate)?,
        )),
        BenchValue::Ratio(ratio) => Ok(envelope(TypeTag::TrialRatio, ratio_fields(ratio)?)),
        BenchValue::Judgement(judgement) => Ok(envelope(
            TypeTag::TrialJudgement,
            judgement_fields(judgement)?,
        )),
        BenchValue::Group(group) => Ok(envelope(TypeTag::Group, group_fields(group)?)),
        BenchValue::Definition(_) => Err(ArchiveError::NotSerializable),
    }
}

fn encode_all(items: &[BenchValue]) -> Result<Vec<Value>> {
    items.iter().map(encode).collect()
}

/// Encode a mapping using the key-pair scheme.
///
/// Each entry occupies a fresh placeholder slot whose value is the
/// `[encoded_key, encoded_value]` pair; the slot string itself is
/// never read back. This keeps non-string keys intact through the
/// string-keyed tree format. Slots are zero-padded entry indices so
/// the tree's sorted-key object representation replays insertion
/// order.
fn encode_map(map: &BenchMap) -> Result<Value> {
    let mut slots = Map::new();
    for (index, (key, value)) in map.iter().enumerate() {
        let pair = Value::Array(vec![encode(key)?, encode(value)?]);
        slots.insert(format!("{index:08}"), pair);
    }
    Ok(Value::Object(slots))
}

/// Wrap encoded fields in a tagged envelope.
fn envelope(tag: TypeTag, fields: Value) -> Value {
    let mut map = Map::new();
    map.insert(FORMAT_TAG_KEY.to_owned(), Value::from(FORMAT_MAGIC));
    map.insert(TYPE_KEY.to_owned(), Value::from(tag.name()));
    map.insert(VERSIONS_KEY.to_owned(), versions_node());
    map.insert(FIELDS_KEY.to_owned(), fields);
    Value::Object(map)
}

fn versions_node() -> Value {
    let pairs = version_info()
        .iter()
        .map(|(component, version)| ((*component).to_owned(), Value::from(*version)));
    Value::Object(pairs.collect())
}

fn number(value: f64) -> Result<Value> {
    Number::from_f64(value)
        .map(Value::Number)
        .ok_or(ArchiveError::NonFinite { value })
}

fn number_seq(values: &[f64]) -> Result<Value> {
    let nodes: Result<Vec<Value>> = values.iter().map(|&v| number(v)).collect();
    Ok(Value::Array(nodes?))
}

fn put(fields: &mut Map<String, Value>, name: &str, node: Value) {
    fields.insert(name.to_owned(), node);
}

fn params_fields(params: &Parameters) -> Result<Value> {
    let mut fields = Map::new();
    put(&mut fields, "seconds", number(params.seconds)?);
    put(&mut fields, "samples", Value::from(params.samples));
    put(&mut fields, "evals", Value::from(params.evals));
    put(&mut fields, "overhead", number(params.overhead)?);
    put(&mut fields, "gctrial", Value::Bool(params.gctrial));
    put(&mut fields, "gcsample", Value::Bool(params.gcsample));
    put(&mut fields, "time_tolerance", number(params.time_tolerance)?);
    put(
        &mut fields,
        "memory_tolerance",
        number(params.memory_tolerance)?,
    );
    Ok(Value::Object(fields))
}

fn trial_fields(trial: &Trial) -> Result<Value> {
    let mut fields = Map::new();
    put(
        &mut fields,
        "params",
        envelope(TypeTag::Parameters, params_fields(&trial.params)?),
    );
    put(&mut fields, "times", number_seq(&trial.times)?);
    put(&mut fields, "gctimes", number_seq(&trial.gctimes)?);
    put(&mut fields, "memory", Value::from(trial.memory));
    put(&mut fields, "allocs", Value::from(trial.allocs));
    Ok(Value::Object(fields))
}

fn estimate_fields(estimate: &TrialEstimate) -> Result<Value> {
    let mut fields = Map::new();
    put(
        &mut fields,
        "params",
        envelope(TypeTag::Parameters, params_fields(&estimate.params)?),
    );
    put(&mut fields, "time", number(estimate.time)?);
    put(&mut fields, "gctime", number(estimate.gctime)?);
    put(&mut fields, "memory", Value::from(estimate.memory));
    put(&mut fields, "allocs", Value::from(estimate.allocs));
    Ok(Value::Object(fields))
}

fn ratio_fields(ratio: &TrialRatio) -> Result<Value> {
    let mut fields = Map::new();
    put(
        &mut fields,
        "params",
        envelope(TypeTag::Parameters, params_fields(&ratio.params)?),
    );
    put(&mut fields, "time", number(ratio.time)?);
    put(&mut fields, "gctime", number(ratio.gctime)?);
    put(&mut fields, "memory", number(ratio.memory)?);
    put(&mut fields, "allocs", number(ratio.allocs)?);
    Ok(Value::Object(fields))
}

fn judgement_fields(judgement: &TrialJudgement) -> Result<Value> {
    let mut fields = Map::new();
    put(
        &mut fields,
        "ratio",
        envelope(TypeTag::TrialRatio, ratio_fields(&judgement.ratio)?),
    );
    put(&mut fields, "time", Value::from(judgement.time.as_str()));
    put(&mut fields, "memory", Value::from(judgement.memory.as_str()));
    Ok(Value::Object(fields))
}

fn group_fields(group: &Group) -> Result<Value> {
    let mut fields = Map::new();
    let tags = group.tags.iter().map(|tag| Value::from(tag.as_str()));
    put(&mut fields, "tags", Value::Array(tags.collect()));
    put(&mut fields, "data", encode_map(&group.data)?);
    Ok(Value::Object(fields))
}
