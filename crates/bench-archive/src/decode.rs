//! Decoder: generic archive trees back to domain values.
//!
//! The decoder mirrors the encoder exactly. Scalars pass through,
//! arrays decode element-wise, and objects are either tagged
//! envelopes (dispatched through the type tag registry) or ordinary
//! mappings holding `[encoded_key, encoded_value]` pairs.

use serde_json::{Map, Number, Value};

use bench_model::{
    BenchMap, BenchValue, Group, Parameters, Trial, TrialEstimate, TrialJudgement, TrialRatio,
    Verdict,
};

use crate::error::{ArchiveError, Result};
use crate::registry::{FIELDS_KEY, FORMAT_MAGIC, FORMAT_TAG_KEY, TYPE_KEY, TypeTag};

/// Decode a generic tree into a domain value.
///
/// Fails with [`ArchiveError::NotSerializable`] on the `Definition`
/// tag, [`ArchiveError::UnknownType`] on an unregistered tag, and
/// [`ArchiveError::MissingField`]/[`ArchiveError::Malformed`] when a
/// node's shape does not match its type.
pub fn decode(node: &Value) -> Result<BenchValue> {
    match node {
        Value::Null => Ok(BenchValue::Null),
        Value::Bool(b) => Ok(BenchValue::Bool(*b)),
        Value::Number(n) => Ok(decode_number(n)),
        Value::String(s) => Ok(BenchValue::Str(s.clone())),
        Value::Array(items) => {
            let decoded: Result<Vec<BenchValue>> = items.iter().map(decode).collect();
            Ok(BenchValue::Seq(decoded?))
        }
        Value::Object(map) => {
            if is_envelope(map) {
                decode_envelope(map)
            } else {
                decode_pairs(map)
            }
        }
    }
}

fn decode_number(n: &Number) -> BenchValue {
    match n.as_i64() {
        Some(i) => BenchValue::Int(i),
        // Explicit floats and out-of-range unsigned values land here.
        None => BenchValue::Float(n.as_f64().unwrap_or_default()),
    }
}

/// An object is an envelope iff it carries the format tag key with the
/// exact magic value.
fn is_envelope(map: &Map<String, Value>) -> bool {
    matches!(map.get(FORMAT_TAG_KEY), Some(Value::String(s)) if s == FORMAT_MAGIC)
}

/// Decode a tagged envelope by registry dispatch.
///
/// Once the format tag has committed the node to the envelope
/// interpretation, a missing or ill-typed `type` or `fields` entry is
/// a malformed tree, not ordinary user data. The `versions` entry is
/// metadata only and never consulted.
fn decode_envelope(map: &Map<String, Value>) -> Result<BenchValue> {
    let type_node = map
        .get(TYPE_KEY)
        .ok_or_else(|| ArchiveError::malformed("envelope is missing \"type\""))?;
    let type_name = type_node
        .as_str()
        .ok_or_else(|| ArchiveError::malformed("envelope \"type\" is not a string"))?;
    let tag = TypeTag::from_name(type_name).ok_or_else(|| ArchiveError::UnknownType {
        type_name: type_name.to_owned(),
    })?;

    match tag {
        TypeTag::Definition => Err(ArchiveError::NotSerializable),
        TypeTag::Tuple => {
            let items = fields_node(map, tag)?
                .as_array()
                .ok_or_else(|| ArchiveError::malformed("Tuple fields must be a sequence"))?;
            let decoded: Result<Vec<BenchValue>> = items.iter().map(decode).collect();
            Ok(BenchValue::Tuple(decoded?))
        }
        TypeTag::Parameters => {
            let fields = record_fields(map, tag)?;
            Ok(BenchValue::Params(decode_parameters(fields)?))
        }
        TypeTag::Trial => {
            let fields = record_fields(map, tag)?;
            Ok(BenchValue::Trial(decode_trial(fields)?))
        }
        TypeTag::TrialEstimate => {
            let fields = record_fields(map, tag)?;
            Ok(BenchValue::Estimate(decode_estimate(fields)?))
        }
        TypeTag::TrialRatio => {
            let fields = record_fields(map, tag)?;
            Ok(BenchValue::Ratio(decode_ratio(fields)?))
        }
        TypeTag::TrialJudgement => {
            let fields = record_fields(map, tag)?;
            Ok(BenchValue::Judgement(decode_judgement(fields)?))
        }
        TypeTag::Group => {
            let fields = record_fields(map, tag)?;
            Ok(BenchValue::Group(decode_group(fields)?))
        }
    }
}

/// Decode an ordinary mapping node.
///
/// The object's own keys are placeholder slots and are ignored; every
/// slot value must be the 2-element `[encoded_key, encoded_value]`
/// pair the encoder produces.
fn decode_pairs(map: &Map<String, Value>) -> Result<BenchValue> {
    let mut out = BenchMap::new();
    for node in map.values() {
        let pair = node
            .as_array()
            .ok_or_else(|| ArchiveError::malformed("mapping slot does not hold a key/value pair"))?;
        let [key, value] = pair.as_slice() else {
            return Err(ArchiveError::malformed(format!(
                "mapping pair has {} elements, expected 2",
                pair.len()
            )));
        };
        out.insert(decode(key)?, decode(value)?);
    }
    Ok(BenchValue::Map(out))
}

fn fields_node<'a>(map: &'a Map<String, Value>, tag: TypeTag) -> Result<&'a Value> {
    map.get(FIELDS_KEY).ok_or_else(|| {
        ArchiveError::malformed(format!("{} envelope is missing \"fields\"", tag.name()))
    })
}

/// Fetch a record's field mapping and check the registry's field list
/// is present before any per-field extraction.
fn record_fields<'a>(map: &'a Map<String, Value>, tag: TypeTag) -> Result<&'a Map<String, Value>> {
    let fields = fields_node(map, tag)?.as_object().ok_or_else(|| {
        ArchiveError::malformed(format!("{} fields must be a mapping", tag.name()))
    })?;
    for name in tag.field_names() {
        if !fields.contains_key(*name) {
            return Err(ArchiveError::MissingField {
                type_name: tag.name(),
                field: name,
            });
        }
    }
    Ok(fields)
}

fn decode_parameters(fields: &Map<String, Value>) -> Result<Parameters> {
    let tag = TypeTag::Parameters;
    Ok(Parameters {
        seconds: f64_field(tag, fields, "seconds")?,
        samples: u64_field(tag, fields, "samples")?,
        evals: u64_field(tag, fields, "evals")?,
        overhead: f64_field(tag, fields, "overhead")?,
        gctrial: bool_field(tag, fields, "gctrial")?,
        gcsample: bool_field(tag, fields, "gcsample")?,
        time_tolerance: f64_field(tag, fields, "time_tolerance")?,
        memory_tolerance: f64_field(tag, fields, "memory_tolerance")?,
    })
}

fn decode_trial(fields: &Map<String, Value>) -> Result<Trial> {
    let tag = TypeTag::Trial;
    Ok(Trial {
        params: params_field(tag, fields)?,
        times: number_seq_field(tag, fields, "times")?,
        gctimes: number_seq_field(tag, fields, "gctimes")?,
        memory: u64_field(tag, fields, "memory")?,
        allocs: u64_field(tag, fields, "allocs")?,
    })
}

fn decode_estimate(fields: &Map<String, Value>) -> Result<TrialEstimate> {
    let tag = TypeTag::TrialEstimate;
    Ok(TrialEstimate {
        params: params_field(tag, fields)?,
        time: f64_field(tag, fields, "time")?,
        gctime: f64_field(tag, fields, "gctime")?,
        memory: u64_field(tag, fields, "memory")?,
        allocs: u64_field(tag, fields, "allocs")?,
    })
}

fn decode_ratio(fields: &Map<String, Value>) -> Result<TrialRatio> {
    let tag = TypeTag::TrialRatio;
    Ok(TrialRatio {
        params: params_field(tag, fields)?,
        time: f64_field(tag, fields, "time")?,
        gctime: f64_field(tag, fields, "gctime")?,
        memory: f64_field(tag, fields, "memory")?,
        allocs: f64_field(tag, fields, "allocs")?,
    })
}

fn decode_judgement(fields: &Map<String, Value>) -> Result<TrialJudgement> {
    let tag = TypeTag::TrialJudgement;
    let ratio = match decode(field(tag, fields, "ratio")?)? {
        BenchValue::Ratio(ratio) => ratio,
        _ => {
            return Err(ArchiveError::malformed(
                "TrialJudgement.ratio is not a TrialRatio envelope",
            ));
        }
    };
    Ok(TrialJudgement {
        ratio,
        time: verdict_field(tag, fields, "time")?,
        memory: verdict_field(tag, fields, "memory")?,
    })
}

fn decode_group(fields: &Map<String, Value>) -> Result<Group> {
    let tag = TypeTag::Group;
    let tags = string_seq_field(tag, fields, "tags")?;
    let data = match decode(field(tag, fields, "data")?)? {
        BenchValue::Map(map) => map,
        _ => return Err(ArchiveError::malformed("Group.data is not a mapping")),
    };
    Ok(Group { tags, data })
}

fn field<'a>(
    tag: TypeTag,
    fields: &'a Map<String, Value>,
    name: &'static str,
) -> Result<&'a Value> {
    fields.get(name).ok_or(ArchiveError::MissingField {
        type_name: tag.name(),
        field: name,
    })
}

fn f64_field(tag: TypeTag, fields: &Map<String, Value>, name: &'static str) -> Result<f64> {
    field(tag, fields, name)?.as_f64().ok_or_else(|| {
        ArchiveError::malformed(format!("{}.{name} is not a number", tag.name()))
    })
}

fn u64_field(tag: TypeTag, fields: &Map<String, Value>, name: &'static str) -> Result<u64> {
    field(tag, fields, name)?.as_u64().ok_or_else(|| {
        ArchiveError::malformed(format!("{}.{name} is not an unsigned integer", tag.name()))
    })
}

fn bool_field(tag: TypeTag, fields: &Map<String, Value>, name: &'static str) -> Result<bool> {
    field(tag, fields, name)?.as_bool().ok_or_else(|| {
        ArchiveError::malformed(format!("{}.{name} is not a boolean", tag.name()))
    })
}

fn number_seq_field(
    tag: TypeTag,
    fields: &Map<String, Value>,
    name: &'static str,
) -> Result<Vec<f64>> {
    let items = field(tag, fields, name)?.as_array().ok_or_else(|| {
        ArchiveError::malformed(format!("{}.{name} is not a sequence", tag.name()))
    })?;
    items
        .iter()
        .map(|item| {
            item.as_f64().ok_or_else(|| {
                ArchiveError::malformed(format!("{}.{name} holds a non-number", tag.name()))
            })
        })
        .collect()
}

fn string_seq_field(
    tag: TypeTag,
    fields: &Map<String, Value>,
    name: &'static str,
) -> Result<Vec<String>> {
    let items = field(tag, fields, name)?.as_array().ok_or_else(|| {
        ArchiveError::malformed(format!("{}.{name} is not a sequence", tag.name()))
    })?;
    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_owned).ok_or_else(|| {
                ArchiveError::malformed(format!("{}.{name} holds a non-string", tag.name()))
            })
        })
        .collect()
}

fn verdict_field(tag: TypeTag, fields: &Map<String, Value>, name: &'static str) -> Result<Verdict> {
    let text = field(tag, fields, name)?.as_str().ok_or_else(|| {
        ArchiveError::malformed(format!("{}.{name} is not a string", tag.name()))
    })?;
    text.parse()
        .map_err(|err: bench_model::ParseVerdictError| ArchiveError::malformed(err.to_string()))
}

fn params_field(tag: TypeTag, fields: &Map<String, Value>) -> Result<Parameters> {
    match decode(field(tag, fields, "params")?)? {
        BenchValue::Params(params) => Ok(params),
        _ => Err(ArchiveError::malformed(format!(
            "{}.params is not a Parameters envelope",
            tag.name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::encode::encode;

    fn envelope(type_name: &str, fields: Value) -> Value {
        json!({
            FORMAT_TAG_KEY: FORMAT_MAGIC,
            TYPE_KEY: type_name,
            "versions": {},
            FIELDS_KEY: fields,
        })
    }

    #[test]
    fn test_bare_scalar_sequence_decodes_to_itself() {
        let decoded = decode(&json!([10, 12, 11])).unwrap();
        assert_eq!(
            decoded,
            BenchValue::Seq(vec![10_i64.into(), 12_i64.into(), 11_i64.into()])
        );
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result = decode(&envelope("Benchmark", json!({})));
        assert!(matches!(
            result,
            Err(ArchiveError::UnknownType { type_name }) if type_name == "Benchmark"
        ));
    }

    #[test]
    fn test_definition_tag_is_rejected() {
        let result = decode(&envelope("Definition", json!({})));
        assert!(matches!(result, Err(ArchiveError::NotSerializable)));
    }

    #[test]
    fn test_missing_field_names_type_and_field() {
        let tree = envelope("Trial", json!({"params": null}));
        let result = decode(&tree);
        assert!(matches!(
            result,
            Err(ArchiveError::MissingField {
                type_name: "Trial",
                field: "times",
            })
        ));
    }

    #[test]
    fn test_committed_envelope_without_type_is_malformed() {
        let tree = json!({ FORMAT_TAG_KEY: FORMAT_MAGIC });
        let result = decode(&tree);
        assert!(matches!(result, Err(ArchiveError::Malformed { .. })));
    }

    #[test]
    fn test_tag_key_with_wrong_magic_is_ordinary_data() {
        // Without the exact magic value this is user data, and its
        // values must then be key/value pairs.
        let tree = json!({ FORMAT_TAG_KEY: "cafebabe" });
        assert!(matches!(decode(&tree), Err(ArchiveError::Malformed { .. })));

        let tree = json!({ FORMAT_TAG_KEY: ["cafebabe", 1] });
        let decoded = decode(&tree).unwrap();
        let mut expected = BenchMap::new();
        expected.insert("cafebabe", 1);
        assert_eq!(decoded, BenchValue::Map(expected));
    }

    #[test]
    fn test_mapping_slot_names_are_ignored() {
        let tree = json!({
            "anything at all": [1, "a"],
            "slots are not read back": ["x", 2],
        });
        let decoded = decode(&tree).unwrap();
        let BenchValue::Map(map) = decoded else {
            panic!("expected a mapping");
        };
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&BenchValue::Int(1)), Some(&BenchValue::Str("a".into())));
        assert_eq!(map.get(&BenchValue::Str("x".into())), Some(&BenchValue::Int(2)));
    }

    #[test]
    fn test_mapping_pair_arity_is_checked() {
        let tree = json!({"00000000": [1, 2, 3]});
        assert!(matches!(decode(&tree), Err(ArchiveError::Malformed { .. })));
    }

    #[test]
    fn test_versions_are_ignored_on_decode() {
        let mut tree = encode(&BenchValue::Params(Parameters::default())).unwrap();
        tree.as_object_mut()
            .unwrap()
            .insert("versions".to_owned(), json!({"bench-archive": "99.0.0"}));
        assert!(decode(&tree).is_ok());
    }

    #[test]
    fn test_integer_fields_accept_integral_numbers() {
        // A hand-written tree may spell a float field as an integer.
        let tree = envelope(
            "Parameters",
            json!({
                "seconds": 5,
                "samples": 100,
                "evals": 1,
                "overhead": 0,
                "gctrial": true,
                "gcsample": false,
                "time_tolerance": 0.05,
                "memory_tolerance": 0.01,
            }),
        );
        let decoded = decode(&tree).unwrap();
        let BenchValue::Params(params) = decoded else {
            panic!("expected parameters");
        };
        assert_eq!(params.seconds, 5.0);
        assert_eq!(params.samples, 100);
    }
}
