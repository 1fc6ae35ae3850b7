use crate::{Codec, Format};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_tolerant::{OneOrMany, StringOr};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Job {
    #[serde(with = "serde_tolerant::boolean")]
    enabled: bool,
    #[serde(with = "serde_tolerant::number::int32")]
    retries: i32,
    #[serde(with = "serde_tolerant::datetime")]
    scheduled_at: DateTime<Utc>,
    #[serde(with = "serde_tolerant::blank_string", default)]
    comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct Endpoint {
    url: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Manifest {
    targets: OneOrMany<Endpoint>,
    source: StringOr<Endpoint>,
}

fn job() -> Job {
    Job {
        enabled: true,
        retries: 3,
        scheduled_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        comment: None,
    }
}

#[test]
fn json_decodes_drifting_payloads() {
    let decoded: Job = Codec::json()
        .decode(
            r#"{
                "enabled": "yes",
                "retries": "3",
                "scheduled_at": 1700000000000,
                "comment": "   "
            }"#,
        )
        .unwrap();
    assert_eq!(decoded, job());
}

#[test]
fn json_round_trips_canonical_output() {
    let codec = Codec::json();
    let encoded = codec.encode(&job()).unwrap();
    assert_eq!(
        encoded,
        r#"{"enabled":true,"retries":3,"scheduled_at":"2023-11-14T22:13:20Z","comment":null}"#
    );
    let decoded: Job = codec.decode(&encoded).unwrap();
    assert_eq!(decoded, job());
}

#[test]
fn xml_decodes_the_all_strings_token_grammar() {
    let decoded: Job = Codec::xml()
        .decode(
            "<Job>\
                <enabled>yes</enabled>\
                <retries>3</retries>\
                <scheduled_at>1700000000</scheduled_at>\
                <comment></comment>\
            </Job>",
        )
        .unwrap();
    assert_eq!(decoded, job());
}

#[test]
fn xml_round_trips_through_the_same_codec() {
    let codec = Codec::xml();
    let encoded = codec.encode(&job()).unwrap();
    let decoded: Job = codec.decode(&encoded).unwrap();
    assert_eq!(decoded, job());
}

#[test]
fn union_shapes_flow_through_the_json_backend() {
    let codec = Codec::json();
    let decoded: Manifest = codec
        .decode(r#"{"targets":{"url":"a"},"source":"inline"}"#)
        .unwrap();
    assert_eq!(decoded.targets.len(), 1);
    assert_eq!(decoded.source, StringOr::text("inline"));
    let encoded = codec.encode(&decoded).unwrap();
    assert_eq!(encoded, r#"{"targets":[{"url":"a"}],"source":"inline"}"#);
}

#[test]
fn pretty_output_is_still_decodable() {
    let codec = Codec::json();
    let encoded = codec.encode_pretty(&job()).unwrap();
    assert!(encoded.contains('\n'));
    let decoded: Job = codec.decode(&encoded).unwrap();
    assert_eq!(decoded, job());
}

#[test]
fn codec_is_built_explicitly() {
    assert_eq!(Codec::default().format(), Format::Json);
    assert_eq!(Codec::new(Format::Xml).format(), Format::Xml);
}
