//! Profiles supplied as JSON mappings.

use lesspass_core::error::LessPassError;
use lesspass_core::generate_password;
use lesspass_core::profile::{resolve_profile, Digest, ProfileOverrides};
use serde_json::json;

const SITE: &str = "example.org";
const LOGIN: &str = "contact@example.org";
const MASTER: &str = "password";

#[test]
fn json_mapping_reproduces_reference_password() {
    let overrides = ProfileOverrides::from_json(r#"{"length": 14, "numbers": false}"#).unwrap();
    assert_eq!(
        generate_password(SITE, LOGIN, MASTER, Some(&overrides)).unwrap(),
        "sB>{qF}wN%/-fm"
    );
}

#[test]
fn json_value_mapping_resolves() {
    let overrides = ProfileOverrides::from_value(json!({
        "digest": "sha512",
        "iterations": 8192,
        "keylen": 16,
        "version": 2
    }))
    .unwrap();
    let profile = resolve_profile(Some(&overrides)).unwrap();
    assert_eq!(profile.digest, Digest::Sha512);
    assert_eq!(profile.iterations, 8192);
    assert_eq!(profile.keylen, 16);
    assert_eq!(profile.length, 16);
}

#[test]
fn empty_object_and_null_mean_defaults() {
    let empty = ProfileOverrides::from_json("{}").unwrap();
    let null = ProfileOverrides::from_json("null").unwrap();
    assert_eq!(empty, null);
    assert_eq!(
        resolve_profile(Some(&empty)).unwrap(),
        resolve_profile(None).unwrap()
    );
}

#[test]
fn overrides_serialize_only_explicit_keys() {
    let overrides = ProfileOverrides::from_json(r#"{"counter": 7}"#).unwrap();
    assert_eq!(
        serde_json::to_value(&overrides).unwrap(),
        json!({ "counter": 7 })
    );
}

#[test]
fn bad_values_are_reported() {
    let cases = [
        (r#"{"iterations": 0}"#, "iterations"),
        (r#"{"keylen": 0}"#, "keylen"),
        (r#"{"length": 0}"#, "length"),
        (r#"{"counter": 0}"#, "counter"),
        (r#"{"version": 1}"#, "version"),
    ];
    for (json, key) in cases {
        let overrides = ProfileOverrides::from_json(json).unwrap();
        let err = resolve_profile(Some(&overrides)).unwrap_err();
        assert!(
            matches!(err, LessPassError::InvalidProfileValue(ref m) if m.contains(key)),
            "{json} gave {err}"
        );
    }
}

#[test]
fn unsupported_digest_from_json() {
    let overrides = ProfileOverrides::from_json(r#"{"digest": "sha1"}"#).unwrap();
    assert_eq!(
        generate_password(SITE, LOGIN, MASTER, Some(&overrides)),
        Err(LessPassError::UnsupportedDigest("sha1".into()))
    );
}

#[test]
fn malformed_json_is_invalid_profile() {
    for json in ["{", "[1, 2]", r#"{"length": "16"}"#, r#"{"symbols": null, "length": -4}"#] {
        assert!(
            matches!(
                ProfileOverrides::from_json(json),
                Err(LessPassError::InvalidProfileValue(_))
            ),
            "accepted {json}"
        );
    }
}

#[test]
fn errors_render_readable_messages() {
    let overrides = ProfileOverrides::from_json(r#"{"length": 3}"#).unwrap();
    let err = resolve_profile(Some(&overrides)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid length: 3 is shorter than the 4 enabled character classes"
    );
}
