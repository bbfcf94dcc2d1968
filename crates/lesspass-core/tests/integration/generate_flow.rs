//! Derivation pipeline: profile resolution, entropy, rendering.

use std::collections::HashSet;

use lesspass_core::charset::CharacterClass;
use lesspass_core::entropy::derive_entropy;
use lesspass_core::error::LessPassError;
use lesspass_core::profile::{resolve_profile, ProfileOverrides};
use lesspass_core::render::render_password;
use lesspass_core::{derive_password, generate_password};

/// Few iterations keep the pipeline tests quick.
fn quick(overrides: ProfileOverrides) -> ProfileOverrides {
    ProfileOverrides {
        iterations: Some(2),
        ..overrides
    }
}

#[test]
fn pipeline_stages_compose() {
    let overrides = quick(ProfileOverrides::default());
    let profile = resolve_profile(Some(&overrides)).unwrap();

    let entropy = derive_entropy("github.com", "octocat", "hunter2", &profile).unwrap();
    let staged = render_password(entropy.as_hex(), &profile).unwrap();

    assert_eq!(
        generate_password("github.com", "octocat", "hunter2", Some(&overrides)).unwrap(),
        staged
    );
    assert_eq!(
        derive_password("github.com", "octocat", "hunter2", &profile).unwrap(),
        staged
    );
}

#[test]
fn repeated_calls_agree() {
    let overrides = quick(ProfileOverrides::default());
    let first = generate_password("a.org", "alice", "correct horse", Some(&overrides)).unwrap();
    for _ in 0..5 {
        assert_eq!(
            generate_password("a.org", "alice", "correct horse", Some(&overrides)).unwrap(),
            first
        );
    }
}

#[test]
fn counter_changes_password() {
    let passwords: HashSet<String> = (1..=20)
        .map(|counter| {
            let overrides = quick(ProfileOverrides {
                counter: Some(counter),
                ..ProfileOverrides::default()
            });
            generate_password("a.org", "alice", "correct horse", Some(&overrides)).unwrap()
        })
        .collect();
    assert_eq!(passwords.len(), 20, "two counters produced the same password");
}

#[test]
fn each_input_changes_password() {
    let overrides = quick(ProfileOverrides::default());
    let base = generate_password("a.org", "alice", "secret", Some(&overrides)).unwrap();
    for (site, login, master) in [
        ("b.org", "alice", "secret"),
        ("a.org", "bob", "secret"),
        ("a.org", "alice", "Secret"),
    ] {
        assert_ne!(
            generate_password(site, login, master, Some(&overrides)).unwrap(),
            base,
            "{site}/{login} collided"
        );
    }
}

#[test]
fn lengths_are_exact_and_covered() {
    for length in 4..=64 {
        let overrides = quick(ProfileOverrides {
            length: Some(length),
            ..ProfileOverrides::default()
        });
        let password = generate_password("a.org", "alice", "secret", Some(&overrides)).unwrap();
        assert_eq!(password.chars().count(), length);
        for class in CharacterClass::ALL {
            assert!(
                password.chars().any(|c| class.charset().contains(c)),
                "{password} has no {class} character"
            );
        }
    }
}

#[test]
fn non_ascii_inputs_are_accepted() {
    let overrides = quick(ProfileOverrides::default());
    let password = generate_password("exämple.org", "ünïcode", "pässwörd🔑", Some(&overrides)).unwrap();
    assert_eq!(password.len(), 16);
}

#[test]
fn all_classes_disabled_is_rejected() {
    let overrides = ProfileOverrides {
        lowercase: Some(false),
        uppercase: Some(false),
        numbers: Some(false),
        symbols: Some(false),
        ..ProfileOverrides::default()
    };
    assert_eq!(
        generate_password("a.org", "alice", "secret", Some(&overrides)),
        Err(LessPassError::EmptyCharacterPool)
    );
}

#[test]
fn too_short_for_classes_is_rejected() {
    let overrides = ProfileOverrides {
        length: Some(2),
        symbols: Some(false),
        ..ProfileOverrides::default()
    };
    assert_eq!(
        generate_password("a.org", "alice", "secret", Some(&overrides)),
        Err(LessPassError::InvalidLength {
            length: 2,
            required: 3
        })
    );
}
