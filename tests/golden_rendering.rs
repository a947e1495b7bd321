//! Rendering determinism and golden-digest tests.

use std::fs;
use std::path::PathBuf;

use sharecard::compose::compose_card;
use sharecard::rendering::{capture, CAPTURE_SCALE, CARD_SIZE};
use sharecard::{CardConfig, MainResult, StatEntry};

fn battle_config(theme: &str) -> CardConfig {
    CardConfig {
        tool_name: "DECISION BATTLE".to_string(),
        icon: Some("!".to_string()),
        theme: theme.to_string(),
        main_result: Some(MainResult {
            label: "Victory!".to_string(),
            value: "Choice A".to_string(),
            sublabel: Some("after 12 rounds".to_string()),
        }),
        stats: vec![
            StatEntry {
                value: "12".to_string(),
                label: "rounds".to_string(),
            },
            StatEntry {
                value: "5".to_string(),
                label: "contenders".to_string(),
            },
        ],
        ..Default::default()
    }
}

fn golden_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/goldens")
        .join(name)
}

#[test]
fn capture_is_deterministic() {
    let card = compose_card(&battle_config("red"));
    let first = capture(&card).expect("first capture");
    let second = capture(&card).expect("second capture");
    assert_eq!(first.png_data, second.png_data);
    assert_eq!(first.digest_hex(), second.digest_hex());
}

#[test]
fn recomposition_does_not_change_the_pixels() {
    let config = battle_config("cyan");
    let first = capture(&compose_card(&config)).expect("first capture");
    let second = capture(&compose_card(&config)).expect("second capture");
    assert_eq!(first.digest_hex(), second.digest_hex());
}

#[test]
fn themes_produce_distinct_images() {
    let red = capture(&compose_card(&battle_config("red"))).expect("red");
    let green = capture(&compose_card(&battle_config("green"))).expect("green");
    assert_ne!(red.digest_hex(), green.digest_hex());
}

#[test]
fn capture_dimensions_are_fixed() {
    let shot = capture(&compose_card(&battle_config("violet"))).expect("capture");
    assert_eq!(shot.width, CARD_SIZE * CAPTURE_SCALE);
    assert_eq!(shot.height, CARD_SIZE * CAPTURE_SCALE);
    assert_eq!(&shot.png_data[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn golden_battle_card_digest() {
    let shot = capture(&compose_card(&battle_config("red"))).expect("capture");
    let digest = shot.digest_hex();

    let path = golden_path("battle_card.digest");
    // If UPDATE_GOLDENS is set, write the golden; otherwise skip the test
    // when missing so the suite stays green for fresh checkouts.
    if std::env::var("UPDATE_GOLDENS").is_ok() {
        fs::create_dir_all(path.parent().expect("golden dir")).ok();
        fs::write(&path, &digest).expect("write golden");
        eprintln!("Updated rendering golden: {path:?}");
        return;
    }
    if !path.exists() {
        eprintln!("No golden at {path:?}; run with UPDATE_GOLDENS=1 to create it. Skipping.");
        return;
    }

    let expected = fs::read_to_string(&path).expect("read golden");
    assert_eq!(digest, expected.trim());
}
