mod common;

use common::PIRATES_JSON;
use guildforge_core::errors::GuildError;
use guildforge_core::models::blueprint::{ChannelKind, INFO_CHANNELS};
use guildforge_core::models::permissions::{Color, Permissions};
use guildforge_core::models::report::ItemKind;
use guildforge_core::validator::{parse_blueprint, strip_code_fences};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

fn expect_malformed(raw: &str) -> String {
    match parse_blueprint(raw) {
        Err(GuildError::MalformedResponse(reason)) => reason,
        Err(e) => panic!("Expected MalformedResponse, got: {:?}", e),
        Ok(v) => panic!("Expected rejection, got blueprint: {:?}", v.blueprint),
    }
}

fn info_category() -> serde_json::Value {
    json!({
        "name": "Info",
        "channels": [
            {"name": "📜rules", "type": "text"},
            {"name": "📢announcements", "type": "text"},
            {"name": "ℹ️info", "type": "text"}
        ]
    })
}

#[test]
fn test_parse_pirates_blueprint() {
    let validated = parse_blueprint(PIRATES_JSON).expect("valid blueprint");
    let blueprint = validated.blueprint;

    assert_eq!(blueprint.server_name.as_deref(), Some("The Black Pearl"));
    assert_eq!(
        blueprint.server_description.as_deref(),
        Some("Hoist the colours and join the crew!")
    );
    assert_eq!(blueprint.roles.len(), 3);
    assert_eq!(blueprint.roles[0].permissions, Permissions::ADMINISTRATOR);
    assert_eq!(blueprint.roles[0].color, Color(0x8B0000));
    assert_eq!(
        blueprint.roles[1].permissions,
        Permissions::MANAGE_MESSAGES | Permissions::KICK_MEMBERS
    );
    assert_eq!(blueprint.categories.len(), 2);
    assert_eq!(blueprint.channel_count(), 5);
    assert_eq!(blueprint.categories[1].channels[1].kind, ChannelKind::Voice);

    let welcome = blueprint.welcome.expect("welcome block");
    assert_eq!(welcome.channel_name, "📢announcements");
    assert!(validated.skipped.is_empty());
    assert!(validated.warnings.is_empty());
}

#[rstest]
#[case::json_tag(format!("```json\n{}\n```", PIRATES_JSON))]
#[case::bare_fence(format!("```\n{}\n```", PIRATES_JSON))]
#[case::padded(format!("  \n```JSON\n{}\n```\n  ", PIRATES_JSON))]
#[case::no_trailing_newline(format!("```json\n{}```", PIRATES_JSON))]
fn test_code_fence_is_transparent(#[case] fenced: String) {
    let bare = parse_blueprint(PIRATES_JSON).expect("bare parses");
    let wrapped = parse_blueprint(&fenced).expect("fenced parses");

    assert_eq!(wrapped, bare);
}

#[test]
fn test_strip_code_fences_without_fence() {
    assert_eq!(strip_code_fences("  {\"a\": 1}\n"), "{\"a\": 1}");
    assert_eq!(strip_code_fences("```json{\"a\": 1}```"), "{\"a\": 1}");
}

#[rstest]
#[case::not_json("Sure! Here is your server layout.")]
#[case::array("[1, 2, 3]")]
#[case::missing_roles(r#"{"categories": []}"#)]
#[case::missing_categories(r#"{"roles": []}"#)]
#[case::roles_not_array(r#"{"roles": {"name": "x"}, "categories": []}"#)]
#[case::categories_null(r#"{"roles": [], "categories": null}"#)]
fn test_structural_problems_are_rejected(#[case] raw: &str) {
    expect_malformed(raw);
}

#[test]
fn test_missing_info_category_is_rejected() {
    let raw = json!({
        "roles": [],
        "categories": [{"name": "General", "channels": [{"name": "chat", "type": "text"}]}]
    })
    .to_string();

    let reason = expect_malformed(&raw);
    assert!(reason.contains("Info"));
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
fn test_missing_mandated_channel_is_rejected(#[case] missing: usize) {
    let channels: Vec<_> = INFO_CHANNELS
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != missing)
        .map(|(_, name)| json!({"name": name, "type": "text"}))
        .collect();
    let raw = json!({
        "roles": [],
        "categories": [{"name": "Info", "channels": channels}]
    })
    .to_string();

    let reason = expect_malformed(&raw);
    assert!(reason.contains(INFO_CHANNELS[missing]));
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
fn test_mandated_channel_must_be_text(#[case] voice: usize) {
    let channels: Vec<_> = INFO_CHANNELS
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let kind = if i == voice { "voice" } else { "text" };
            json!({"name": name, "type": kind})
        })
        .collect();
    let raw = json!({
        "roles": [],
        "categories": [{"name": "Info", "channels": channels}]
    })
    .to_string();

    let reason = expect_malformed(&raw);
    assert!(reason.contains(INFO_CHANNELS[voice]));
    assert!(reason.contains("text channel"));
}

#[test]
fn test_info_matching_ignores_case_and_variation_selector() {
    let raw = json!({
        "roles": [],
        "categories": [{
            "name": "INFO",
            "channels": [
                {"name": "📜rules", "type": "text"},
                {"name": "📢Announcements", "type": "text"},
                {"name": "ℹinfo", "type": "text"}
            ]
        }]
    })
    .to_string();

    assert!(parse_blueprint(&raw).is_ok());
}

#[test]
fn test_role_defaults() {
    let raw = json!({
        "roles": [
            {"name": "NoColor"},
            {"name": "BadColor", "color": "blue", "permissions": "all"},
            {"name": "ShortHex", "color": "#FFF"},
            {"name": "Bare", "color": "00ff7f", "permissions": ["Send Messages", "fly_ship"]}
        ],
        "categories": [info_category()]
    })
    .to_string();

    let validated = parse_blueprint(&raw).expect("valid blueprint");
    let roles = &validated.blueprint.roles;

    assert_eq!(roles[0].color, Color::GRAY);
    assert_eq!(roles[0].permissions, Permissions::empty());
    assert_eq!(roles[1].color, Color::GRAY);
    assert_eq!(roles[1].permissions, Permissions::empty());
    assert_eq!(roles[2].color, Color::GRAY);
    assert_eq!(roles[3].color, Color(0x00FF7F));
    assert_eq!(roles[3].permissions, Permissions::SEND_MESSAGES);

    assert!(validated.warnings.iter().any(|w| w.contains("fly_ship")));
    assert!(validated.warnings.iter().any(|w| w.contains("BadColor")));
    assert!(validated.warnings.iter().any(|w| w.contains("ShortHex")));
}

#[test]
fn test_unknown_channel_kind_is_skipped_not_fatal() {
    let raw = json!({
        "roles": [],
        "categories": [
            info_category(),
            {
                "name": "Events",
                "channels": [
                    {"name": "🎪stage", "type": "stage"},
                    {"name": "📣forum", "type": "forum"},
                    {"name": "🎉party", "type": "voice"},
                    {"name": "🗒notes"}
                ]
            }
        ]
    })
    .to_string();

    let validated = parse_blueprint(&raw).expect("valid blueprint");
    let events = &validated.blueprint.categories[1];

    assert_eq!(events.channels.len(), 1);
    assert_eq!(events.channels[0].name, "🎉party");
    assert_eq!(validated.skipped.len(), 3);
    assert!(validated.skipped.iter().all(|s| s.kind == ItemKind::Channel));
}

#[test]
fn test_kind_alias_and_case() {
    let raw = json!({
        "roles": [],
        "categories": [
            info_category(),
            {"name": "Voice", "channels": [{"name": "🔊lounge", "kind": "VOICE"}]}
        ]
    })
    .to_string();

    let validated = parse_blueprint(&raw).expect("valid blueprint");
    assert_eq!(
        validated.blueprint.categories[1].channels[0].kind,
        ChannelKind::Voice
    );
}

#[test]
fn test_duplicate_and_unnamed_roles_are_skipped() {
    let raw = json!({
        "roles": [
            {"name": "Crew"},
            {"name": "Crew", "color": "#000000"},
            {"color": "#FFFFFF"},
            {"name": "   "}
        ],
        "categories": [info_category()]
    })
    .to_string();

    let validated = parse_blueprint(&raw).expect("valid blueprint");

    assert_eq!(validated.blueprint.roles.len(), 1);
    assert_eq!(validated.skipped.len(), 3);
    assert!(validated.skipped.iter().all(|s| s.kind == ItemKind::Role));
}

#[test]
fn test_description_falls_back_to_legacy_key() {
    let raw = json!({
        "server_name": "  ",
        "description": "A cozy corner",
        "roles": [],
        "categories": [info_category()]
    })
    .to_string();

    let blueprint = parse_blueprint(&raw).expect("valid blueprint").blueprint;

    assert_eq!(blueprint.server_name, None);
    assert_eq!(blueprint.server_description.as_deref(), Some("A cozy corner"));
}

#[rstest]
#[case::missing_message(json!({"channel": "📜rules"}))]
#[case::empty_channel(json!({"channel": "", "message": "hi"}))]
#[case::not_object(json!("welcome!"))]
fn test_incomplete_welcome_is_dropped(#[case] welcome: serde_json::Value) {
    let raw = json!({
        "roles": [],
        "categories": [info_category()],
        "welcome": welcome
    })
    .to_string();

    let blueprint = parse_blueprint(&raw).expect("valid blueprint").blueprint;
    assert_eq!(blueprint.welcome, None);
}
