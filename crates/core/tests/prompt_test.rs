use guildforge_core::errors::GuildError;
use guildforge_core::generator::generate_structure;
use guildforge_core::models::blueprint::INFO_CHANNELS;
use guildforge_core::ports::MockTextGenerator;
use guildforge_core::prompt::{PromptPolicy, cap_theme, icon_prompt, setup_prompt};
use pretty_assertions::assert_eq;

#[test]
fn test_cap_theme_respects_char_boundaries() {
    assert_eq!(cap_theme("  pirates  ", 200), "pirates");
    assert_eq!(cap_theme("pirates", 3), "pir");
    assert_eq!(cap_theme("ééé", 2), "éé");
    assert_eq!(cap_theme("ab cd", 3), "ab");
    assert_eq!(cap_theme("", 10), "");
}

#[test]
fn test_setup_prompt_embeds_policy() {
    let policy = PromptPolicy {
        min_roles: 3,
        min_channels: 12,
        ..PromptPolicy::default()
    };

    let prompt = setup_prompt("space station", &policy);

    assert!(prompt.contains("the theme: \"space station\""));
    assert!(prompt.contains("AT LEAST 3 roles"));
    assert!(prompt.contains("AT LEAST 12 channels"));
    assert!(prompt.contains("category named \"Info\""));
    for channel in INFO_CHANNELS {
        assert!(prompt.contains(channel), "prompt should mention {}", channel);
    }
}

#[test]
fn test_setup_prompt_caps_long_themes() {
    let policy = PromptPolicy {
        max_theme_chars: 10,
        ..PromptPolicy::default()
    };
    let theme = "x".repeat(5000);

    let prompt = setup_prompt(&theme, &policy);

    assert!(prompt.contains("\"xxxxxxxxxx\""));
    assert!(!prompt.contains("xxxxxxxxxxx"));
}

#[test]
fn test_default_policy() {
    let policy = PromptPolicy::default();
    assert_eq!(policy.min_roles, 5);
    assert_eq!(policy.min_channels, 20);
}

#[test]
fn test_icon_prompt() {
    assert_eq!(
        icon_prompt("pirates", 200),
        "Discord server logo for a theme about 'pirates', simple and bold icon style"
    );
}

#[tokio::test]
async fn test_generate_structure_sends_one_request() {
    let mut generator = MockTextGenerator::new();
    generator
        .expect_complete()
        .withf(|prompt| prompt.contains("\"pirates\""))
        .times(1)
        .returning(|_| Ok("{}".to_string()));

    let raw = generate_structure(&generator, "pirates", &PromptPolicy::default())
        .await
        .expect("generation succeeds");

    assert_eq!(raw, "{}");
}

#[tokio::test]
async fn test_generate_structure_propagates_service_failure() {
    let mut generator = MockTextGenerator::new();
    generator
        .expect_complete()
        .times(1)
        .returning(|_| Err(GuildError::ExternalService("timed out".to_string())));

    let result = generate_structure(&generator, "pirates", &PromptPolicy::default()).await;

    match result {
        Err(GuildError::ExternalService(_)) => {}
        other => panic!("Expected ExternalService error, got: {:?}", other),
    }
}
