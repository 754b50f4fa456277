use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Guild permission bits as the platform defines them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Permissions: u64 {
        const CREATE_INSTANT_INVITE = 1 << 0;
        const KICK_MEMBERS = 1 << 1;
        const BAN_MEMBERS = 1 << 2;
        const ADMINISTRATOR = 1 << 3;
        const MANAGE_CHANNELS = 1 << 4;
        const MANAGE_GUILD = 1 << 5;
        const ADD_REACTIONS = 1 << 6;
        const VIEW_AUDIT_LOG = 1 << 7;
        const PRIORITY_SPEAKER = 1 << 8;
        const STREAM = 1 << 9;
        const VIEW_CHANNEL = 1 << 10;
        const SEND_MESSAGES = 1 << 11;
        const SEND_TTS_MESSAGES = 1 << 12;
        const MANAGE_MESSAGES = 1 << 13;
        const EMBED_LINKS = 1 << 14;
        const ATTACH_FILES = 1 << 15;
        const READ_MESSAGE_HISTORY = 1 << 16;
        const MENTION_EVERYONE = 1 << 17;
        const USE_EXTERNAL_EMOJIS = 1 << 18;
        const VIEW_GUILD_INSIGHTS = 1 << 19;
        const CONNECT = 1 << 20;
        const SPEAK = 1 << 21;
        const MUTE_MEMBERS = 1 << 22;
        const DEAFEN_MEMBERS = 1 << 23;
        const MOVE_MEMBERS = 1 << 24;
        const USE_VAD = 1 << 25;
        const CHANGE_NICKNAME = 1 << 26;
        const MANAGE_NICKNAMES = 1 << 27;
        const MANAGE_ROLES = 1 << 28;
        const MANAGE_WEBHOOKS = 1 << 29;
        const MANAGE_EMOJIS_AND_STICKERS = 1 << 30;
        const USE_APPLICATION_COMMANDS = 1 << 31;
        const REQUEST_TO_SPEAK = 1 << 32;
        const MANAGE_EVENTS = 1 << 33;
        const MANAGE_THREADS = 1 << 34;
        const CREATE_PUBLIC_THREADS = 1 << 35;
        const CREATE_PRIVATE_THREADS = 1 << 36;
        const USE_EXTERNAL_STICKERS = 1 << 37;
        const SEND_MESSAGES_IN_THREADS = 1 << 38;
        const USE_EMBEDDED_ACTIVITIES = 1 << 39;
        const MODERATE_MEMBERS = 1 << 40;
    }
}

/// Recognized permission names, including the aliases the model tends to emit.
const PERMISSION_NAMES: &[(&str, Permissions)] = &[
    ("create_instant_invite", Permissions::CREATE_INSTANT_INVITE),
    ("kick_members", Permissions::KICK_MEMBERS),
    ("ban_members", Permissions::BAN_MEMBERS),
    ("administrator", Permissions::ADMINISTRATOR),
    ("manage_channels", Permissions::MANAGE_CHANNELS),
    ("manage_guild", Permissions::MANAGE_GUILD),
    ("manage_server", Permissions::MANAGE_GUILD),
    ("add_reactions", Permissions::ADD_REACTIONS),
    ("view_audit_log", Permissions::VIEW_AUDIT_LOG),
    ("priority_speaker", Permissions::PRIORITY_SPEAKER),
    ("stream", Permissions::STREAM),
    ("view_channel", Permissions::VIEW_CHANNEL),
    ("read_messages", Permissions::VIEW_CHANNEL),
    ("send_messages", Permissions::SEND_MESSAGES),
    ("send_tts_messages", Permissions::SEND_TTS_MESSAGES),
    ("manage_messages", Permissions::MANAGE_MESSAGES),
    ("embed_links", Permissions::EMBED_LINKS),
    ("attach_files", Permissions::ATTACH_FILES),
    ("read_message_history", Permissions::READ_MESSAGE_HISTORY),
    ("mention_everyone", Permissions::MENTION_EVERYONE),
    ("use_external_emojis", Permissions::USE_EXTERNAL_EMOJIS),
    ("external_emojis", Permissions::USE_EXTERNAL_EMOJIS),
    ("view_guild_insights", Permissions::VIEW_GUILD_INSIGHTS),
    ("connect", Permissions::CONNECT),
    ("speak", Permissions::SPEAK),
    ("mute_members", Permissions::MUTE_MEMBERS),
    ("deafen_members", Permissions::DEAFEN_MEMBERS),
    ("move_members", Permissions::MOVE_MEMBERS),
    ("use_vad", Permissions::USE_VAD),
    ("use_voice_activation", Permissions::USE_VAD),
    ("change_nickname", Permissions::CHANGE_NICKNAME),
    ("manage_nicknames", Permissions::MANAGE_NICKNAMES),
    ("manage_roles", Permissions::MANAGE_ROLES),
    ("manage_permissions", Permissions::MANAGE_ROLES),
    ("manage_webhooks", Permissions::MANAGE_WEBHOOKS),
    ("manage_emojis", Permissions::MANAGE_EMOJIS_AND_STICKERS),
    ("manage_emojis_and_stickers", Permissions::MANAGE_EMOJIS_AND_STICKERS),
    ("manage_expressions", Permissions::MANAGE_EMOJIS_AND_STICKERS),
    ("use_application_commands", Permissions::USE_APPLICATION_COMMANDS),
    ("use_slash_commands", Permissions::USE_APPLICATION_COMMANDS),
    ("request_to_speak", Permissions::REQUEST_TO_SPEAK),
    ("manage_events", Permissions::MANAGE_EVENTS),
    ("manage_threads", Permissions::MANAGE_THREADS),
    ("create_public_threads", Permissions::CREATE_PUBLIC_THREADS),
    ("create_private_threads", Permissions::CREATE_PRIVATE_THREADS),
    ("use_external_stickers", Permissions::USE_EXTERNAL_STICKERS),
    ("external_stickers", Permissions::USE_EXTERNAL_STICKERS),
    ("send_messages_in_threads", Permissions::SEND_MESSAGES_IN_THREADS),
    ("use_embedded_activities", Permissions::USE_EMBEDDED_ACTIVITIES),
    ("start_embedded_activities", Permissions::USE_EMBEDDED_ACTIVITIES),
    ("moderate_members", Permissions::MODERATE_MEMBERS),
];

impl Permissions {
    /// Look up a single permission by name.
    ///
    /// Matching ignores case and treats spaces and hyphens as underscores, so
    /// `"Manage Channels"`, `"manage-channels"` and `"MANAGE_CHANNELS"` all
    /// resolve. Unknown names return `None`.
    pub fn from_permission_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        PERMISSION_NAMES
            .iter()
            .find(|(known, _)| *known == normalized)
            .map(|(_, flag)| *flag)
    }
}

/// A role color as a 24-bit RGB value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    /// Neutral gray used when the requested color is missing or unreadable.
    pub const GRAY: Color = Color(0x80_80_80);

    /// Parse a six digit hex triplet, with or without a `#` or `0x` prefix.
    pub fn parse_hex(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        u32::from_str_radix(digits, 16).ok().map(Color)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::GRAY
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}
