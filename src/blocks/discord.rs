use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation")]
pub enum DiscordRequest {
    #[serde(rename = "discord_send_message", rename_all = "camelCase")]
    SendMessage {
        bot_token: String,
        server_id: String,
        channel_id: String,
        content: Option<String>,
    },
    #[serde(rename = "discord_get_messages", rename_all = "camelCase")]
    GetMessages {
        bot_token: String,
        server_id: String,
        channel_id: String,
        limit: u32,
    },
    #[serde(rename = "discord_get_server", rename_all = "camelCase")]
    GetServer { bot_token: String, server_id: String },
    #[serde(rename = "discord_get_user", rename_all = "camelCase")]
    GetUser { bot_token: String, user_id: String },
}

impl DiscordRequest {
    pub fn bot_token(&self) -> &str {
        match self {
            DiscordRequest::SendMessage { bot_token, .. }
            | DiscordRequest::GetMessages { bot_token, .. }
            | DiscordRequest::GetServer { bot_token, .. }
            | DiscordRequest::GetUser { bot_token, .. } => bot_token,
        }
    }
}
