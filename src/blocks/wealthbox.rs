use serde::{Deserialize, Serialize};

/// Wealthbox requests. `credential` is the OAuth credential reference
/// resolved by the execution layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation")]
pub enum WealthboxRequest {
    #[serde(rename = "wealthbox_read_note", rename_all = "camelCase")]
    ReadNote {
        credential: String,
        note_id: Option<String>,
    },
    #[serde(rename = "wealthbox_write_note", rename_all = "camelCase")]
    WriteNote {
        credential: String,
        content: String,
        contact_id: Option<String>,
    },
    #[serde(rename = "wealthbox_read_contact", rename_all = "camelCase")]
    ReadContact {
        credential: String,
        contact_id: Option<String>,
    },
    #[serde(rename = "wealthbox_write_contact", rename_all = "camelCase")]
    WriteContact {
        credential: String,
        first_name: String,
        last_name: String,
        email_address: Option<String>,
        background_information: Option<String>,
    },
    #[serde(rename = "wealthbox_read_task", rename_all = "camelCase")]
    ReadTask {
        credential: String,
        task_id: Option<String>,
    },
    #[serde(rename = "wealthbox_write_task", rename_all = "camelCase")]
    WriteTask {
        credential: String,
        title: String,
        due_date: String,
        contact_id: Option<String>,
        content: Option<String>,
    },
}
