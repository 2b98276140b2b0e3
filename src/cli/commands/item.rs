use crate::cli::api_client::ApiClient;
use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, truncate_with_ellipsis};
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};

#[derive(Debug, Serialize, Deserialize)]
pub struct ActionItem {
    pub id: i64,
    pub note_id: Option<i64>,
    pub description: String,
    pub completed: bool,
    pub created_at: String,
    pub completed_at: Option<String>,
}

#[derive(Tabled)]
pub(crate) struct ItemDisplay {
    #[tabled(rename = "ID")]
    pub(crate) id: i64,
    #[tabled(rename = "Done")]
    pub(crate) done: &'static str,
    #[tabled(rename = "Description")]
    pub(crate) description: String,
    #[tabled(rename = "Note")]
    pub(crate) note: String,
}

impl From<&ActionItem> for ItemDisplay {
    fn from(item: &ActionItem) -> Self {
        Self {
            id: item.id,
            done: if item.completed { "✓" } else { " " },
            description: truncate_with_ellipsis(&item.description, 60),
            note: item
                .note_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

pub(crate) fn format_table(items: &[ActionItem]) -> String {
    if items.is_empty() {
        return "No action items found.".to_string();
    }

    let rows: Vec<ItemDisplay> = items.iter().map(|i| i.into()).collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    table.to_string()
}

/// List action items, optionally filtered by note and completion state
pub async fn list_items(
    api_client: &ApiClient,
    note_id: Option<i64>,
    completed: Option<bool>,
    format: &str,
) -> CliResult<String> {
    let mut request = api_client.get("/api/v1/action-items");
    if let Some(id) = note_id {
        request = request.query(&[("note_id", id.to_string())]);
    }
    if let Some(done) = completed {
        request = request.query(&[("completed", done.to_string())]);
    }

    let response = request.send().await?;
    let items: Vec<ActionItem> = ApiClient::handle_response(response).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&items)?),
        _ => Ok(format_table(&items)),
    }
}

/// Mark an action item as done
pub async fn complete_item(api_client: &ApiClient, id: i64) -> CliResult<String> {
    let response = api_client
        .put(&format!("/api/v1/action-items/{}/complete", id))
        .send()
        .await?;

    let item: ActionItem = ApiClient::handle_response(response).await?;
    Ok(format!("✓ Completed: {} ({})", item.description, item.id))
}
