//! Chat assistant relay.
//!
//! Builds a system prompt from the household snapshot and forwards the
//! conversation to an OpenAI-compatible chat-completions endpoint. Failures
//! are surfaced as-is; there is no retry.

use chrono::NaiveDate;
use indoc::formatdoc;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::calculations::days_until_from;
use crate::error::AssistantError;
use crate::household::{Bill, InventoryItem, Location};
use crate::storage::AssistantConfig;
use crate::thresholds::{low_inventory_items, upcoming_bills};

/// Environment variable checked before the keyring.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Keyring entry holding the assistant API key.
pub const API_KEY_ENTRY: &str = "assistant_api_key";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: ChatRole::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, content: content.into() }
    }
}

/// Body sent to the completions endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub temperature: f64,
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    pub fn new(config: &AssistantConfig, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            messages,
        }
    }

    /// System context followed by the conversation so far.
    pub fn with_context(config: &AssistantConfig, context: String, conversation: &[ChatMessage]) -> Self {
        let mut messages = Vec::with_capacity(conversation.len() + 1);
        messages.push(ChatMessage::system(context));
        messages.extend(conversation.iter().cloned());
        Self::new(config, messages)
    }

    /// # Errors
    /// Returns [`AssistantError::EmptyConversation`] when there are no messages.
    pub fn validate(&self) -> Result<(), AssistantError> {
        if self.messages.is_empty() {
            return Err(AssistantError::EmptyConversation);
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Household numbers the persona prompt talks about.
#[derive(Debug, Clone, Copy)]
pub struct Standing<'a> {
    pub points: u64,
    pub streak: u32,
    pub level: &'a str,
}

fn location_tag(location: Location) -> &'static str {
    match location {
        Location::Pantry => "Pantry",
        Location::Fridge => "Fridge",
        Location::Freezer => "Freezer",
        Location::Other => "Storage",
    }
}

fn inventory_context(items: &[InventoryItem]) -> String {
    if items.is_empty() {
        return "No essentials are being tracked right now.".to_string();
    }

    let mut lines: Vec<String> = items
        .iter()
        .map(|item| {
            let days = item.days_remaining();
            let days_text = if days.is_finite() {
                format!("{days} day(s) left")
            } else {
                "usage missing".to_string()
            };
            let quantity = if item.unit.is_empty() {
                item.quantity.to_string()
            } else {
                format!("{} {}", item.quantity, item.unit)
            };
            format!(
                "{} ({}): quantity {quantity}, daily usage {}, {days_text}",
                item.name,
                location_tag(item.location),
                item.daily_usage,
            )
        })
        .collect();

    let low = low_inventory_items(items);
    if low.is_empty() {
        lines.push("No low supplies right now.".to_string());
    } else {
        let names = low
            .iter()
            .map(|item| format!("{} ({})", item.name, item.location))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("Low supplies ({}): {names}", low.len()));
    }
    lines.join("\n")
}

fn bills_context(bills: &[Bill], today: NaiveDate) -> String {
    if bills.is_empty() {
        return "No bills are tracked right now.".to_string();
    }

    let mut lines: Vec<String> = bills
        .iter()
        .map(|bill| {
            let due = bill
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "unscheduled".to_string());
            let due_text = match days_until_from(bill.due_date, today) {
                Some(days) if days > 0 => format!("due in {days} day(s)"),
                Some(0) => "due today".to_string(),
                Some(days) => format!("{} day(s) past due", days.abs()),
                None => "due date unknown".to_string(),
            };
            let cadence = if bill.recurring { "recurring" } else { "one-off" };
            format!(
                "{}: amount {}, due {due}, {due_text}, {cadence}",
                bill.name, bill.amount
            )
        })
        .collect();

    let upcoming = upcoming_bills(bills, today);
    if upcoming.is_empty() {
        lines.push("No bills due within the next week.".to_string());
    } else {
        let names = upcoming
            .iter()
            .map(|bill| bill.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("Upcoming bills ({}): {names}", upcoming.len()));
    }
    lines.join("\n")
}

/// System prompt describing the persona and the household snapshot.
pub fn build_context(
    inventory: &[InventoryItem],
    bills: &[Bill],
    standing: Standing<'_>,
    today: NaiveDate,
) -> String {
    let persona = formatdoc! {"
        You are an enthusiastic game master who narrates household logistics like epic quests.
        Current points: {points}. Current streak: {streak} days. Level: {level}. Provide positive reinforcement, loss-aversion nudges, and titles like Guardian of Supplies or Bill Buster.",
        points = standing.points,
        streak = standing.streak,
        level = standing.level,
    };

    format!(
        "{persona}\n\nInventory snapshot:\n{}\n\nBills snapshot:\n{}",
        inventory_context(inventory),
        bills_context(bills, today)
    )
}

/// Find the API key: environment first, then the OS keyring.
///
/// # Errors
/// Returns [`AssistantError::MissingApiKey`] when neither source has one.
pub fn resolve_api_key() -> Result<String, AssistantError> {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            return Ok(key);
        }
    }
    match crate::credentials::get(API_KEY_ENTRY) {
        Ok(Some(key)) => Ok(key),
        Ok(None) => Err(AssistantError::MissingApiKey),
        Err(e) => {
            tracing::debug!(error = %e, "keyring lookup failed");
            Err(AssistantError::MissingApiKey)
        }
    }
}

/// Save the API key to the OS keyring.
///
/// # Errors
/// Returns an error if the value is blank or the keyring rejects it.
pub fn store_api_key(key: &str) -> Result<(), AssistantError> {
    if key.trim().is_empty() {
        return Err(AssistantError::MissingApiKey);
    }
    crate::credentials::set(API_KEY_ENTRY, key.trim())
}

/// Remove the API key from the OS keyring.
pub fn clear_api_key() -> Result<(), AssistantError> {
    crate::credentials::delete(API_KEY_ENTRY)
}

/// Whether a key is stored in the keyring (the environment is not checked).
pub fn has_stored_api_key() -> bool {
    matches!(crate::credentials::get(API_KEY_ENTRY), Ok(Some(_)))
}

/// HTTP client for the completions endpoint.
pub struct AssistantClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl AssistantClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    /// Client for the configured endpoint with the resolved key.
    ///
    /// # Errors
    /// Returns [`AssistantError::MissingApiKey`] if no key is available.
    pub fn from_config(config: &AssistantConfig) -> Result<Self, AssistantError> {
        Ok(Self::new(config.endpoint.clone(), resolve_api_key()?))
    }

    /// Send the conversation and return the assistant's trimmed reply.
    ///
    /// # Errors
    /// - [`AssistantError::EmptyConversation`] before any request is made
    /// - [`AssistantError::Upstream`] with the status and raw body on non-2xx
    /// - [`AssistantError::EmptyReply`] when the reply has no text
    pub async fn complete(&self, request: &ChatRequest) -> Result<String, AssistantError> {
        request.validate()?;
        if self.api_key.trim().is_empty() {
            return Err(AssistantError::MissingApiKey);
        }

        tracing::debug!(model = %request.model, messages = request.messages.len(), "sending chat completion");
        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "assistant upstream error");
            return Err(AssistantError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let data: CompletionResponse = resp.json().await?;
        data.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(AssistantError::EmptyReply)
    }
}
