//! Task model and derivation rules.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::gateway::AppContext;

const DEFAULT_CONTACT_NAME: &str = "Customer";
const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Conversation,
    Unread,
    FollowUp,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assignee: String,
    pub kind: TaskKind,
}

/// Name of the current agent, or the unassigned placeholder.
pub fn assignee_for(context: Option<&AppContext>) -> String {
    context
        .and_then(|c| c.current_agent.as_ref())
        .and_then(|a| a.name())
        .unwrap_or(UNASSIGNED)
        .to_string()
}

/// Derive the task list for a freshly published context.
///
/// - open conversation → in-progress conversation task
/// - unread messages → pending high-priority reply task
/// - resolved conversation → pending low-priority follow-up
pub fn derive_tasks(context: &AppContext) -> Vec<Task> {
    let conversation = &context.conversation;
    let contact_name = context
        .contact
        .as_ref()
        .and_then(|c| c.name())
        .unwrap_or(DEFAULT_CONTACT_NAME);
    let assignee = assignee_for(Some(context));
    let unread = conversation.unread();

    let mut tasks = Vec::new();

    if conversation.is_open() {
        let since = conversation
            .timestamp_secs()
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "an unknown time".to_string());

        tasks.push(Task {
            id: format!("conv-{}", conversation.id),
            title: format!("Conversation with {}", contact_name),
            description: format!("Active conversation since {}", since),
            status: TaskStatus::InProgress,
            priority: if unread > 0 { Priority::High } else { Priority::Medium },
            assignee: assignee.clone(),
            kind: TaskKind::Conversation,
        });
    }

    if unread > 0 {
        tasks.push(Task {
            id: format!("unread-{}", conversation.id),
            title: format!("{} unread message(s)", unread),
            description: format!("Reply to pending messages from {}", contact_name),
            status: TaskStatus::Pending,
            priority: Priority::High,
            assignee: assignee.clone(),
            kind: TaskKind::Unread,
        });
    }

    if conversation.is_resolved() {
        tasks.push(Task {
            id: format!("followup-{}", conversation.id),
            title: format!("Follow up with {}", contact_name),
            description: "Check customer satisfaction after resolution".to_string(),
            status: TaskStatus::Pending,
            priority: Priority::Low,
            assignee,
            kind: TaskKind::FollowUp,
        });
    }

    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context(value: serde_json::Value) -> AppContext {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_open_with_unread() {
        let ctx = context(json!({
            "conversation": {"id": 7, "status": "open", "unread_count": 2, "timestamp": 1700000000},
            "contact": {"name": "Jo"},
            "currentAgent": {"name": "Ana"}
        }));
        let tasks = derive_tasks(&ctx);

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, "conv-7");
        assert_eq!(tasks[0].title, "Conversation with Jo");
        assert_eq!(tasks[0].description, "Active conversation since 2023-11-14 22:13 UTC");
        assert_eq!(tasks[0].status, TaskStatus::InProgress);
        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(tasks[0].assignee, "Ana");

        assert_eq!(tasks[1].id, "unread-7");
        assert_eq!(tasks[1].title, "2 unread message(s)");
        assert_eq!(tasks[1].kind, TaskKind::Unread);
    }

    #[test]
    fn test_open_without_unread_is_medium() {
        let ctx = context(json!({"conversation": {"id": 1, "status": "open"}}));
        let tasks = derive_tasks(&ctx);

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].priority, Priority::Medium);
        assert_eq!(tasks[0].title, "Conversation with Customer");
        assert_eq!(tasks[0].assignee, "Unassigned");
        assert_eq!(tasks[0].description, "Active conversation since an unknown time");
    }

    #[test]
    fn test_resolved_yields_follow_up() {
        let ctx = context(json!({"conversation": {"id": 3, "status": "resolved"}}));
        let tasks = derive_tasks(&ctx);

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "followup-3");
        assert_eq!(tasks[0].priority, Priority::Low);
        assert_eq!(tasks[0].kind, TaskKind::FollowUp);
    }

    #[test]
    fn test_pending_conversation_has_no_tasks() {
        let ctx = context(json!({"conversation": {"id": 4, "status": "pending"}}));
        assert!(derive_tasks(&ctx).is_empty());
    }
}
