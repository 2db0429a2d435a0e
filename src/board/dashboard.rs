//! Presentation state fed by the gateway.

use std::sync::{Mutex, RwLock};

use uuid::Uuid;

use crate::board::task::{assignee_for, derive_tasks, Priority, Task, TaskKind, TaskStatus};
use crate::gateway::{AppContext, ContextSink};

/// Latest sanitized context and the tasks derived from it.
#[derive(Default)]
pub struct Dashboard {
    context: RwLock<Option<AppContext>>,
    tasks: Mutex<Vec<Task>>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context(&self) -> Option<AppContext> {
        self.context.read().expect("dashboard lock poisoned").clone()
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.lock().expect("dashboard lock poisoned").clone()
    }

    /// Move a task to `status`. Returns false if the id is unknown.
    pub fn update_status(&self, id: &str, status: TaskStatus) -> bool {
        let mut tasks = self.tasks.lock().expect("dashboard lock poisoned");
        match tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.status = status;
                true
            }
            None => false,
        }
    }

    /// Append a blank custom task assigned to the current agent.
    pub fn add_custom_task(&self) -> Task {
        let assignee = assignee_for(self.context().as_ref());
        let task = Task {
            id: format!("custom-{}", Uuid::new_v4()),
            title: "New task".to_string(),
            description: "Task description".to_string(),
            status: TaskStatus::Pending,
            priority: Priority::Medium,
            assignee,
            kind: TaskKind::Custom,
        };
        self.tasks
            .lock()
            .expect("dashboard lock poisoned")
            .push(task.clone());
        task
    }
}

impl ContextSink for Dashboard {
    /// Replaces the context and regenerates the task list, dropping custom
    /// tasks from the previous context.
    fn publish(&self, context: AppContext) {
        let tasks = derive_tasks(&context);
        *self.tasks.lock().expect("dashboard lock poisoned") = tasks;
        *self.context.write().expect("dashboard lock poisoned") = Some(context);
    }
}
