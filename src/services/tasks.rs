use std::sync::Arc;

use log::debug;

use super::endpoints;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Task, TaskInput};

/// CRUD operations on tasks. Each method is a single API call.
#[derive(Clone)]
pub struct TaskService {
    client: Arc<ApiClient>,
}

impl TaskService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn get_all_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let tasks: Vec<Task> = self.client.get(endpoints::TASKS).await?;
        debug!("Fetched {} tasks", tasks.len());
        Ok(tasks)
    }

    pub async fn get_task_by_id(&self, id: i64) -> Result<Task, ApiError> {
        self.client.get(&endpoints::task(id)).await
    }

    pub async fn create_task(&self, input: &TaskInput) -> Result<Task, ApiError> {
        self.client.post(endpoints::TASKS, input).await
    }

    pub async fn update_task(&self, id: i64, input: &TaskInput) -> Result<Task, ApiError> {
        self.client.put(&endpoints::task(id), input).await
    }

    /// Returns `true` once the API confirms the deletion.
    pub async fn delete_task(&self, id: i64) -> Result<bool, ApiError> {
        self.client.delete(&endpoints::task(id)).await?;
        Ok(true)
    }
}
