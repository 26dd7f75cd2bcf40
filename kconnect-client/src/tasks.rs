//! Task-related API endpoints

use kconnect_core::{TaskInfo, TaskStatus};

use crate::ConnectClient;
use crate::error::Result;
use crate::request::ApiRequest;
use crate::response::ApiResponse;

impl ConnectClient {
    // =============================================================================
    // Tasks
    // =============================================================================

    /// List the tasks currently running for a connector
    ///
    /// `GET /connectors/{name}/tasks`
    ///
    /// # Arguments
    /// * `name` - The connector name
    ///
    /// # Returns
    /// One entry per task, with its id and the task configuration
    pub async fn list_tasks(&self, name: &str) -> Result<ApiResponse<Vec<TaskInfo>>> {
        let url = self.endpoint(&["connectors", name, "tasks"])?;
        self.execute(ApiRequest::get("list connector tasks", url))
            .await
    }

    /// Get the status of one task
    ///
    /// `GET /connectors/{name}/tasks/{task_id}/status`
    ///
    /// # Arguments
    /// * `name` - The connector name
    /// * `task_id` - The task index within the connector, starting at 0
    ///
    /// # Returns
    /// The task's state, the worker it runs on and its failure trace, if any
    pub async fn get_task_status(
        &self,
        name: &str,
        task_id: u32,
    ) -> Result<ApiResponse<TaskStatus>> {
        let task_id = task_id.to_string();
        let url = self.endpoint(&["connectors", name, "tasks", &task_id, "status"])?;
        self.execute(ApiRequest::get("get task status", url)).await
    }

    /// Restart an individual task
    ///
    /// `POST /connectors/{name}/tasks/{task_id}/restart`
    ///
    /// # Arguments
    /// * `name` - The connector name
    /// * `task_id` - The task index within the connector
    pub async fn restart_task(&self, name: &str, task_id: u32) -> Result<ApiResponse<()>> {
        let task_id = task_id.to_string();
        let url = self.endpoint(&["connectors", name, "tasks", &task_id, "restart"])?;
        self.execute_empty(ApiRequest::post("restart task", url))
            .await
    }
}
