use chrono::{Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::agents::Agent;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTask {
    pub id: String,
    pub name: String,
    pub assigned_to: String,
    pub status: String,
    pub priority: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub name: String,
    pub due_date: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStatus {
    pub status: String,
    pub completion_percentage: u32,
    pub active_tasks: Vec<ProjectTask>,
    pub next_milestone: Milestone,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAssignment {
    pub success: bool,
    pub task_id: String,
    pub assigned_to: String,
    pub status: String,
}

/// Coordination agent. Reports a status snapshot and validates assignments;
/// there is no scheduler behind it.
pub struct ProjectManagerAgent;

impl Agent for ProjectManagerAgent {
    fn name(&self) -> &'static str {
        "project_manager"
    }

    fn capabilities(&self) -> &[&'static str] {
        &["project_coordination", "task_prioritization", "progress_tracking", "resource_allocation"]
    }
}

const KNOWN_AGENTS: [&str; 4] = ["programmer", "debugger", "linkedin_optimizer", "security"];

impl ProjectManagerAgent {
    pub fn new() -> Self {
        Self
    }

    pub fn get_project_status(&self) -> ProjectStatus {
        self.log("Getting project status");

        ProjectStatus {
            status: "in_progress".to_string(),
            completion_percentage: 65,
            active_tasks: vec![
                ProjectTask {
                    id: "task_1".to_string(),
                    name: "LinkedIn Integration".to_string(),
                    assigned_to: "programmer".to_string(),
                    status: "completed".to_string(),
                    priority: "high".to_string(),
                },
                ProjectTask {
                    id: "task_2".to_string(),
                    name: "AI Agent System Implementation".to_string(),
                    assigned_to: "programmer".to_string(),
                    status: "in_progress".to_string(),
                    priority: "high".to_string(),
                },
                ProjectTask {
                    id: "task_3".to_string(),
                    name: "Security Audit".to_string(),
                    assigned_to: "security".to_string(),
                    status: "pending".to_string(),
                    priority: "medium".to_string(),
                },
            ],
            next_milestone: Milestone {
                name: "Beta Release".to_string(),
                due_date: (Utc::now() + Duration::days(14)).to_rfc3339(),
            },
        }
    }

    pub fn assign_task(&self, task_name: &str, agent_type: &str) -> Result<TaskAssignment, String> {
        self.log(&format!("Assigning task \"{}\" to {} agent", task_name, agent_type));

        if !KNOWN_AGENTS.contains(&agent_type) {
            return Err(format!("Unknown agent type: {}", agent_type));
        }

        Ok(TaskAssignment {
            success: true,
            task_id: format!("task_{}", Uuid::new_v4().simple()),
            assigned_to: agent_type.to_string(),
            status: "assigned".to_string(),
        })
    }

    /// High-priority first, then medium, then everything else. Order within a
    /// bucket is preserved.
    pub fn prioritize_tasks(&self, mut tasks: Vec<ProjectTask>) -> Vec<ProjectTask> {
        self.log("Prioritizing tasks");

        let rank = |priority: &str| match priority {
            "high" => 0,
            "medium" => 1,
            _ => 2,
        };
        tasks.sort_by_key(|task| rank(&task.priority));
        tasks
    }
}

impl Default for ProjectManagerAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(name: &str, priority: &str) -> ProjectTask {
        ProjectTask {
            id: name.to_string(),
            name: name.to_string(),
            assigned_to: "programmer".to_string(),
            status: "pending".to_string(),
            priority: priority.to_string(),
        }
    }

    #[test]
    fn assignment_rejects_unknown_agent() {
        let agent = ProjectManagerAgent::new();
        assert!(agent.assign_task("audit", "astrologer").is_err());
        let ok = agent.assign_task("audit", "security").unwrap();
        assert_eq!(ok.assigned_to, "security");
        assert_eq!(ok.status, "assigned");
    }

    #[test]
    fn prioritization_is_stable_within_buckets() {
        let agent = ProjectManagerAgent::new();
        let ordered = agent.prioritize_tasks(vec![
            task("a", "low"),
            task("b", "high"),
            task("c", "medium"),
            task("d", "high"),
        ]);
        let names: Vec<&str> = ordered.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["b", "d", "c", "a"]);
    }

    #[test]
    fn status_snapshot_has_tasks_and_milestone() {
        let agent = ProjectManagerAgent::new();
        let status = agent.get_project_status();
        assert_eq!(status.active_tasks.len(), 3);
        assert_eq!(status.next_milestone.name, "Beta Release");
    }
}
