//! Recommended actions shared by the recruiter feedback and the roadmap

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

/// A single concrete task for the profile owner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionItem {
    pub task: String,
    pub details: String,
    pub priority: Priority,
    pub estimated_time: String,
}

impl ActionItem {
    pub fn new(
        task: impl Into<String>,
        details: impl Into<String>,
        priority: Priority,
        estimated_time: impl Into<String>,
    ) -> Self {
        Self {
            task: task.into(),
            details: details.into(),
            priority,
            estimated_time: estimated_time.into(),
        }
    }
}
