//! Document implementations for Board models.
//!
//! None of these collections carry unique secondary keys.

use taskhub_store::Document;

use crate::model::*;

impl Document for Task {
    const COLLECTION: &'static str = "tasks";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Document for Project {
    const COLLECTION: &'static str = "projects";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Document for Comment {
    const COLLECTION: &'static str = "comments";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Document for HistoryEntry {
    const COLLECTION: &'static str = "history";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Document for Notification {
    const COLLECTION: &'static str = "notifications";

    fn id(&self) -> &str {
        &self.id
    }
}
