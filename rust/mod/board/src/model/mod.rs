mod comment;
mod history;
mod notification;
mod project;
mod report;
mod task;

pub use comment::*;
pub use history::*;
pub use notification::*;
pub use project::*;
pub use report::*;
pub use task::*;
