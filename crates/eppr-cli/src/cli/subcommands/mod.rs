mod project;

pub use project::{ProjectAddArgs, ProjectCommands};
