pub mod workspace;

pub use workspace::{RESOURCES_ENV, Workspace, env_resource_dirs};
