mod app_context;
mod project_root;
mod request_context;

pub use app_context::AppContext;
pub use project_root::find_project_root;
pub use request_context::request_context;
