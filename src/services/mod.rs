pub mod auth;
pub mod tasks;

pub use auth::AuthService;
pub use tasks::TaskService;

/// REST endpoints consumed by the services.
pub mod endpoints {
    pub const LOGIN: &str = "/api/login";
    pub const REGISTER: &str = "/api/register";
    pub const LOGOUT: &str = "/api/logout";
    pub const TASKS: &str = "/api/task";

    pub fn task(id: i64) -> String {
        format!("{}/{}", TASKS, id)
    }
}
