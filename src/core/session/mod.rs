// Session module - Session entity and lifecycle
pub mod lifecycle;
pub mod manager;
pub mod session;
pub mod store;

pub use lifecycle::SessionLifecycleService;
pub use manager::SessionManager;
pub use session::Session;
pub use store::SessionStore;
