pub mod middleware;
pub mod registry;
pub mod state;

pub use middleware::{logged_in, resolve_current_user, LoggedIn, UserHandler};
pub use registry::{CommandHandler, Registry};
pub use state::State;
