//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see the driving ports,
//! so they can be exercised without any storage.

use std::sync::Arc;

use crate::domain::ports::{UserRepository, UsersCommand, UsersQuery};
use crate::domain::UserService;

/// Dependency bundle for the user handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users_query: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
}

impl HttpState {
    pub fn new(users_query: Arc<dyn UsersQuery>, users_command: Arc<dyn UsersCommand>) -> Self {
        Self {
            users_query,
            users_command,
        }
    }

    /// Wire both ports to a [`UserService`] over `repository`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use user_api::inbound::http::state::HttpState;
    /// use user_api::outbound::persistence::InMemoryUserRepository;
    ///
    /// let state = HttpState::from_repository(Arc::new(InMemoryUserRepository::new()));
    /// let _query = state.users_query.clone();
    /// ```
    pub fn from_repository(repository: Arc<dyn UserRepository>) -> Self {
        let service = Arc::new(UserService::new(repository));
        Self {
            users_query: service.clone(),
            users_command: service,
        }
    }
}
