use tracing::info;

use crate::domain::User;
use crate::errors::{GatorError, GatorResult};
use crate::storage::Store;

pub struct UserService<'a> {
    store: &'a Store,
}

impl<'a> UserService<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Create a user, refusing names that are already taken
    pub fn register(&self, name: &str) -> GatorResult<User> {
        if self.store.users.get_by_name(name)?.is_some() {
            return Err(GatorError::UserAlreadyExists(name.to_string()));
        }

        let user = User::new(name.to_string());
        self.store.users.create(&user)?;
        info!(user = %user.name, id = %user.id, "user registered");
        Ok(user)
    }

    /// The stored user called `name`, or `UserNotFound`
    pub fn find(&self, name: &str) -> GatorResult<User> {
        self.store
            .users
            .get_by_name(name)?
            .ok_or_else(|| GatorError::UserNotFound(name.to_string()))
    }

    /// All users ordered case-insensitively by name
    pub fn list(&self) -> GatorResult<Vec<User>> {
        let mut users = self.store.users.list()?;
        users.sort_by_key(|u| u.name.to_lowercase());
        Ok(users)
    }

    pub fn reset(&self) -> GatorResult<usize> {
        let removed = self.store.users.delete_all()?;
        info!(removed, "users reset");
        Ok(removed)
    }
}
