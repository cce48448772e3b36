use rusqlite::Row;

use crate::domain::User;
use crate::errors::{GatorError, GatorResult};
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::UserRepository;

pub struct SqliteUserRepository {
    storage: SqliteStorage,
}

impl SqliteUserRepository {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        created_at: row.get(1)?,
        updated_at: row.get(2)?,
        name: row.get(3)?,
    })
}

impl UserRepository for SqliteUserRepository {
    fn create(&self, user: &User) -> GatorResult<()> {
        let conn = self.storage.connection()?;

        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM users WHERE name = ?1)",
            [&user.name],
            |row| row.get(0),
        )?;
        if exists {
            return Err(GatorError::UserAlreadyExists(user.name.clone()));
        }

        conn.execute(
            "INSERT INTO users (id, created_at, updated_at, name) VALUES (?1, ?2, ?3, ?4)",
            (&user.id, &user.created_at, &user.updated_at, &user.name),
        )?;
        Ok(())
    }

    fn get_by_name(&self, name: &str) -> GatorResult<Option<User>> {
        let conn = self.storage.connection()?;
        let user = conn.query_row(
            "SELECT id, created_at, updated_at, name FROM users WHERE name = ?1",
            [name],
            user_from_row,
        );

        match user {
            Ok(u) => Ok(Some(u)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(GatorError::from(e)),
        }
    }

    fn list(&self) -> GatorResult<Vec<User>> {
        let conn = self.storage.connection()?;
        let mut stmt =
            conn.prepare("SELECT id, created_at, updated_at, name FROM users ORDER BY created_at")?;
        let users = stmt.query_map([], user_from_row)?;

        users.collect::<Result<Vec<_>, _>>().map_err(GatorError::from)
    }

    fn delete_all(&self) -> GatorResult<usize> {
        let conn = self.storage.connection()?;
        Ok(conn.execute("DELETE FROM users", [])?)
    }
}
