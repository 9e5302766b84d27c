use futures::TryStreamExt;
use sqlx::any::{AnyPool, AnyPoolOptions};

use crate::user::User;

const INSERT_USER: &str = "INSERT INTO users (name, email) VALUES ($1, $2)";
const UPDATE_USER: &str = "UPDATE users SET name = $1 WHERE email = $2";
const DELETE_USER: &str = "DELETE FROM users WHERE email = $1";
const LIST_USERS: &str = "SELECT name, email FROM users";
const FIND_USER: &str = "SELECT name, email FROM users WHERE email = $1 LIMIT 1";

/// Issues one parameterized statement per call against a shared pool.
/// Errors are the driver's, unchanged.
#[derive(Clone)]
pub struct UserStore {
    pool: AnyPool,
}

impl UserStore {
    pub fn new(pool: AnyPool) -> UserStore {
        UserStore { pool }
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<UserStore, sqlx::Error> {
        let pool = AnyPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        Ok(UserStore::new(pool))
    }

    pub async fn insert(&self, user: &User) -> Result<(), sqlx::Error> {
        sqlx::query(INSERT_USER)
            .bind(user.name.as_str())
            .bind(user.email.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Renames every row with `email`. Returns the rows affected; zero is not an error.
    pub async fn update(&self, name: &str, email: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(UPDATE_USER)
            .bind(name)
            .bind(email)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Removes every row with `email`. Returns the rows affected; zero is not an error.
    pub async fn delete(&self, email: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(DELETE_USER)
            .bind(email)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// All rows, in whatever order the database returns them.
    pub async fn list_all(&self) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(LIST_USERS)
            .fetch(&self.pool)
            .try_collect()
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(FIND_USER)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}


#[cfg(test)]
mod tests {
    use super::testing::store;
    use super::*;

    fn user(name: &str, email: &str) -> User {
        User {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[actix_web::test]
    async fn crud_operations() {
        let store = store().await;

        store
            .insert(&user("testuser", "testuser@email.com"))
            .await
            .unwrap();
        let found = store.find_by_email("testuser@email.com").await.unwrap();
        assert_eq!(found, Some(user("testuser", "testuser@email.com")));

        let updated = store.update("newName", "testuser@email.com").await.unwrap();
        assert_eq!(updated, 1);
        let found = store.find_by_email("testuser@email.com").await.unwrap();
        assert_eq!(found.map(|u| u.name), Some("newName".to_string()));

        let deleted = store.delete("testuser@email.com").await.unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(store.find_by_email("testuser@email.com").await.unwrap(), None);
    }

    #[actix_web::test]
    async fn list_all_returns_every_row() {
        let store = store().await;
        assert!(store.list_all().await.unwrap().is_empty());

        store.insert(&user("a", "a@email.com")).await.unwrap();
        store.insert(&user("b", "b@email.com")).await.unwrap();

        let mut users = store.list_all().await.unwrap();
        users.sort_by(|x, y| x.email.cmp(&y.email));
        assert_eq!(users, vec![user("a", "a@email.com"), user("b", "b@email.com")]);
    }

    #[actix_web::test]
    async fn missing_email_affects_nothing() {
        let store = store().await;
        store.insert(&user("a", "a@email.com")).await.unwrap();

        assert_eq!(store.update("x", "nobody@email.com").await.unwrap(), 0);
        assert_eq!(store.delete("nobody@email.com").await.unwrap(), 0);
        assert_eq!(store.list_all().await.unwrap(), vec![user("a", "a@email.com")]);
    }

    #[actix_web::test]
    async fn duplicate_emails_are_accepted() {
        let store = store().await;
        store.insert(&user("a", "same@email.com")).await.unwrap();
        store.insert(&user("b", "same@email.com")).await.unwrap();

        assert_eq!(store.update("c", "same@email.com").await.unwrap(), 2);
        assert_eq!(store.delete("same@email.com").await.unwrap(), 2);
    }

    #[actix_web::test]
    async fn driver_errors_propagate() {
        let store = testing::empty_store().await;
        assert!(store.list_all().await.is_err());
        assert!(store.insert(&user("a", "a@email.com")).await.is_err());
    }
}
