//! User business logic - creating and looking up the people responsible for plants.

use crate::{
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};

/// Creates a new user with the given display name and login.
///
/// # Errors
/// Returns an error if:
/// - The name or login is empty or whitespace-only
/// - The login is already taken or the insert fails
pub async fn create_user(
    db: &DatabaseConnection,
    name: String,
    login: String,
) -> Result<user::Model> {
    if name.trim().is_empty() {
        return Err(Error::validation("User name cannot be empty"));
    }
    if login.trim().is_empty() {
        return Err(Error::validation("User login cannot be empty"));
    }

    let user = user::ActiveModel {
        name: Set(name.trim().to_string()),
        login: Set(login.trim().to_string()),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    user.insert(db).await.map_err(Into::into)
}

/// Retrieves a user by id.
pub async fn get_user_by_id(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Option<user::Model>> {
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Retrieves a user by login.
pub async fn get_user_by_login(
    db: &DatabaseConnection,
    login: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Login.eq(login))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Fails with [`Error::UserNotFound`] unless the user exists.
pub(crate) async fn ensure_user_exists<C>(db: &C, user_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    User::find_by_id(user_id)
        .one(db)
        .await?
        .map(|_| ())
        .ok_or(Error::UserNotFound { id: user_id })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_user_validation() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_user(&db, "  ".to_string(), "login".to_string()).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let result = create_user(&db, "Name".to_string(), String::new()).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_and_find_user() -> Result<()> {
        let db = setup_test_db().await?;

        let user = create_user(&db, " Mitchell Admin ".to_string(), "admin".to_string()).await?;
        assert_eq!(user.name, "Mitchell Admin");

        let by_login = get_user_by_login(&db, "admin").await?.unwrap();
        assert_eq!(by_login.id, user.id);
        assert!(get_user_by_id(&db, 999).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_login_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        create_user(&db, "First".to_string(), "gardener".to_string()).await?;

        let result = create_user(&db, "Second".to_string(), "gardener".to_string()).await;
        assert!(matches!(result, Err(Error::Database(_))));
        Ok(())
    }
}
