//! Player registration - lazily creates players on first interaction.

use crate::{
    entities::{Player, player},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*, sea_query::OnConflict};

/// Registers a player, or refreshes their username if already known.
///
/// Atomic `ON CONFLICT (user_id) DO UPDATE`: two racing registrations of the
/// same user resolve to one row, and the internal id never changes once
/// assigned.
pub async fn get_or_create(
    db: &DatabaseConnection,
    user_id: &str,
    username: &str,
) -> Result<player::Model> {
    let model = player::ActiveModel {
        user_id: Set(user_id.to_string()),
        username: Set(username.to_string()),
        ..Default::default()
    };

    Player::insert(model)
        .on_conflict(
            OnConflict::column(player::Column::UserId)
                .update_column(player::Column::Username)
                .to_owned(),
        )
        .exec(db)
        .await?;

    by_user_id(db, user_id)
        .await?
        .ok_or_else(|| Error::NotRegistered {
            user_id: user_id.to_string(),
        })
}

/// Looks a player up by their external user id.
pub async fn by_user_id(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Option<player::Model>> {
    Player::find()
        .filter(player::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_get_or_create_registers_once() -> Result<()> {
        let db = setup_test_db().await?;

        let first = get_or_create(&db, "u1", "Alice").await?;
        let second = get_or_create(&db, "u1", "Alice").await?;

        assert_eq!(first.id, second.id);
        assert_eq!(Player::find().all(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_username_refreshes_but_id_is_stable() -> Result<()> {
        let db = setup_test_db().await?;

        let first = get_or_create(&db, "u1", "Alice").await?;
        let renamed = get_or_create(&db, "u1", "Alicia").await?;

        assert_eq!(first.id, renamed.id);
        assert_eq!(renamed.username, "Alicia");
        Ok(())
    }

    #[tokio::test]
    async fn test_by_user_id_missing() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(by_user_id(&db, "nobody").await?.is_none());
        Ok(())
    }
}
