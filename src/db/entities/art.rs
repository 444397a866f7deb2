//! DB storage for the daily artwork
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveValue::Set, QueryOrder, TransactionTrait, entity::prelude::*};
use serde::Serialize;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "art")]
#[serde(rename_all = "camelCase")]
/// One generated artwork
pub struct Model {
    #[sea_orm(primary_key)]
    /// db id
    pub id: i32,
    /// provider-hosted image
    pub image_url: String,
    /// prompt submitted to the provider
    pub prompt: String,
    /// the provider's rewrite of `prompt`
    pub revised_prompt: String,
    /// whether this is the artwork currently shown
    pub is_active: bool,
    /// when it was created
    pub created_at: DateTimeUtc,
}

/// No relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Fields for a new active record
#[derive(Clone, Debug)]
pub struct NewArt {
    /// provider-hosted image
    pub image_url: String,
    /// prompt submitted to the provider
    pub prompt: String,
    /// the provider's rewrite of `prompt`
    pub revised_prompt: String,
}

/// Result of [`rotate_active`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RotateOutcome {
    /// The new record was written and is now the only active one
    Created(Model),
    /// A record for the window already existed, nothing was written
    Existing(Model),
}

/// First record created on or after `since`.
pub async fn find_created_since<C: ConnectionTrait>(
    db: &C,
    since: DateTimeUtc,
) -> Result<Option<Model>, DbErr> {
    Entity::find()
        .filter(Column::CreatedAt.gte(since))
        .order_by_asc(Column::CreatedAt)
        .order_by_asc(Column::Id)
        .one(db)
        .await
}

/// Marks every active record inactive, returning how many changed.
pub async fn deactivate_all_active<C: ConnectionTrait>(db: &C) -> Result<u64, DbErr> {
    let res = Entity::update_many()
        .col_expr(Column::IsActive, Expr::value(false))
        .filter(Column::IsActive.eq(true))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

/// Inserts `new` as an active record.
pub async fn create_active<C: ConnectionTrait>(
    db: &C,
    new: NewArt,
    created_at: DateTimeUtc,
) -> Result<Model, DbErr> {
    ActiveModel {
        image_url: Set(new.image_url),
        prompt: Set(new.prompt),
        revised_prompt: Set(new.revised_prompt),
        is_active: Set(true),
        created_at: Set(created_at),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Most recent active record created on or after `since`.
pub async fn find_active_since<C: ConnectionTrait>(
    db: &C,
    since: DateTimeUtc,
) -> Result<Option<Model>, DbErr> {
    Entity::find()
        .filter(Column::IsActive.eq(true))
        .filter(Column::CreatedAt.gte(since))
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .one(db)
        .await
}

/// Makes `new` the single active record unless one was already created on or
/// after `since`. The check, deactivation and insert share one transaction.
pub async fn rotate_active(
    db: &DatabaseConnection,
    since: DateTimeUtc,
    new: NewArt,
    created_at: DateTimeUtc,
) -> Result<RotateOutcome, DbErr> {
    let db_txn = db.begin().await?;

    if let Some(existing) = find_created_since(&db_txn, since).await? {
        db_txn.rollback().await?;
        return Ok(RotateOutcome::Existing(existing));
    }

    let deactivated = deactivate_all_active(&db_txn).await?;
    let created = create_active(&db_txn, new, created_at).await?;
    db_txn.commit().await?;

    debug!(
        "Activated art {} and deactivated {} previous record(s)",
        created.id, deactivated
    );
    Ok(RotateOutcome::Created(created))
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration, TimeZone, Utc};

    fn new_art(tag: &str) -> NewArt {
        NewArt {
            image_url: format!("https://img.example/{tag}.png"),
            prompt: format!("prompt {tag}"),
            revised_prompt: format!("revised {tag}"),
        }
    }

    fn at(hour: u32) -> DateTimeUtc {
        Utc.with_ymd_and_hms(2026, 3, 10, hour, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[tokio::test]
    async fn created_since_ignores_older_records() {
        let db = crate::db::migrated_test_db().await.expect("test db");
        create_active(&db, new_art("old"), at(1) - Duration::days(1))
            .await
            .expect("insert old");

        assert!(
            find_created_since(&db, at(0))
                .await
                .expect("query")
                .is_none()
        );

        let today = create_active(&db, new_art("today"), at(6))
            .await
            .expect("insert today");
        let found = find_created_since(&db, at(0))
            .await
            .expect("query")
            .expect("found");
        assert_eq!(found, today);
    }

    #[tokio::test]
    async fn deactivate_clears_every_active_flag() {
        let db = crate::db::migrated_test_db().await.expect("test db");
        create_active(&db, new_art("a"), at(1) - Duration::days(3))
            .await
            .expect("insert a");
        create_active(&db, new_art("b"), at(1))
            .await
            .expect("insert b");

        assert_eq!(deactivate_all_active(&db).await.expect("update"), 2);
        assert_eq!(deactivate_all_active(&db).await.expect("update"), 0);

        let active = Entity::find()
            .filter(Column::IsActive.eq(true))
            .all(&db)
            .await
            .expect("query");
        assert!(active.is_empty());
    }

    #[tokio::test]
    async fn active_since_prefers_newest() {
        let db = crate::db::migrated_test_db().await.expect("test db");
        create_active(&db, new_art("early"), at(2))
            .await
            .expect("insert early");
        let late = create_active(&db, new_art("late"), at(9))
            .await
            .expect("insert late");

        let found = find_active_since(&db, at(0))
            .await
            .expect("query")
            .expect("found");
        assert_eq!(found.id, late.id);

        deactivate_all_active(&db).await.expect("deactivate");
        assert!(
            find_active_since(&db, at(0))
                .await
                .expect("query")
                .is_none()
        );
    }

    #[tokio::test]
    async fn rotate_leaves_one_active_record() {
        let db = crate::db::migrated_test_db().await.expect("test db");
        let yesterday = create_active(&db, new_art("yesterday"), at(1) - Duration::days(1))
            .await
            .expect("insert yesterday");

        let outcome = rotate_active(&db, at(0), new_art("today"), at(3))
            .await
            .expect("rotate");
        let created = match outcome {
            RotateOutcome::Created(created) => created,
            other => panic!("expected a new record, got {other:?}"),
        };
        assert!(created.is_active);
        assert_eq!(created.image_url, "https://img.example/today.png");

        let all = Entity::find().all(&db).await.expect("query");
        assert_eq!(all.len(), 2);
        let active: Vec<_> = all.iter().filter(|art| art.is_active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, created.id);
        assert!(all.iter().any(|art| art.id == yesterday.id && !art.is_active));
    }

    #[tokio::test]
    async fn rotate_keeps_existing_record_for_window() {
        let db = crate::db::migrated_test_db().await.expect("test db");
        let first = create_active(&db, new_art("first"), at(2))
            .await
            .expect("insert first");

        let outcome = rotate_active(&db, at(0), new_art("second"), at(4))
            .await
            .expect("rotate");
        assert_eq!(outcome, RotateOutcome::Existing(first.clone()));

        let all = Entity::find().all(&db).await.expect("query");
        assert_eq!(all, vec![first]);
    }

    #[test]
    fn serializes_camel_case() {
        let model = Model {
            id: 3,
            image_url: "https://img.example/x.png".to_string(),
            prompt: "p".to_string(),
            revised_prompt: "r".to_string(),
            is_active: true,
            created_at: at(5),
        };
        let value = serde_json::to_value(&model).expect("serialize");
        assert_eq!(value["imageUrl"], "https://img.example/x.png");
        assert_eq!(value["isActive"], true);
        assert_eq!(value["revisedPrompt"], "r");
        assert!(value["createdAt"].as_str().is_some());
    }
}
