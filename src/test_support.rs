//! Shared fixtures for the test modules

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::DatabaseConnection;

use crate::config::DatabaseConfig;
use crate::database::connection::init_database;
use crate::database::dto::NewProfile;
use crate::entity::choices::{Lang, Status};
use crate::entity::profiles::DEFAULT_SIZE;

/// Fresh migrated in-memory database
pub async fn memory_db() -> DatabaseConnection {
    init_database(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory database")
}

/// Moves `column` of every row of `E` one hour back and returns that time.
///
/// Goes through `update_many`, so the entity hooks do not run.
pub async fn backdate<E: EntityTrait>(db: &DatabaseConnection, column: E::Column) -> DateTimeUtc {
    let old = chrono::Utc::now() - chrono::Duration::hours(1);
    E::update_many()
        .col_expr(column, Expr::value(old))
        .exec(db)
        .await
        .expect("backdate");
    old
}

pub fn sample_profile(name: &str) -> NewProfile {
    NewProfile {
        name: name.to_string(),
        title: String::new(),
        life_points: "3,2,1".to_string(),
        movement: "4".to_string(),
        damage_cc: "2,3,4".to_string(),
        damage_ra: String::new(),
        action_points: 2,
        cost: 25,
        combat: 3,
        defense: 4,
        mind: 2,
        reflexes: 3,
        size: DEFAULT_SIZE,
        lang: Lang::French,
        status: Status::Draft,
    }
}
