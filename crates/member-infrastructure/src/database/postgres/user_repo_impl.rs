// ============================================================================
// Member Infrastructure - PostgreSQL User Repository
// File: crates/member-infrastructure/src/database/postgres/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use tracing::{debug, error, info};

use member_core::domain::{AppUser, Member, Photo, PhotoAlbum};
use member_core::error::DomainError;
use member_core::repositories::UserRepository;

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn photos_for(&self, user_id: i32) -> Result<Vec<Photo>, DomainError> {
        let rows: Vec<PhotoRow> = sqlx::query_as(
            r#"
            SELECT id, url, is_main, public_id, app_user_id
            FROM photos
            WHERE app_user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("loading photos"))?;

        Ok(rows.into_iter().map(Photo::from).collect())
    }
}

// Internal row types for SQLx mapping
#[derive(Debug, FromRow)]
struct UserRow {
    pub id: i32,
    pub user_name: String,
    pub date_of_birth: NaiveDate,
    pub known_as: Option<String>,
    pub created: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    pub gender: Option<String>,
    pub introduction: Option<String>,
    pub looking_for: Option<String>,
    pub interests: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, FromRow)]
struct PhotoRow {
    pub id: i32,
    pub url: String,
    pub is_main: bool,
    pub public_id: Option<String>,
    pub app_user_id: i32,
}

impl UserRow {
    fn into_user(self, photos: Vec<Photo>) -> AppUser {
        AppUser {
            id: self.id,
            user_name: self.user_name,
            date_of_birth: self.date_of_birth,
            known_as: self.known_as,
            created: self.created,
            last_active: self.last_active,
            gender: self.gender,
            introduction: self.introduction,
            looking_for: self.looking_for,
            interests: self.interests,
            city: self.city,
            country: self.country,
            photos: PhotoAlbum::from_photos(photos),
        }
    }
}

impl From<PhotoRow> for Photo {
    fn from(row: PhotoRow) -> Self {
        Photo {
            id: row.id,
            url: row.url,
            is_main: row.is_main,
            public_id: row.public_id,
        }
    }
}

fn group_by_owner(rows: Vec<PhotoRow>) -> HashMap<i32, Vec<Photo>> {
    let mut grouped: HashMap<i32, Vec<Photo>> = HashMap::new();
    for row in rows {
        grouped.entry(row.app_user_id).or_default().push(row.into());
    }
    grouped
}

/// Photo statements needed to bring storage in line with an album.
///
/// Flags are cleared before they are set so the one-main-per-user index
/// never sees two main photos.
#[derive(Debug, Default, PartialEq)]
struct PhotoChanges {
    keep_ids: Vec<i32>,
    flag_updates: Vec<(i32, bool)>,
    inserts: Vec<usize>,
}

impl PhotoChanges {
    fn plan(album: &PhotoAlbum) -> Self {
        let mut changes = PhotoChanges::default();
        let mut set_main = Vec::new();

        for (index, photo) in album.iter().enumerate() {
            if !photo.is_persisted() {
                changes.inserts.push(index);
                continue;
            }
            changes.keep_ids.push(photo.id);
            if photo.is_main {
                set_main.push((photo.id, true));
            } else {
                changes.flag_updates.push((photo.id, false));
            }
        }
        changes.flag_updates.extend(set_main);
        changes
    }
}

fn db_error(action: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e: sqlx::Error| {
        error!("Database error {}: {}", action, e);
        DomainError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list_members(&self) -> Result<Vec<Member>, DomainError> {
        let users: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT
                id, user_name, date_of_birth, known_as, created, last_active,
                gender, introduction, looking_for, interests, city, country
            FROM users
            ORDER BY user_name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing users"))?;

        let photos: Vec<PhotoRow> = sqlx::query_as(
            r#"
            SELECT id, url, is_main, public_id, app_user_id
            FROM photos
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing photos"))?;

        let mut photos = group_by_owner(photos);
        let members = users
            .into_iter()
            .map(|row| {
                let owned = photos.remove(&row.id).unwrap_or_default();
                Member::from(&row.into_user(owned))
            })
            .collect::<Vec<_>>();

        debug!("Listed {} members", members.len());
        Ok(members)
    }

    async fn get_member(&self, username: &str) -> Result<Option<Member>, DomainError> {
        Ok(self
            .get_user_by_username(username)
            .await?
            .map(|user| Member::from(&user)))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<AppUser>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT
                id, user_name, date_of_birth, known_as, created, last_active,
                gender, introduction, looking_for, interests, city, country
            FROM users
            WHERE LOWER(user_name) = LOWER($1)
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding user by username"))?;

        match row {
            Some(row) => {
                let photos = self.photos_for(row.id).await?;
                Ok(Some(row.into_user(photos)))
            }
            None => Ok(None),
        }
    }

    async fn save_user(&self, user: &mut AppUser) -> Result<bool, DomainError> {
        let changes = PhotoChanges::plan(&user.photos);
        let mut tx = self.pool.begin().await.map_err(db_error("starting save"))?;
        let mut written: u64 = 0;

        written += sqlx::query(
            r#"
            UPDATE users
            SET
                introduction = $2,
                looking_for = $3,
                interests = $4,
                city = $5,
                country = $6
            WHERE id = $1
              AND (introduction, looking_for, interests, city, country)
                  IS DISTINCT FROM ($2::TEXT, $3::TEXT, $4::TEXT, $5::TEXT, $6::TEXT)
            "#,
        )
        .bind(user.id)
        .bind(&user.introduction)
        .bind(&user.looking_for)
        .bind(&user.interests)
        .bind(&user.city)
        .bind(&user.country)
        .execute(&mut *tx)
        .await
        .map_err(db_error("updating user"))?
        .rows_affected();

        written += sqlx::query("DELETE FROM photos WHERE app_user_id = $1 AND NOT (id = ANY($2))")
            .bind(user.id)
            .bind(&changes.keep_ids)
            .execute(&mut *tx)
            .await
            .map_err(db_error("removing photos"))?
            .rows_affected();

        for (photo_id, is_main) in &changes.flag_updates {
            written += sqlx::query(
                "UPDATE photos SET is_main = $3 WHERE id = $1 AND app_user_id = $2 AND is_main <> $3",
            )
            .bind(photo_id)
            .bind(user.id)
            .bind(is_main)
            .execute(&mut *tx)
            .await
            .map_err(db_error("updating photo flag"))?
            .rows_affected();
        }

        let mut assigned = Vec::with_capacity(changes.inserts.len());
        for index in &changes.inserts {
            let Some(photo) = user.photos.iter().nth(*index) else {
                continue;
            };
            let id: i32 = sqlx::query_scalar(
                r#"
                INSERT INTO photos (url, is_main, public_id, app_user_id)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                "#,
            )
            .bind(&photo.url)
            .bind(photo.is_main)
            .bind(&photo.public_id)
            .bind(user.id)
            .fetch_one(&mut *tx)
            .await
            .map_err(db_error("inserting photo"))?;

            assigned.push((*index, id));
            written += 1;
        }

        tx.commit().await.map_err(db_error("committing save"))?;

        for (index, id) in assigned {
            user.photos.assign_id(index, id);
        }

        info!("Saved user {} ({} rows written)", user.user_name, written);
        Ok(written > 0)
    }
}
