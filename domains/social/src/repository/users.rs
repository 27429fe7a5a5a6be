//! User repository

use crate::domain::entities::User;
use pitchside_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, cognito_sub, email, username, name, dob, gender, \
                            profile_pic, bio, location, friends_count, teams_count, created_at";

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user
    pub async fn create(&self, user: &User) -> Result<User> {
        let sql = format!(
            r#"
            INSERT INTO users (id, cognito_sub, email, username, name, dob, gender,
                               profile_pic, bio, location, friends_count, teams_count,
                               created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {USER_COLUMNS}
            "#
        );

        let created = sqlx::query_as::<_, User>(&sql)
            .bind(user.id)
            .bind(&user.cognito_sub)
            .bind(&user.email)
            .bind(&user.username)
            .bind(&user.name)
            .bind(user.dob)
            .bind(user.gender)
            .bind(&user.profile_pic)
            .bind(&user.bio)
            .bind(&user.location)
            .bind(user.friends_count)
            .bind(user.teams_count)
            .bind(user.created_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    /// Find user by ID
    pub async fn get_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let row = sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Find user by Cognito subject
    pub async fn get_by_cognito_sub(&self, cognito_sub: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE cognito_sub = $1");

        let row = sqlx::query_as::<_, User>(&sql)
            .bind(cognito_sub)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Find user by email
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        let row = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Update profile fields
    pub async fn update(&self, user: &User) -> Result<User> {
        let sql = format!(
            r#"
            UPDATE users
            SET username = $2, name = $3, dob = $4, gender = $5, bio = $6, location = $7
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        let updated = sqlx::query_as::<_, User>(&sql)
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.name)
            .bind(user.dob)
            .bind(user.gender)
            .bind(&user.bio)
            .bind(&user.location)
            .fetch_one(&self.pool)
            .await?;

        Ok(updated)
    }

    /// Replace the profile picture URL
    pub async fn set_profile_pic(&self, user_id: Uuid, url: &str) -> Result<()> {
        sqlx::query("UPDATE users SET profile_pic = $2 WHERE id = $1")
            .bind(user_id)
            .bind(url)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
