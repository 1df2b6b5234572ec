use super::IUserRepo;
use lifereminder_domain::{NotificationPreferences, User, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_uid: Uuid,
    name: String,
    phone: String,
    country_code: String,
    email: Option<String>,
    whatsapp_number: Option<String>,
    email_enabled: bool,
    whatsapp_enabled: bool,
}

impl From<UserRaw> for User {
    fn from(raw: UserRaw) -> Self {
        Self {
            id: raw.user_uid.into(),
            name: raw.name,
            phone: raw.phone,
            country_code: raw.country_code,
            email: raw.email,
            whatsapp_number: raw.whatsapp_number,
            preferences: NotificationPreferences {
                email: raw.email_enabled,
                whatsapp: raw.whatsapp_enabled,
            },
        }
    }
}

const USER_COLUMNS: &str = r#"u.user_uid, u.name, u.phone, u.country_code, u.email,
u.whatsapp_number, u.email_enabled, u.whatsapp_enabled"#;

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users
            (user_uid, name, phone, country_code, email, whatsapp_number,
             email_enabled, whatsapp_enabled)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(&user.name)
        .bind(&user.phone)
        .bind(&user.country_code)
        .bind(&user.email)
        .bind(&user.whatsapp_number)
        .bind(user.preferences.email)
        .bind(user.preferences.whatsapp)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET name = $2,
            phone = $3,
            country_code = $4,
            email = $5,
            whatsapp_number = $6,
            email_enabled = $7,
            whatsapp_enabled = $8
            WHERE user_uid = $1
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(&user.name)
        .bind(&user.phone)
        .bind(&user.country_code)
        .bind(&user.email)
        .bind(&user.whatsapp_number)
        .bind(user.preferences.email)
        .bind(user.preferences.whatsapp)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        sqlx::query_as::<_, UserRaw>(&format!(
            r#"
            SELECT {} FROM users AS u
            WHERE u.user_uid = $1
            "#,
            USER_COLUMNS
        ))
        .bind(user_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        .ok()
        .map(|user| user.into())
    }

    async fn find_by_phone(&self, phone: &str) -> Option<User> {
        sqlx::query_as::<_, UserRaw>(&format!(
            r#"
            SELECT {} FROM users AS u
            WHERE u.phone = $1
            "#,
            USER_COLUMNS
        ))
        .bind(phone)
        .fetch_one(&self.pool)
        .await
        .ok()
        .map(|user| user.into())
    }

    async fn delete(&self, user_id: &ID) -> Option<User> {
        sqlx::query_as::<_, UserRaw>(
            r#"
            DELETE FROM users AS u
            WHERE u.user_uid = $1
            RETURNING u.user_uid, u.name, u.phone, u.country_code, u.email,
                      u.whatsapp_number, u.email_enabled, u.whatsapp_enabled
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_one(&self.pool)
        .await
        .ok()
        .map(|user| user.into())
    }
}
