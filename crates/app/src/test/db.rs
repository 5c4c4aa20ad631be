//! Per-test Postgres databases inside one shared container.

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool, Postgres, Transaction};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::{OnceCell, mpsc};
use uuid::Uuid;

const TEST_USER: &str = "cellar_test";
const TEST_PASSWORD: &str = "cellar_test_password";
const ADMIN_DATABASE: &str = "postgres";

const RESERVED_WORDS: [&str; 15] = [
    "user", "table", "select", "insert", "update", "delete", "drop", "create", "alter", "index",
    "database", "schema", "role", "grant", "revoke",
];

static POSTGRES_CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

static DROP_QUEUE: Lazy<OnceCell<mpsc::UnboundedSender<String>>> = Lazy::new(OnceCell::new);

/// Database names are interpolated into `CREATE`/`DROP DATABASE`, so only
/// plain identifiers are accepted.
fn validate_database_name(name: &str) -> Result<(), String> {
    if name.is_empty() || name.len() > 63 {
        return Err(format!("'{name}' must be 1-63 characters long"));
    }

    if !name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        return Err(format!("'{name}' must start with a letter or underscore"));
    }

    if let Some(invalid) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '$'))
    {
        return Err(format!("'{name}' contains '{invalid}'"));
    }

    if RESERVED_WORDS
        .iter()
        .any(|word| name.eq_ignore_ascii_case(word))
    {
        return Err(format!("'{name}' is a reserved word"));
    }

    Ok(())
}

async fn start_container() -> ContainerAsync<PostgresImage> {
    PostgresImage::default()
        .with_user(TEST_USER)
        .with_password(TEST_PASSWORD)
        .with_db_name("cellar_test")
        .with_env_var("POSTGRES_INITDB_ARGS", "--auth-host=trust")
        .start()
        .await
        .expect("Failed to start PostgreSQL container")
}

/// Connection string for `database` inside the shared container.
async fn database_url(container: &ContainerAsync<PostgresImage>, database: &str) -> String {
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get container port");

    let host =
        std::env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string());

    format!("postgresql://{TEST_USER}:{TEST_PASSWORD}@{host}:{port}/{database}")
}

/// Background task dropping databases whose [`TestDb`] has gone away.
async fn start_drop_queue() -> mpsc::UnboundedSender<String> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(name) = receiver.recv().await {
            if let Err(error) = drop_database(&name).await {
                eprintln!("Failed to drop test database '{name}': {error}");
            }
        }
    });

    sender
}

async fn drop_database(name: &str) -> Result<(), sqlx::Error> {
    let Some(container) = POSTGRES_CONTAINER.get() else {
        return Ok(());
    };

    if validate_database_name(name).is_err() {
        return Ok(());
    }

    let mut conn = PgConnection::connect(&database_url(container, ADMIN_DATABASE).await).await?;

    sqlx::query(&format!("DROP DATABASE IF EXISTS \"{name}\""))
        .execute(&mut conn)
        .await?;

    conn.close().await
}

/// A freshly migrated database of its own for one test.
///
/// Services commit as they would in production; isolation comes from every
/// test having a separate database, which is dropped after the `TestDb` is.
#[derive(Debug)]
pub struct TestDb {
    pool: PgPool,
    name: String,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if let Some(queue) = DROP_QUEUE.get()
            && queue.send(self.name.clone()).is_err()
        {
            eprintln!("Test database '{}' was not dropped", self.name);
        }
    }
}

impl TestDb {
    pub async fn new() -> Self {
        DROP_QUEUE.get_or_init(start_drop_queue).await;

        let name = format!("cellar_test_{}", Uuid::now_v7().simple());

        if let Err(error) = validate_database_name(&name) {
            panic!("Invalid test database name: {error}");
        }

        let container = POSTGRES_CONTAINER.get_or_init(start_container).await;

        let mut admin = PgConnection::connect(&database_url(container, ADMIN_DATABASE).await)
            .await
            .expect("Failed to connect to admin database");

        sqlx::query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut admin)
            .await
            .expect("Failed to create test database");

        admin
            .close()
            .await
            .expect("Failed to close admin connection");

        let pool = PgPool::connect(&database_url(container, &name).await)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("../../migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Self { pool, name }
    }

    /// A transaction that rolls back when dropped.
    pub async fn begin_test_transaction(&self) -> Transaction<'_, Postgres> {
        self.pool
            .begin()
            .await
            .expect("Failed to start test transaction")
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_names_are_plain_identifiers() {
        for valid in ["valid_name", "_underscore_start", "test123", "db$with$dollar"] {
            assert!(validate_database_name(valid).is_ok(), "{valid} should be valid");
        }

        let too_long = "a".repeat(64);

        for invalid in [
            "",
            too_long.as_str(),
            "123invalid",
            "$invalid",
            "invalid-hyphen",
            "invalid.dot",
            "invalid space",
            "invalid\"quote",
            "USER",
            "select",
        ] {
            assert!(validate_database_name(invalid).is_err(), "{invalid} should be rejected");
        }
    }

    #[tokio::test]
    async fn migrations_create_catalog_and_sales_tables() {
        let test_db = TestDb::new().await;

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT table_name::text FROM information_schema.tables \
             WHERE table_schema = 'public' AND table_name <> '_sqlx_migrations' \
             ORDER BY table_name",
        )
        .fetch_all(test_db.pool())
        .await
        .expect("Failed to list tables");

        assert_eq!(
            tables,
            ["products", "sessions", "transaction_items", "transactions", "users"]
        );
    }

    #[tokio::test]
    async fn rolled_back_writes_are_not_visible() {
        let test_db = TestDb::new().await;
        let mut tx = test_db.begin_test_transaction().await;

        sqlx::query(
            "INSERT INTO users (uuid, name, email, password_hash) \
             VALUES ($1, 'Ghost', 'ghost@example.com', 'x')",
        )
        .bind(Uuid::now_v7())
        .execute(&mut *tx)
        .await
        .expect("Failed to insert user");

        drop(tx);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(test_db.pool())
            .await
            .expect("Failed to count users");

        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn each_test_db_is_isolated() {
        let first = TestDb::new().await;
        let second = TestDb::new().await;

        assert_ne!(first.name, second.name);

        sqlx::query(
            "INSERT INTO users (uuid, name, email, password_hash) \
             VALUES ($1, 'Till', 'till@example.com', 'x')",
        )
        .bind(Uuid::now_v7())
        .execute(first.pool())
        .await
        .expect("Failed to insert user");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(second.pool())
            .await
            .expect("Failed to count users");

        assert_eq!(count, 0);
    }
}
