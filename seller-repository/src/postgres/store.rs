//! PostgreSQL record store.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, info, instrument};

use crate::config::StoreConfig;
use crate::errors::StoreError;
use crate::interfaces::RecordStore;
use crate::postgres::row::SellerRow;
use seller_shared::{Page, PageRequest, Seller, SellerId};

const SELECT_COLUMNS: &str = "id, name, email, phone_number, address, city";

/// Record store backed by a PostgreSQL `seller` table.
///
/// # Example
///
/// ```ignore
/// let config = StoreConfig::new("postgres://localhost:5432/sellers");
/// let store = PostgresRecordStore::connect(&config).await?;
/// let stored = store.insert(Seller::named("Garage Dupont")).await?;
/// assert!(stored.id.is_some());
/// ```
#[derive(Clone, Debug)]
pub struct PostgresRecordStore {
    pool: PgPool,
}

impl PostgresRecordStore {
    /// Wrap an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to the configured database and, unless disabled, apply migrations.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .map_err(|e| StoreError::connection(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Connected to PostgreSQL"
        );

        let store = Self::new(pool);
        if config.run_migrations {
            store.migrate().await?;
        }
        Ok(store)
    }

    /// Apply the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Seller schema migrations applied");
        Ok(())
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Serializes explicit-id writes against inserts drawing from the id sequence.
/// Inserts take ROW EXCLUSIVE before evaluating the column default, so they
/// wait for the upsert's transaction to commit.
const LOCK_SELLER_TABLE: &str = "LOCK TABLE seller IN SHARE ROW EXCLUSIVE MODE";

/// Moves the id sequence up to `$1` when it has not reached it yet. It never
/// moves the sequence backwards.
const ADVANCE_ID_SEQUENCE: &str = "SELECT setval(s.seq, $1) \
     FROM (SELECT pg_get_serial_sequence('seller', 'id')::regclass AS seq) s \
     WHERE COALESCE(pg_sequence_last_value(s.seq), 0) < $1";

#[async_trait]
impl RecordStore for PostgresRecordStore {
    #[instrument(skip(self, seller))]
    async fn insert(&self, seller: Seller) -> Result<Seller, StoreError> {
        let row: SellerRow = sqlx::query_as(&format!(
            "INSERT INTO seller (name, email, phone_number, address, city) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(&seller.name)
        .bind(&seller.email)
        .bind(&seller.phone_number)
        .bind(&seller.address)
        .bind(&seller.city)
        .fetch_one(self.pool())
        .await?;

        debug!(seller_id = row.id, "Seller inserted");
        Ok(row.into())
    }

    #[instrument(skip(self, seller), fields(seller_id = ?seller.id))]
    async fn upsert(&self, seller: Seller) -> Result<Seller, StoreError> {
        let id = seller
            .id
            .ok_or_else(|| StoreError::query("upsert requires a seller id"))?;

        let mut tx = self.pool().begin().await?;

        sqlx::query(LOCK_SELLER_TABLE).execute(&mut *tx).await?;

        let row: SellerRow = sqlx::query_as(&format!(
            "INSERT INTO seller (id, name, email, phone_number, address, city) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (id) DO UPDATE SET \
                 name = EXCLUDED.name, \
                 email = EXCLUDED.email, \
                 phone_number = EXCLUDED.phone_number, \
                 address = EXCLUDED.address, \
                 city = EXCLUDED.city \
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(id.value())
        .bind(&seller.name)
        .bind(&seller.email)
        .bind(&seller.phone_number)
        .bind(&seller.address)
        .bind(&seller.city)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(ADVANCE_ID_SEQUENCE)
            .bind(id.value())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(seller_id = row.id, "Seller upserted");
        Ok(row.into())
    }

    async fn find_by_id(&self, id: SellerId) -> Result<Option<Seller>, StoreError> {
        let row: Option<SellerRow> =
            sqlx::query_as(&format!("SELECT {SELECT_COLUMNS} FROM seller WHERE id = $1"))
                .bind(id.value())
                .fetch_optional(self.pool())
                .await?;

        Ok(row.map(Seller::from))
    }

    async fn find_page(&self, request: PageRequest) -> Result<Page, StoreError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM seller")
            .fetch_one(self.pool())
            .await?;

        let offset = i64::try_from(request.offset())
            .map_err(|e| StoreError::query(format!("Page offset out of range: {}", e)))?;

        let rows: Vec<SellerRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM seller ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(i64::from(request.size))
        .bind(offset)
        .fetch_all(self.pool())
        .await?;

        let content = rows.into_iter().map(Seller::from).collect();
        Ok(Page::new(content, total.max(0) as u64, request))
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: SellerId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM seller WHERE id = $1")
            .bind(id.value())
            .execute(self.pool())
            .await?;

        debug!(
            seller_id = %id,
            rows_affected = result.rows_affected(),
            "Seller deleted"
        );
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        let one: i32 = sqlx::query_scalar("SELECT 1")
            .fetch_one(self.pool())
            .await?;
        Ok(one == 1)
    }
}
