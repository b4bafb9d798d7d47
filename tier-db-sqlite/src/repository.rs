use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    Row,
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow},
};
use tier_core::db::check_submission;
use tier_core::{
    Currency, DataType, InputMethod, OnboardingPayload, PricingTier, RepositoryError,
    SubmissionReceipt, TierRepository,
};
use tracing::debug;

const IN_MEMORY: &str = ":memory:";

pub struct SqliteTierRepository {
    pool: SqlitePool,
}

impl SqliteTierRepository {
    /// Connects to `database_url`, creating the database file if needed.
    pub async fn new(database_url: &str) -> Result<Self, RepositoryError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| {
                RepositoryError::Configuration(format!(
                    "invalid SQLite location '{database_url}': {e}"
                ))
            })?
            .create_if_missing(true);

        // Each in-memory connection would otherwise see its own database.
        let max_connections = if database_url.ends_with(IN_MEMORY) { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| {
                RepositoryError::Connection(format!(
                    "failed to connect to database '{database_url}': {e}"
                ))
            })?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(format!("failed to run migrations: {e}")))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn features_for(
        &self,
        id: i64,
    ) -> Result<Vec<String>, RepositoryError> {
        sqlx::query_scalar(
            "SELECT feature_name FROM tier_feature WHERE submission_id = ? ORDER BY position",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)
    }
}

fn db_err(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

fn get<'r, T>(
    row: &'r SqliteRow,
    column: &str,
) -> Result<T, RepositoryError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(column).map_err(|e| {
        RepositoryError::Database(format!("failed to read column '{column}': {e}"))
    })
}

fn parse_column<T>(
    column: &str,
    value: &str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<T, RepositoryError> {
    parse(value).ok_or_else(|| {
        RepositoryError::Database(format!("invalid value '{value}' in column '{column}'"))
    })
}

/// Builds a [`PricingTier`] from a `tier_submission` row and its features.
fn row_to_pricing_tier(
    row: &SqliteRow,
    features: Vec<String>,
) -> Result<PricingTier, RepositoryError> {
    let data_type: String = get(row, "data_type")?;
    let input_method: String = get(row, "input_method")?;
    let currency: String = get(row, "currency")?;

    Ok(PricingTier {
        id: get(row, "id")?,
        data_type: parse_column("data_type", &data_type, DataType::parse)?,
        input_method: parse_column("input_method", &input_method, InputMethod::parse)?,
        tier_name: get(row, "tier_name")?,
        price: get(row, "price")?,
        currency: parse_column("currency", &currency, Currency::parse)?,
        features,
        customer_count: get(row, "customer_count")?,
        churn_rate: get(row, "churn_rate")?,
        conversion_rate: get(row, "conversion_rate")?,
        uploaded_file_name: get(row, "uploaded_file_name")?,
        submitted_at: get::<DateTime<Utc>>(row, "submitted_at")?,
    })
}

const SELECT_SUBMISSION: &str = "SELECT id, data_type, input_method, tier_name, price, currency,
        customer_count, churn_rate, conversion_rate, uploaded_file_name, submitted_at
 FROM tier_submission";

#[async_trait]
impl TierRepository for SqliteTierRepository {
    async fn submit(
        &self,
        payload: &OnboardingPayload,
    ) -> Result<SubmissionReceipt, RepositoryError> {
        check_submission(payload)?;

        let tier = &payload.tier_data;
        let file = tier.uploaded_file.as_ref();
        let submitted_at = Utc::now();

        let mut tx = self.pool.begin().await.map_err(db_err)?;

        let id = sqlx::query(
            "INSERT INTO tier_submission (
                data_type, input_method, tier_name, price, currency, features,
                customer_count, churn_rate, conversion_rate,
                uploaded_file_name, uploaded_file_path, uploaded_file_size, submitted_at
             ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(payload.data_type.as_str())
        .bind(payload.input_method.as_str())
        .bind(&tier.tier_name)
        .bind(&tier.price)
        .bind(tier.currency.as_str())
        .bind(&tier.features)
        .bind(&tier.customer_count)
        .bind(&tier.churn_rate)
        .bind(&tier.conversion_rate)
        .bind(file.map(|f| f.name.clone()))
        .bind(file.map(|f| f.path.to_string_lossy().into_owned()))
        .bind(file.and_then(|f| f.size_bytes).map(|s| s as i64))
        .bind(submitted_at)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?
        .last_insert_rowid();

        for (position, feature) in tier.feature_list().into_iter().enumerate() {
            sqlx::query(
                "INSERT INTO tier_feature (submission_id, position, feature_name) VALUES (?, ?, ?)",
            )
            .bind(id)
            .bind(position as i64)
            .bind(feature)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        }

        tx.commit().await.map_err(db_err)?;
        debug!(id, "stored tier submission");

        Ok(SubmissionReceipt { id, submitted_at })
    }

    async fn get_tier(
        &self,
        id: i64,
    ) -> Result<PricingTier, RepositoryError> {
        let row = sqlx::query(&format!("{SELECT_SUBMISSION} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?
            .ok_or(RepositoryError::NotFound)?;

        let features = self.features_for(id).await?;
        row_to_pricing_tier(&row, features)
    }

    async fn list_tiers(&self) -> Result<Vec<PricingTier>, RepositoryError> {
        let rows = sqlx::query(&format!("{SELECT_SUBMISSION} ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        let feature_rows = sqlx::query(
            "SELECT submission_id, feature_name FROM tier_feature
             ORDER BY submission_id, position",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let mut features: HashMap<i64, Vec<String>> = HashMap::new();
        for row in &feature_rows {
            features
                .entry(get(row, "submission_id")?)
                .or_default()
                .push(get(row, "feature_name")?);
        }

        rows.iter()
            .map(|row| {
                let id: i64 = get(row, "id")?;
                row_to_pricing_tier(row, features.remove(&id).unwrap_or_default())
            })
            .collect()
    }

    async fn delete_tier(
        &self,
        id: i64,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM tier_submission WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tier_core::{TierData, UploadedFile};

    use super::*;

    async fn setup_repo() -> SqliteTierRepository {
        let repo = SqliteTierRepository::new(":memory:")
            .await
            .expect("failed to open in-memory database");
        repo.run_migrations()
            .await
            .expect("failed to run migrations");
        repo
    }

    fn manual_payload(name: &str) -> OnboardingPayload {
        OnboardingPayload {
            data_type: DataType::Pricing,
            input_method: InputMethod::Manual,
            tier_data: TierData {
                tier_name: name.to_string(),
                price: "29".to_string(),
                currency: Currency::Eur,
                features: "5 Projects\n\nEmail Support\n".to_string(),
                customer_count: "150".to_string(),
                churn_rate: "3.2".to_string(),
                conversion_rate: "12.5".to_string(),
                uploaded_file: None,
            },
        }
    }

    #[tokio::test]
    async fn test_submit_then_get_tier() {
        let repo = setup_repo().await;
        let payload = manual_payload("Basic");

        let receipt = repo.submit(&payload).await.unwrap();
        let tier = repo.get_tier(receipt.id).await.unwrap();

        assert_eq!(
            tier,
            PricingTier::from_payload(receipt.id, tier.submitted_at, &payload)
        );
        assert_eq!(tier.features, vec!["5 Projects", "Email Support"]);
        assert_eq!(tier.currency, Currency::Eur);
    }

    #[tokio::test]
    async fn test_submit_stores_upload_reference() {
        let repo = setup_repo().await;
        let payload = OnboardingPayload {
            data_type: DataType::Competitive,
            input_method: InputMethod::Upload,
            tier_data: TierData {
                uploaded_file: Some(UploadedFile::new("/tmp/rivals.json").with_size(2048)),
                ..Default::default()
            },
        };

        let receipt = repo.submit(&payload).await.unwrap();
        let tier = repo.get_tier(receipt.id).await.unwrap();

        assert_eq!(tier.input_method, InputMethod::Upload);
        assert_eq!(tier.uploaded_file_name.as_deref(), Some("rivals.json"));
        assert_eq!(tier.display_name(), "rivals.json");
        assert!(tier.features.is_empty());

        let size: Option<i64> =
            sqlx::query_scalar("SELECT uploaded_file_size FROM tier_submission WHERE id = ?")
                .bind(receipt.id)
                .fetch_one(repo.pool())
                .await
                .unwrap();
        assert_eq!(size, Some(2048));
    }

    #[tokio::test]
    async fn test_submit_rejects_blank_manual_fields() {
        let repo = setup_repo().await;
        let mut payload = manual_payload("Basic");
        payload.tier_data.price = "   ".to_string();

        let err = repo.submit(&payload).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Rejected(_)));
        assert!(repo.list_tiers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_tier_not_found() {
        let repo = setup_repo().await;
        assert_eq!(repo.get_tier(42).await, Err(RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_list_tiers_keeps_submission_order() {
        let repo = setup_repo().await;
        for name in ["Basic", "Pro", "Enterprise"] {
            repo.submit(&manual_payload(name)).await.unwrap();
        }

        let names: Vec<String> = repo
            .list_tiers()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.tier_name)
            .collect();
        assert_eq!(names, vec!["Basic", "Pro", "Enterprise"]);
    }

    #[tokio::test]
    async fn test_delete_tier_removes_features() {
        let repo = setup_repo().await;
        let receipt = repo.submit(&manual_payload("Basic")).await.unwrap();

        repo.delete_tier(receipt.id).await.unwrap();

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tier_feature")
            .fetch_one(repo.pool())
            .await
            .unwrap();
        assert_eq!(remaining, 0);
        assert_eq!(
            repo.delete_tier(receipt.id).await,
            Err(RepositoryError::NotFound)
        );
    }
}
