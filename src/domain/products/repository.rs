//! Products Repository

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as};

use crate::database::Db;

use super::{
    errors::ProductsServiceError,
    models::{CatalogueStats, Product, ProductFilter, ProductUpdate, ProductUuid},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const CLEAR_PRODUCTS_SQL: &str = include_str!("sql/clear_products.sql");
const CATALOGUE_STATS_SQL: &str = include_str!("sql/catalogue_stats.sql");

/// Storage port for the product catalogue.
#[async_trait]
pub trait ProductsRepository: Send + Sync {
    async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, ProductsServiceError>;

    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError>;

    async fn insert_product(&self, product: &Product) -> Result<(), ProductsServiceError>;

    async fn update_product(
        &self,
        product: ProductUuid,
        update: &ProductUpdate,
        updated_at: Timestamp,
    ) -> Result<Product, ProductsServiceError>;

    /// Returns the number of rows removed (0 when the product is unknown).
    async fn delete_product(&self, product: ProductUuid) -> Result<u64, ProductsServiceError>;

    async fn clear_products(&self) -> Result<(), ProductsServiceError>;

    async fn catalogue_stats(&self) -> Result<CatalogueStats, ProductsServiceError>;
}

#[derive(Debug, Clone)]
pub struct PgProductsRepository {
    db: Db,
}

impl PgProductsRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductsRepository for PgProductsRepository {
    async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = query_as::<Postgres, Product>(LIST_PRODUCTS_SQL)
            .bind(filter.category.map(|c| c.as_str()))
            .bind(filter.featured)
            .bind(filter.in_stock)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let found = query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(found)
    }

    async fn insert_product(&self, product: &Product) -> Result<(), ProductsServiceError> {
        let price = bind_amount(product.price)?;

        let mut tx = self.db.begin().await?;

        query(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.category.as_str())
            .bind(price)
            .bind(&product.images)
            .bind(&product.sizes)
            .bind(&product.colors)
            .bind(product.in_stock)
            .bind(product.featured)
            .bind(product.sku.as_deref())
            .bind(product.material.as_deref())
            .bind(product.care_instructions.as_deref())
            .bind(SqlxTimestamp::from(product.created_at))
            .bind(SqlxTimestamp::from(product.updated_at))
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: &ProductUpdate,
        updated_at: Timestamp,
    ) -> Result<Product, ProductsServiceError> {
        let price = bind_amount(update.price)?;

        let mut tx = self.db.begin().await?;

        let updated = query_as::<Postgres, Product>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(&update.name)
            .bind(&update.description)
            .bind(update.category.as_str())
            .bind(price)
            .bind(&update.images)
            .bind(&update.sizes)
            .bind(&update.colors)
            .bind(update.in_stock)
            .bind(update.featured)
            .bind(update.sku.as_deref())
            .bind(update.material.as_deref())
            .bind(update.care_instructions.as_deref())
            .bind(SqlxTimestamp::from(updated_at))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<u64, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(rows_affected)
    }

    async fn clear_products(&self) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        query(CLEAR_PRODUCTS_SQL).execute(&mut *tx).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn catalogue_stats(&self) -> Result<CatalogueStats, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let row = query(CATALOGUE_STATS_SQL).fetch_one(&mut *tx).await?;

        tx.commit().await?;

        Ok(CatalogueStats {
            total: try_get_count(&row, "total")?,
            in_stock: try_get_count(&row, "in_stock")?,
            featured: try_get_count(&row, "featured")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let category: String = row.try_get("category")?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            category: category.parse().map_err(|e| decode_error("category", e))?,
            price: {
                let price: i64 = row.try_get("price")?;
                u64::try_from(price).map_err(|e| decode_error("price", e))?
            },
            images: row.try_get("images")?,
            sizes: row.try_get("sizes")?,
            colors: row.try_get("colors")?,
            in_stock: row.try_get("in_stock")?,
            featured: row.try_get("featured")?,
            sku: row.try_get("sku")?,
            material: row.try_get("material")?,
            care_instructions: row.try_get("care_instructions")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

fn try_get_count(row: &PgRow, col: &str) -> Result<u64, ProductsServiceError> {
    let count: i64 = row.try_get(col).map_err(ProductsServiceError::from)?;

    u64::try_from(count)
        .map_err(|e| decode_error(col, e))
        .map_err(Into::into)
}

fn bind_amount(amount: u64) -> Result<i64, ProductsServiceError> {
    i64::try_from(amount)
        .map_err(|e| decode_error("price", e))
        .map_err(Into::into)
}

fn decode_error(
    col: &str,
    source: impl std::error::Error + Send + Sync + 'static,
) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(source),
    }
}
