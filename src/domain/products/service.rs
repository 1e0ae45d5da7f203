//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    auth::Actor,
    notifications::{NotificationSink, format},
};

use super::{
    errors::ProductsServiceError,
    models::{CatalogueStats, NewProduct, Product, ProductFilter, ProductUpdate, ProductUuid},
    repository::ProductsRepository,
};

/// Catalogue service over an injected store.
#[derive(Clone)]
pub struct StoreProductsService {
    repository: Arc<dyn ProductsRepository>,
    notifications: Arc<dyn NotificationSink>,
}

impl std::fmt::Debug for StoreProductsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreProductsService").finish_non_exhaustive()
    }
}

impl StoreProductsService {
    #[must_use]
    pub fn new(
        repository: Arc<dyn ProductsRepository>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            repository,
            notifications,
        }
    }

    fn build(product: NewProduct, now: Timestamp) -> Product {
        Product {
            uuid: product.uuid,
            name: product.name,
            description: product.description,
            category: product.category,
            price: product.price,
            images: product.images,
            sizes: product.sizes,
            colors: product.colors,
            in_stock: product.in_stock,
            featured: product.featured,
            sku: product.sku,
            material: product.material,
            care_instructions: product.care_instructions,
            created_at: now,
            updated_at: now,
        }
    }
}

#[async_trait]
impl ProductsService for StoreProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        self.repository.list_products(&filter).await
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        self.repository.get_product(product).await
    }

    async fn create_product(
        &self,
        actor: &Actor,
        product: NewProduct,
    ) -> Result<Product, ProductsServiceError> {
        if !actor.is_admin() {
            return Err(ProductsServiceError::Forbidden);
        }

        let errors = validate_listing(&product.name, &product.description, &product.images);
        if !errors.is_empty() {
            return Err(ProductsServiceError::Validation(errors));
        }

        let record = Self::build(product, Timestamp::now());

        self.repository.insert_product(&record).await?;

        Ok(record)
    }

    async fn update_product(
        &self,
        actor: &Actor,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        if !actor.is_admin() {
            return Err(ProductsServiceError::Forbidden);
        }

        let errors = validate_listing(&update.name, &update.description, &update.images);
        if !errors.is_empty() {
            return Err(ProductsServiceError::Validation(errors));
        }

        let current = self.repository.get_product(product).await?;

        let updated = self
            .repository
            .update_product(product, &update, Timestamp::now())
            .await?;

        if current.in_stock && !updated.in_stock {
            self.notifications
                .send(&format::low_stock(&updated))
                .await;
        }

        Ok(updated)
    }

    async fn delete_product(
        &self,
        actor: &Actor,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        if !actor.is_admin() {
            return Err(ProductsServiceError::Forbidden);
        }

        let rows_affected = self.repository.delete_product(product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        Ok(())
    }

    async fn seed_catalogue(
        &self,
        actor: &Actor,
        products: Vec<NewProduct>,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        if !actor.is_admin() {
            return Err(ProductsServiceError::Forbidden);
        }

        self.repository.clear_products().await?;

        let now = Timestamp::now();
        let mut seeded = Vec::with_capacity(products.len());

        for product in products {
            let record = Self::build(product, now);
            self.repository.insert_product(&record).await?;
            seeded.push(record);
        }

        Ok(seeded)
    }

    async fn catalogue_stats(&self, actor: &Actor) -> Result<CatalogueStats, ProductsServiceError> {
        if !actor.is_admin() {
            return Err(ProductsServiceError::Forbidden);
        }

        self.repository.catalogue_stats().await
    }
}

fn validate_listing(name: &str, description: &str, images: &[String]) -> Vec<String> {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push("Product name is required".to_string());
    }

    if description.trim().is_empty() {
        errors.push("Product description is required".to_string());
    }

    if images.is_empty() {
        errors.push("At least one image is required".to_string());
    }

    errors
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// List the catalogue, newest first, with optional filters.
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<Product>, ProductsServiceError>;

    /// Fetch a single listing.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError>;

    /// Create a listing; admin only.
    async fn create_product(
        &self,
        actor: &Actor,
        product: NewProduct,
    ) -> Result<Product, ProductsServiceError>;

    /// Replace a listing; admin only. Alerts the admin channel when the
    /// update takes a product out of stock.
    async fn update_product(
        &self,
        actor: &Actor,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Remove a listing; admin only.
    async fn delete_product(
        &self,
        actor: &Actor,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError>;

    /// Replace the whole catalogue with the given fixtures; admin only.
    async fn seed_catalogue(
        &self,
        actor: &Actor,
        products: Vec<NewProduct>,
    ) -> Result<Vec<Product>, ProductsServiceError>;

    /// Catalogue counters for the back office; admin only.
    async fn catalogue_stats(&self, actor: &Actor)
    -> Result<CatalogueStats, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::products::{fixtures, models::Category},
        test::TestContext,
    };

    use super::*;

    fn listing(name: &str, category: Category, featured: bool) -> NewProduct {
        NewProduct {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            description: "Impeccably crafted.".to_string(),
            category,
            price: 1_799_00,
            images: vec!["/collection.png".to_string()],
            sizes: vec!["S".to_string(), "M".to_string()],
            colors: vec!["Navy".to_string()],
            in_stock: true,
            featured,
            sku: None,
            material: None,
            care_instructions: None,
        }
    }

    #[tokio::test]
    async fn create_product_requires_admin() {
        let ctx = TestContext::new();

        let result = ctx
            .products
            .create_product(
                &Actor::customer("user-1"),
                listing("Classic Blazer", Category::Menswear, false),
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_rejects_incomplete_listings() {
        let ctx = TestContext::new();
        let admin = Actor::admin("admin-1");

        let mut incomplete = listing("", Category::Menswear, false);
        incomplete.images.clear();

        let result = ctx.products.create_product(&admin, incomplete).await;

        match result {
            Err(ProductsServiceError::Validation(errors)) => assert_eq!(
                errors,
                vec!["Product name is required", "At least one image is required"]
            ),
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn listing_filters_compose() -> TestResult {
        let ctx = TestContext::new();
        let admin = Actor::admin("admin-1");

        ctx.products
            .create_product(&admin, listing("Classic Blazer", Category::Menswear, false))
            .await?;
        ctx.products
            .create_product(&admin, listing("Evening Gown", Category::Womenswear, true))
            .await?;
        ctx.products
            .create_product(&admin, listing("Silk Dress", Category::Womenswear, false))
            .await?;

        let womenswear = ctx
            .products
            .list_products(ProductFilter {
                category: Some(Category::Womenswear),
                ..ProductFilter::default()
            })
            .await?;
        assert_eq!(womenswear.len(), 2);

        let featured_womenswear = ctx
            .products
            .list_products(ProductFilter {
                category: Some(Category::Womenswear),
                featured: Some(true),
                ..ProductFilter::default()
            })
            .await?;
        assert_eq!(featured_womenswear.len(), 1);
        assert_eq!(featured_womenswear[0].name, "Evening Gown");

        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_the_listing() -> TestResult {
        let ctx = TestContext::new();
        let admin = Actor::admin("admin-1");

        let created = ctx
            .products
            .create_product(&admin, listing("Classic Blazer", Category::Menswear, false))
            .await?;

        let updated = ctx
            .products
            .update_product(
                &admin,
                created.uuid,
                ProductUpdate {
                    name: "Classic Blazer - Navy".to_string(),
                    description: created.description.clone(),
                    category: created.category,
                    price: 1_899_00,
                    images: created.images.clone(),
                    sizes: created.sizes.clone(),
                    colors: created.colors.clone(),
                    in_stock: true,
                    featured: true,
                    sku: Some("BLZ-NVY-01".to_string()),
                    material: None,
                    care_instructions: None,
                },
            )
            .await?;

        assert_eq!(updated.name, "Classic Blazer - Navy");
        assert_eq!(updated.price, 1_899_00);
        assert!(updated.featured);
        assert_eq!(updated.sku.as_deref(), Some("BLZ-NVY-01"));
        assert_eq!(updated.created_at, created.created_at);

        Ok(())
    }

    #[tokio::test]
    async fn taking_a_product_out_of_stock_alerts_the_admin_channel() -> TestResult {
        let ctx = TestContext::new();
        let admin = Actor::admin("admin-1");

        let created = ctx
            .products
            .create_product(&admin, listing("Designer Handbag", Category::Accessories, true))
            .await?;

        let mut update = ProductUpdate {
            name: created.name.clone(),
            description: created.description.clone(),
            category: created.category,
            price: created.price,
            images: created.images.clone(),
            sizes: created.sizes.clone(),
            colors: created.colors.clone(),
            in_stock: false,
            featured: created.featured,
            sku: None,
            material: None,
            care_instructions: None,
        };

        ctx.products
            .update_product(&admin, created.uuid, update.clone())
            .await?;

        let messages = ctx.notifications.messages();
        assert!(
            messages.iter().any(|m| m.contains("LOW STOCK ALERT")),
            "expected a low stock alert, got {messages:?}"
        );

        // Updating an already out-of-stock product does not alert again.
        update.price = 1_999_00;
        ctx.products
            .update_product(&admin, created.uuid, update)
            .await?;

        let alerts = ctx
            .notifications
            .messages()
            .iter()
            .filter(|m| m.contains("LOW STOCK ALERT"))
            .count();
        assert_eq!(alerts, 1);

        Ok(())
    }

    #[tokio::test]
    async fn delete_unknown_product_returns_not_found() {
        let ctx = TestContext::new();
        let admin = Actor::admin("admin-1");

        let result = ctx.products.delete_product(&admin, ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn seed_replaces_the_catalogue_with_the_fixture_collection() -> TestResult {
        let ctx = TestContext::new();
        let admin = Actor::admin("admin-1");

        ctx.products
            .create_product(&admin, listing("Stale Listing", Category::Menswear, false))
            .await?;

        let seeded = ctx
            .products
            .seed_catalogue(&admin, fixtures::sample_products())
            .await?;

        assert_eq!(seeded.len(), 6);

        let all = ctx.products.list_products(ProductFilter::default()).await?;
        assert_eq!(all.len(), 6);
        assert!(all.iter().all(|p| p.name != "Stale Listing"));

        Ok(())
    }

    #[tokio::test]
    async fn catalogue_stats_count_stock_and_featured() -> TestResult {
        let ctx = TestContext::new();
        let admin = Actor::admin("admin-1");

        ctx.products
            .seed_catalogue(&admin, fixtures::sample_products())
            .await?;

        let stats = ctx.products.catalogue_stats(&admin).await?;

        assert_eq!(stats.total, 6);
        assert_eq!(stats.in_stock, 6);
        assert_eq!(stats.featured, 3);
        assert_eq!(stats.out_of_stock(), 0);

        Ok(())
    }
}
