use anyhow::Context;
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::{CarStatus, SaleCreate, SaleResponse};
use crate::repository::SaleRepository;

/// Owns the one multi-statement transaction in the system: recording a sale
/// and flipping the car to sold must commit together or not at all.
#[derive(Clone)]
pub struct SaleService {
    sale_repo: SaleRepository,
    pool: PgPool,
}

impl SaleService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            sale_repo: SaleRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn repo(&self) -> &SaleRepository {
        &self.sale_repo
    }

    /// Validate car, client, and seller, insert the sale, and mark the car
    /// sold, all within a single transaction. The status flip is conditioned
    /// on `status = 'available'` inside the same transaction, so of two
    /// concurrent requests for one car exactly one commits; the loser gets
    /// an invalid-state error instead of a second sale.
    pub async fn create_sale(&self, payload: &SaleCreate) -> Result<SaleResponse, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        let car = self
            .sale_repo
            .find_car(&mut tx, payload.car_id)
            .await?
            .ok_or_else(|| AppError::not_found("Car not found"))?;
        if car.status != CarStatus::Available {
            return Err(AppError::InvalidState("Car is not available".to_string()));
        }

        if !self.sale_repo.client_exists(&mut tx, payload.client_id).await? {
            return Err(AppError::not_found("Client not found"));
        }

        let seller = self
            .sale_repo
            .find_seller(&mut tx, payload.seller_id)
            .await?
            .ok_or_else(|| AppError::not_found("Seller not found"))?;
        if !seller.is_active {
            return Err(AppError::InvalidState("Seller is not active".to_string()));
        }

        let sale = self
            .sale_repo
            .insert(
                &mut tx,
                payload.car_id,
                payload.client_id,
                payload.seller_id,
                payload.sale_price,
            )
            .await?;

        // Re-check under the transaction: a concurrent sale of the same car
        // leaves zero rows to update and the whole transaction rolls back.
        if !self.sale_repo.mark_car_sold(&mut tx, payload.car_id).await? {
            return Err(AppError::InvalidState("Car is not available".to_string()));
        }

        tx.commit().await.context("Failed to commit transaction")?;

        tracing::info!(
            "Recorded sale {} (car {}, seller {})",
            sale.id,
            payload.car_id,
            payload.seller_id
        );

        self.sale_repo
            .find_by_id(sale.id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("sale vanished after commit")))
    }
}
