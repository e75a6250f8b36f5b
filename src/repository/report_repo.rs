use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::{
    SalesByCarItem, SalesByDateItem, SalesBySellerItem, SalesChartItem, TopSeller,
};

/// How many daily points the dashboard chart carries (today inclusive).
pub const CHART_DAYS: i64 = 30;

#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Sale count and revenue for a single calendar day.
    pub async fn day_stats(&self, day: NaiveDate) -> Result<(i64, f64), sqlx::Error> {
        sqlx::query_as::<_, (i64, f64)>(
            "SELECT COUNT(id), COALESCE(SUM(sale_price), 0)
             FROM sales WHERE sale_date::date = $1",
        )
        .bind(day)
        .fetch_one(&self.pool)
        .await
    }

    /// Sale count and revenue from a calendar day onwards (inclusive).
    pub async fn stats_since(&self, from: NaiveDate) -> Result<(i64, f64), sqlx::Error> {
        sqlx::query_as::<_, (i64, f64)>(
            "SELECT COUNT(id), COALESCE(SUM(sale_price), 0)
             FROM sales WHERE sale_date::date >= $1",
        )
        .bind(from)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn available_cars(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(id) FROM cars WHERE status = 'available'")
            .fetch_one(&self.pool)
            .await
    }

    /// Top sellers since `from` by sale count. Revenue breaks ties so the
    /// ordering stays deterministic.
    pub async fn top_sellers(
        &self,
        from: NaiveDate,
        limit: i64,
    ) -> Result<Vec<TopSeller>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (i64, String, i64, f64)>(
            "SELECT s.id, s.full_name, COUNT(sa.id), COALESCE(SUM(sa.sale_price), 0)
             FROM sellers s
             JOIN sales sa ON sa.seller_id = s.id
             WHERE sa.sale_date::date >= $1
             GROUP BY s.id, s.full_name
             ORDER BY COUNT(sa.id) DESC, SUM(sa.sale_price) DESC, s.id
             LIMIT $2",
        )
        .bind(from)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(seller_id, seller_name, sales_count, revenue)| TopSeller {
                seller_id,
                seller_name,
                sales_count,
                revenue,
            })
            .collect())
    }

    /// Per-day sales between `from` and `to` inclusive, ascending. Days with
    /// no sales are absent; callers zero-fill where the contract requires it.
    pub async fn daily_series(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<(NaiveDate, i64, f64)>, sqlx::Error> {
        sqlx::query_as::<_, (NaiveDate, i64, f64)>(
            "SELECT sale_date::date, COUNT(id), COALESCE(SUM(sale_price), 0)
             FROM sales
             WHERE sale_date::date >= $1 AND sale_date::date <= $2
             GROUP BY sale_date::date
             ORDER BY sale_date::date",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn sales_by_date(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<SalesByDateItem>, sqlx::Error> {
        let rows = self.daily_series(from, to).await?;
        Ok(rows
            .into_iter()
            .map(|(date, sales_count, total_revenue)| SalesByDateItem {
                date,
                sales_count,
                total_revenue,
            })
            .collect())
    }

    pub async fn sales_by_seller(
        &self,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<Vec<SalesBySellerItem>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (i64, String, i64, f64, f64)>(
            "SELECT s.id, s.full_name, COUNT(sa.id),
                    COALESCE(SUM(sa.sale_price), 0),
                    COALESCE(AVG(sa.sale_price), 0)
             FROM sellers s
             JOIN sales sa ON sa.seller_id = s.id
             WHERE ($1::date IS NULL OR sa.sale_date::date >= $1)
               AND ($2::date IS NULL OR sa.sale_date::date <= $2)
             GROUP BY s.id, s.full_name
             ORDER BY SUM(sa.sale_price) DESC",
        )
        .bind(date_from)
        .bind(date_to)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(
                |(seller_id, seller_name, sales_count, total_revenue, average_price)| {
                    SalesBySellerItem {
                        seller_id,
                        seller_name,
                        sales_count,
                        total_revenue,
                        average_price,
                    }
                },
            )
            .collect())
    }

    pub async fn sales_by_car(
        &self,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<Vec<SalesByCarItem>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (String, String, i64, f64)>(
            "SELECT c.brand, c.model, COUNT(sa.id), COALESCE(SUM(sa.sale_price), 0)
             FROM cars c
             JOIN sales sa ON sa.car_id = c.id
             WHERE ($1::date IS NULL OR sa.sale_date::date >= $1)
               AND ($2::date IS NULL OR sa.sale_date::date <= $2)
             GROUP BY c.brand, c.model
             ORDER BY COUNT(sa.id) DESC",
        )
        .bind(date_from)
        .bind(date_to)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(brand, model, sales_count, total_revenue)| SalesByCarItem {
                brand,
                model,
                sales_count,
                total_revenue,
            })
            .collect())
    }
}

/// Expand a sparse per-day aggregation into exactly `days` chart points ending
/// on `today`, oldest first, with explicit zeros for days without sales.
pub fn fill_daily_series(
    today: NaiveDate,
    days: i64,
    rows: &[(NaiveDate, i64, f64)],
) -> Vec<SalesChartItem> {
    (0..days)
        .rev()
        .map(|i| {
            let date = today - chrono::Duration::days(i);
            let (count, revenue) = rows
                .iter()
                .find(|(d, _, _)| *d == date)
                .map(|(_, c, r)| (*c, *r))
                .unwrap_or((0, 0.0));
            SalesChartItem {
                date,
                count,
                revenue,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn chart_always_has_thirty_points_oldest_first() {
        let today = date("2026-08-30");
        let chart = fill_daily_series(today, CHART_DAYS, &[]);
        assert_eq!(chart.len(), 30);
        assert_eq!(chart[0].date, date("2026-08-01"));
        assert_eq!(chart[29].date, today);
        assert!(chart.iter().all(|p| p.count == 0 && p.revenue == 0.0));
    }

    #[test]
    fn days_with_sales_keep_their_values() {
        let today = date("2026-08-30");
        let rows = vec![
            (date("2026-08-30"), 2, 50_000.0),
            (date("2026-08-15"), 1, 20_000.0),
        ];
        let chart = fill_daily_series(today, CHART_DAYS, &rows);
        assert_eq!(chart[29].count, 2);
        assert_eq!(chart[29].revenue, 50_000.0);
        assert_eq!(chart[14].date, date("2026-08-15"));
        assert_eq!(chart[14].count, 1);
        assert_eq!(chart[13].count, 0);
    }

    #[test]
    fn chart_spans_month_boundaries() {
        let today = date("2026-03-05");
        let chart = fill_daily_series(today, CHART_DAYS, &[]);
        assert_eq!(chart[0].date, date("2026-02-04"));
        assert_eq!(chart[29].date, today);
    }
}
