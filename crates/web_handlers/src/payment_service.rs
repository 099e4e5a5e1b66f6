use booking_core::{CampaignStatus, DateRange, campaign_price_usd};
use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distr::Alphanumeric;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::campaign_service::ensure_owner;
use crate::types::{CheckoutResponse, InvoiceResponse, MarketplaceError};

/// Outcome of a checkout, with campaign details for the notification.
#[derive(Debug)]
pub struct CheckoutOutcome {
    /// Response returned to the caller.
    pub response: CheckoutResponse,
    /// Campaign title, for the event notification.
    pub title: String,
    /// Business name, for the event notification.
    pub business_name: String,
    /// Contact phone, for the event notification.
    pub phone: String,
}

/// Service for checkout and invoices.
///
/// Checkout is a status flip with no payment gateway: the payment row is
/// marked PAID and an invoice is issued in the same call.
pub struct PaymentService {
    pool: PgPool,
}

impl PaymentService {
    /// Creates a new instance of `PaymentService` with the provided database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Processes a checkout for the campaign.
    ///
    /// Non-admin callers must own the campaign. REJECTED and ENDED
    /// campaigns cannot be paid.
    pub async fn checkout(
        &self,
        caller: &Uuid,
        is_admin: bool,
        campaign_id: &Uuid,
        method: &str,
    ) -> Result<CheckoutOutcome, MarketplaceError> {
        let method = normalize_method(method).ok_or(MarketplaceError::BadPaymentMethod)?;

        let row = sqlx::query(
            r#"
            SELECT
                c.advertiser_id, c.status, c.start_date, c.end_date,
                c.title, c.business_name, c.phone,
                l.price_per_30_days
            FROM campaigns c
            JOIN locations l ON c.location_id = l.id
            WHERE c.id = $1
            "#,
        )
        .bind(campaign_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(MarketplaceError::CampaignNotFound)?;

        ensure_owner(row.get("advertiser_id"), caller, is_admin)?;

        let status: String = row.get("status");
        if status == CampaignStatus::Rejected.as_str() || status == CampaignStatus::Ended.as_str() {
            return Err(MarketplaceError::NotPayable);
        }

        let period = DateRange::new(row.get("start_date"), row.get("end_date"))?;
        let amount_usd = campaign_price_usd(row.get("price_per_30_days"), &period);

        let paid_at = Utc::now();
        let checkout_reference = build_checkout_reference(paid_at);

        // A colliding random suffix trips the invoice_number unique
        // constraint; one retry with a fresh number covers that.
        let invoice_number = match self
            .settle(campaign_id, method, amount_usd, &checkout_reference, paid_at)
            .await
        {
            Err(MarketplaceError::Database(sqlx::Error::Database(e)))
                if e.is_unique_violation() =>
            {
                self.settle(campaign_id, method, amount_usd, &checkout_reference, paid_at)
                    .await?
            }
            result => result?,
        };

        Ok(CheckoutOutcome {
            response: CheckoutResponse {
                invoice_number,
                amount_usd,
            },
            title: row.get("title"),
            business_name: row.get("business_name"),
            phone: row.get("phone"),
        })
    }

    /// Writes the payment and invoice rows in a single transaction and
    /// returns the invoice number, so a failure never leaves a PAID
    /// payment without its invoice.
    ///
    /// A repeat checkout keeps the invoice number (and the issue date
    /// embedded in it) from the first payment; only the amount is
    /// refreshed.
    async fn settle(
        &self,
        campaign_id: &Uuid,
        method: &str,
        amount_usd: f64,
        checkout_reference: &str,
        paid_at: DateTime<Utc>,
    ) -> Result<String, MarketplaceError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO payments (campaign_id, method, amount_usd, status, checkout_reference, paid_at)
            VALUES ($1, $2, $3, 'PAID', $4, $5)
            ON CONFLICT (campaign_id) DO UPDATE SET
                method = EXCLUDED.method,
                amount_usd = EXCLUDED.amount_usd,
                status = EXCLUDED.status,
                checkout_reference = EXCLUDED.checkout_reference,
                paid_at = EXCLUDED.paid_at
            "#,
        )
        .bind(campaign_id)
        .bind(method)
        .bind(amount_usd)
        .bind(checkout_reference)
        .bind(paid_at)
        .execute(&mut *tx)
        .await?;

        let invoice_row = sqlx::query(
            r#"
            INSERT INTO invoices (campaign_id, amount_usd, invoice_number, issued_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (campaign_id) DO UPDATE SET
                amount_usd = EXCLUDED.amount_usd
            RETURNING invoice_number
            "#,
        )
        .bind(campaign_id)
        .bind(amount_usd)
        .bind(build_invoice_number(paid_at))
        .bind(paid_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(invoice_row.get("invoice_number"))
    }

    /// Gets the invoice for a campaign. Non-admin callers must own the
    /// campaign.
    pub async fn get_invoice(
        &self,
        caller: &Uuid,
        is_admin: bool,
        campaign_id: &Uuid,
    ) -> Result<InvoiceResponse, MarketplaceError> {
        let row = sqlx::query(
            r#"
            SELECT
                i.campaign_id, i.amount_usd, i.invoice_number, i.issued_at,
                c.advertiser_id
            FROM invoices i
            JOIN campaigns c ON i.campaign_id = c.id
            WHERE i.campaign_id = $1
            "#,
        )
        .bind(campaign_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(MarketplaceError::InvoiceNotFound)?;

        ensure_owner(row.get("advertiser_id"), caller, is_admin)?;

        Ok(InvoiceResponse {
            campaign_id: row.get("campaign_id"),
            amount_usd: row.get("amount_usd"),
            invoice_number: row.get("invoice_number"),
            issued_at: row.get("issued_at"),
        })
    }
}

/// Accepted payment methods, normalized to lowercase.
pub fn normalize_method(method: &str) -> Option<&'static str> {
    match method.to_lowercase().as_str() {
        "card" => Some("card"),
        "click" => Some("click"),
        "payme" => Some("payme"),
        _ => None,
    }
}

/// Builds an invoice number of the form `SC-YYYYMMDD-XXXXX`.
pub fn build_invoice_number(date: DateTime<Utc>) -> String {
    let stamp = date.format("%Y%m%d");
    let rand_part: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(5)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect();
    format!("SC-{}-{}", stamp, rand_part)
}

fn build_checkout_reference(date: DateTime<Utc>) -> String {
    let rand_part: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(6)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect();
    format!("PAY-{}-{}", date.timestamp_millis(), rand_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names_are_normalized() {
        assert_eq!(normalize_method("CARD"), Some("card"));
        assert_eq!(normalize_method("payme"), Some("payme"));
        assert_eq!(normalize_method("Click"), Some("click"));
        assert_eq!(normalize_method("cash"), None);
        assert_eq!(normalize_method(""), None);
    }

    #[test]
    fn invoice_numbers_carry_the_issue_date() {
        let date = DateTime::parse_from_rfc3339("2024-03-05T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let number = build_invoice_number(date);
        assert!(number.starts_with("SC-20240305-"));
        assert_eq!(number.len(), "SC-20240305-".len() + 5);
    }

    #[test]
    fn regenerated_invoice_numbers_differ() {
        let date = Utc::now();
        // The retry after a unique-violation relies on a fresh suffix.
        assert_ne!(build_invoice_number(date), build_invoice_number(date));
    }
}
