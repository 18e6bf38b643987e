use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Payment provider available on the guest payment page. The provider's own
/// redirect/callback mechanics live outside this service; only the listing
/// and the completion callback are modeled here.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct PaymentProvider {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub code: String,
    pub enabled: bool,
}

impl PaymentProvider {
    pub fn new(company_id: String, name: String, code: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            company_id,
            name,
            code,
            enabled: true,
        }
    }
}
