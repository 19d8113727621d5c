//! Product entity: short content posted by a profile.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::AppError;
use crate::model::epoch_millis;
use crate::validation::sanitize_content;

pub const CONTENT_MAX_LEN: usize = 140;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    product_id: Option<i64>,
    product_profile_id: i64,
    product_content: String,
    #[serde(with = "epoch_millis")]
    product_date: DateTime<Utc>,
}

impl Product {
    /// Build a product, validating every field in order. A `None` date
    /// defaults to the current time.
    pub fn new(
        product_id: Option<i64>,
        product_profile_id: i64,
        content: &str,
        product_date: Option<DateTime<Utc>>,
    ) -> Result<Self, AppError> {
        let mut product = Product {
            product_id: None,
            product_profile_id: 0,
            product_content: String::new(),
            product_date: Utc::now(),
        };
        product.set_product_id(product_id)?;
        product.set_profile_id(product_profile_id)?;
        product.set_content(content)?;
        product.set_date(product_date);
        Ok(product)
    }

    pub fn product_id(&self) -> Option<i64> {
        self.product_id
    }

    pub fn profile_id(&self) -> i64 {
        self.product_profile_id
    }

    pub fn content(&self) -> &str {
        &self.product_content
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.product_date
    }

    /// None means "not yet persisted" and is stored verbatim.
    pub fn set_product_id(&mut self, product_id: Option<i64>) -> Result<(), AppError> {
        if let Some(id) = product_id {
            if id <= 0 {
                return Err(AppError::Range("product id is not positive".into()));
            }
        }
        self.product_id = product_id;
        Ok(())
    }

    /// The owning profile is required; zero or negative ids are rejected.
    pub fn set_profile_id(&mut self, profile_id: i64) -> Result<(), AppError> {
        if profile_id <= 0 {
            return Err(AppError::Range("product profile id is not positive".into()));
        }
        self.product_profile_id = profile_id;
        Ok(())
    }

    pub fn set_content(&mut self, content: &str) -> Result<(), AppError> {
        let content = sanitize_content(content);
        if content.is_empty() {
            return Err(AppError::Invalid("product content is empty".into()));
        }
        if content.chars().count() > CONTENT_MAX_LEN {
            return Err(AppError::Range(format!(
                "product content exceeds {CONTENT_MAX_LEN} characters"
            )));
        }
        self.product_content = content;
        Ok(())
    }

    pub fn set_date(&mut self, product_date: Option<DateTime<Utc>>) {
        self.product_date = product_date.unwrap_or_else(Utc::now);
    }

    /// Called by the store after a successful insert.
    pub(crate) fn assign_id(&mut self, product_id: i64) {
        self.product_id = Some(product_id);
    }
}
