//! Favorite entity: a profile marking a product, keyed by the pair of ids.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::AppError;
use crate::model::epoch_millis;

/// Weak entity with composite identity `(product id, profile id)` and no
/// auto-increment key of its own.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    favorite_product_id: Option<i64>,
    favorite_profile_id: Option<i64>,
    #[serde(with = "epoch_millis")]
    favorite_date: DateTime<Utc>,
}

impl Favorite {
    pub fn new(
        favorite_product_id: Option<i64>,
        favorite_profile_id: Option<i64>,
        favorite_date: Option<DateTime<Utc>>,
    ) -> Result<Self, AppError> {
        let mut favorite = Favorite {
            favorite_product_id: None,
            favorite_profile_id: None,
            favorite_date: Utc::now(),
        };
        favorite.set_product_id(favorite_product_id)?;
        favorite.set_profile_id(favorite_profile_id)?;
        favorite.set_date(favorite_date);
        Ok(favorite)
    }

    pub fn product_id(&self) -> Option<i64> {
        self.favorite_product_id
    }

    pub fn profile_id(&self) -> Option<i64> {
        self.favorite_profile_id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.favorite_date
    }

    pub fn set_product_id(&mut self, product_id: Option<i64>) -> Result<(), AppError> {
        if let Some(id) = product_id {
            if id <= 0 {
                return Err(AppError::Range("favorite product id is not positive".into()));
            }
        }
        self.favorite_product_id = product_id;
        Ok(())
    }

    pub fn set_profile_id(&mut self, profile_id: Option<i64>) -> Result<(), AppError> {
        if let Some(id) = profile_id {
            if id <= 0 {
                return Err(AppError::Range("favorite profile id is not positive".into()));
            }
        }
        self.favorite_profile_id = profile_id;
        Ok(())
    }

    pub fn set_date(&mut self, favorite_date: Option<DateTime<Utc>>) {
        self.favorite_date = favorite_date.unwrap_or_else(Utc::now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_accept_null_and_reject_non_positive() {
        let favorite = Favorite::new(None, None, None).unwrap();
        assert_eq!(favorite.product_id(), None);
        assert_eq!(favorite.profile_id(), None);

        assert!(matches!(
            Favorite::new(Some(0), Some(1), None),
            Err(AppError::Range(_))
        ));
        assert!(matches!(
            Favorite::new(Some(1), Some(-2), None),
            Err(AppError::Range(_))
        ));
    }

    #[test]
    fn date_defaults_to_now() {
        let before = Utc::now();
        let favorite = Favorite::new(Some(1), Some(2), None).unwrap();
        assert!(favorite.date() >= before && favorite.date() <= Utc::now());
    }

    #[test]
    fn serializes_with_wire_names() {
        let date = DateTime::from_timestamp_millis(1500000000000).unwrap();
        let favorite = Favorite::new(Some(3), Some(9), Some(date)).unwrap();
        let json = serde_json::to_value(favorite).unwrap();
        assert_eq!(json["favoriteProductId"], 3);
        assert_eq!(json["favoriteProfileId"], 9);
        assert_eq!(json["favoriteDate"], 1500000000000i64);
    }
}
