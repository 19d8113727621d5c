//! Entity model: in-memory representation with validate-then-store mutators.

mod favorite;
mod product;
mod profile;

pub use favorite::Favorite;
pub use product::Product;
pub use profile::Profile;

/// Serialize timestamps as integer milliseconds since the Unix epoch,
/// the encoding the frontend consumes.
pub(crate) mod epoch_millis {
    use chrono::{DateTime, Utc};
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.timestamp_millis())
    }
}
