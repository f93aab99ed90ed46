mod repository;

pub use repository::*;

use serde::{Deserialize, Serialize};

/// Dated external resource link shown on the student dashboard.
///
/// `date` stays free text on purpose; the portal displays it verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Link {
    pub id: String,
    pub title: String,
    pub date: String,
    pub url: String,
}
