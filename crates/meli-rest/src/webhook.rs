//! Notification payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::product::ProductId;

/// A notification delivered by the marketplace to the application callback.
///
/// ```json
/// {
///   "resource": "/items/MLA686791111/price",
///   "user_id": 123456789,
///   "topic": "items_prices",
///   "application_id": 2069392825111111,
///   "attempts": 1,
///   "sent": "2017-10-09T13:58:23.347Z",
///   "received": "2017-10-09T13:58:23.329Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebHook {
    pub resource: String,
    pub user_id: u64,
    pub topic: String,
    pub application_id: u64,
    #[serde(default)]
    pub attempts: u32,
    pub sent: DateTime<Utc>,
    pub received: DateTime<Utc>,
}

impl WebHook {
    /// The resource path up to its last `/`.
    ///
    /// For `/items/MLA1/price` this is `/items/MLA1`. A path without `/` is
    /// returned unchanged.
    pub fn resource_id(&self) -> &str {
        match self.resource.rfind('/') {
            Some(idx) => &self.resource[..idx],
            None => &self.resource,
        }
    }

    /// Id of the item the notification refers to.
    pub fn product_id(&self) -> Option<ProductId> {
        let mut segments = self.resource.split('/').filter(|s| !s.is_empty());
        segments.find(|segment| *segment == "items")?;
        segments.next().map(ProductId::from)
    }
}
