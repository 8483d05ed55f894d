use serde::Serialize;
use serde_json::{json, Value};

use super::path;
use crate::transport::Transport;
use crate::{Client, Result};

impl<T> Client<T>
where
    T: Transport,
{
    pub async fn get_shipment(&self, shipment_id: u64) -> Result<Value> {
        self.get(&path(&format!("shipment/{}", shipment_id)), None)
            .await
    }

    /// Lists every shipment (`searchCriteria=all`).
    pub async fn get_shipments(&self) -> Result<Value> {
        self.get(&path("shipments"), Some(json!({ "searchCriteria": "all" })))
            .await
    }

    /// Ships an order; `shipment` is posted as is.
    pub async fn set_order_shipment<S: Serialize + ?Sized>(
        &self,
        entity_id: u64,
        shipment: &S,
    ) -> Result<Value> {
        self.post(&path(&format!("order/{}/ship", entity_id)), shipment)
            .await
    }
}
