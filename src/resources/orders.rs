use serde::Serialize;
use serde_json::{json, Value};

use super::path;
use crate::transport::Transport;
use crate::{Client, Result};

impl<T> Client<T>
where
    T: Transport,
{
    /// Lists every order (`searchCriteria=all`).
    pub async fn get_orders(&self) -> Result<Value> {
        self.get(&path("orders"), Some(json!({ "searchCriteria": "all" })))
            .await
    }

    pub async fn get_order(&self, order_id: u64) -> Result<Value> {
        self.get(&path(&format!("orders/{}", order_id)), None).await
    }

    pub async fn set_order<O: Serialize + ?Sized>(&self, order: &O) -> Result<Value> {
        let order = serde_json::to_value(order)?;
        self.put(&path("orders/create"), &json!({ "entity": order }))
            .await
    }

    /// Updates the status of an existing order.
    ///
    /// See https://docs.magento.com/m2/ce/user_guide/sales/order-status.html
    pub async fn set_order_status(
        &self,
        entity_id: u64,
        status: &str,
        increment_id: &str,
    ) -> Result<Value> {
        let order = json!({
            "entity_id": entity_id,
            "status": status,
            "increment_id": increment_id,
        });
        self.post(&path("orders"), &json!({ "entity": order })).await
    }
}
