use serde::Serialize;
use serde_json::{json, Value};

use super::path;
use crate::transport::Transport;
use crate::{Client, Result};

impl<T> Client<T>
where
    T: Transport,
{
    pub async fn get_category(&self, category_id: u64) -> Result<Value> {
        self.get(&path(&format!("categories/{}", category_id)), None)
            .await
    }

    pub async fn set_category<C: Serialize + ?Sized>(&self, category: &C) -> Result<Value> {
        let category = serde_json::to_value(category)?;
        self.post(
            &path("categories/"),
            &json!({ "category": category, "saveOptions": true }),
        )
        .await
    }

    pub async fn move_category(&self, category_id: u64, parent_id: u64) -> Result<Value> {
        self.put(
            &path(&format!("categories/{}/move", category_id)),
            &json!({ "parentId": parent_id }),
        )
        .await
    }
}
