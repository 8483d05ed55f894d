use serde::Serialize;
use serde_json::{json, Value};

use super::path;
use crate::transport::Transport;
use crate::{Client, Result};

impl<T> Client<T>
where
    T: Transport,
{
    pub async fn get_product(&self, sku: &str) -> Result<Value> {
        self.get(&path(&format!("products/{}", sku)), None).await
    }

    pub async fn set_product<P: Serialize + ?Sized>(&self, product: &P) -> Result<Value> {
        let product = serde_json::to_value(product)?;
        self.post(&path("products"), &json!({ "product": product }))
            .await
    }

    /// Searches products matching every filter of a single filter group.
    ///
    /// `filters` is a list of `{field, value, condition_type}` objects;
    /// `page_size` and `current_page` are passed through unchanged.
    pub async fn get_products<F: Serialize + ?Sized>(
        &self,
        filters: &F,
        page_size: u32,
        current_page: u32,
    ) -> Result<Value> {
        let filters = serde_json::to_value(filters)?;
        let data = json!({
            "searchCriteria": {
                "currentPage": current_page,
                "pageSize": page_size,
                "filterGroups": [
                    { "filters": filters }
                ]
            }
        });
        self.get(&path("products/"), Some(data)).await
    }

    pub async fn get_product_media(&self, sku: &str) -> Result<Value> {
        self.get(&path(&format!("products/{}/media", sku)), None)
            .await
    }

    pub async fn set_product_media<E: Serialize + ?Sized>(
        &self,
        sku: &str,
        entry: &E,
    ) -> Result<Value> {
        let entry = serde_json::to_value(entry)?;
        self.post(
            &path(&format!("products/{}/media", sku)),
            &json!({ "entry": entry }),
        )
        .await
    }

    pub async fn remove_product_media(&self, sku: &str, media_id: u64) -> Result<Value> {
        self.delete(&path(&format!("products/{}/media/{}", sku, media_id)), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use http::Method;
    use serde_json::json;

    use crate::resources::DEFAULT_PAGE_SIZE;
    use crate::client::tests::{client, RecordingTransport};

    #[tokio::test]
    async fn get_product() {
        let transport = RecordingTransport::default().respond(r#"{"id": 5, "sku": "ABC~1"}"#);
        let product = client(transport.clone()).get_product("ABC~1").await.unwrap();

        assert_eq!(product["id"], 5);
        let request = transport.last_request();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.url, "http://host/rest/all/V1/products/ABC~1");
    }

    #[tokio::test]
    async fn set_product_wraps_payload() {
        let transport = RecordingTransport::default();
        client(transport.clone())
            .set_product(&json!({"sku": "ABC", "price": 10}))
            .await
            .unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url, "http://host/rest/all/V1/products");
        let body: serde_json::Value =
            serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"product": {"sku": "ABC", "price": 10}}));
    }

    #[tokio::test]
    async fn get_products_flattens_search_criteria() {
        let transport = RecordingTransport::default().respond(r#"{"items": [], "total_count": 0}"#);
        client(transport.clone())
            .get_products(
                &json!([{"field": "sku", "value": "ABC%", "condition_type": "like"}]),
                DEFAULT_PAGE_SIZE,
                1,
            )
            .await
            .unwrap();

        let request = transport.last_request();
        let (url, query) = {
            let mut parts = request.url.splitn(2, '?');
            (parts.next().unwrap().to_string(), parts.next().unwrap().to_string())
        };
        assert_eq!(url, "http://host/rest/all/V1/products/");
        let decoded: Vec<(String, String)> = serde_urlencoded::from_str(&query).unwrap();
        assert_eq!(
            decoded,
            vec![
                ("searchCriteria[currentPage]".to_string(), "1".to_string()),
                (
                    "searchCriteria[filterGroups][0][filters][0][condition_type]".to_string(),
                    "like".to_string()
                ),
                (
                    "searchCriteria[filterGroups][0][filters][0][field]".to_string(),
                    "sku".to_string()
                ),
                (
                    "searchCriteria[filterGroups][0][filters][0][value]".to_string(),
                    "ABC%".to_string()
                ),
                ("searchCriteria[pageSize]".to_string(), "100".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn product_media() {
        let transport = RecordingTransport::default();
        let client = client(transport.clone());

        client.get_product_media("ABC").await.unwrap();
        assert_eq!(
            transport.last_request().url,
            "http://host/rest/all/V1/products/ABC/media"
        );

        client
            .set_product_media("ABC", &json!({"media_type": "image", "label": "front"}))
            .await
            .unwrap();
        let request = transport.last_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(
            request.body.as_deref(),
            Some(r#"{"entry":{"label":"front","media_type":"image"}}"#)
        );

        client.remove_product_media("ABC", 7).await.unwrap();
        let request = transport.last_request();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.url, "http://host/rest/all/V1/products/ABC/media/7");
        assert_eq!(request.body, None);
    }
}
