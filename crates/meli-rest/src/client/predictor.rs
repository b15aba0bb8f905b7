use serde::Serialize;
use tracing::instrument;

use meli_auth::SiteId;
use meli_client::Route;

use crate::category::CategoryPrediction;
use crate::error::Result;

#[derive(Debug, Serialize)]
struct TitleQuery<'a> {
    title: &'a str,
}

impl super::MeliRestClient {
    /// Predict the category of an item from its title.
    #[instrument(skip(self))]
    pub async fn classify(&self, title: &str, site: SiteId) -> Result<CategoryPrediction> {
        let url = self.http.router().route_to(
            Route::CategoryPredictor,
            &[site.as_str()],
            &TitleQuery { title },
        )?;
        let prediction = self.http.send_json(self.http.get(url)).await?;
        Ok(prediction)
    }

    /// Predict categories for several titles in one request.
    ///
    /// Predictions come back in the order of `titles`. An empty slice is still
    /// sent.
    #[instrument(skip(self, titles), fields(count = titles.len()))]
    pub async fn classify_batch(
        &self,
        titles: &[&str],
        site: SiteId,
    ) -> Result<Vec<CategoryPrediction>> {
        let url = self
            .http
            .router()
            .route_to(Route::CategoryPredictor, &[site.as_str()], &())?;
        let body: Vec<TitleQuery<'_>> = titles.iter().map(|&title| TitleQuery { title }).collect();
        let request = self.http.post(url).json(&body)?;
        let predictions = self.http.send_json(request).await?;
        Ok(predictions)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{client_for, credentials};
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PREDICT: &str = "/sites/MLA/categories/category_predictor/predict";

    #[tokio::test]
    async fn test_classify() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PREDICT))
            .and(query_param("title", "Ipod Touch 5g 16gb"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "MLA352001",
                "name": "16 GB",
                "prediction_probability": 0.92,
                "path_from_root": [
                    {"id": "MLA1000", "name": "Electrónica, Audio y Video"},
                    {"id": "MLA352001", "name": "16 GB"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, credentials());
        let prediction = client.classify("Ipod Touch 5g 16gb", SiteId::Mla).await.unwrap();
        assert_eq!(prediction.id.as_str(), "MLA352001");
        assert_eq!(prediction.path_from_root.len(), 2);
    }

    #[tokio::test]
    async fn test_classify_batch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PREDICT))
            .and(body_json(json!([{"title": "Silla"}, {"title": "Mesa"}])))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "MLA1", "name": "Sillas", "prediction_probability": 0.8},
                {"id": "MLA2", "name": "Mesas", "prediction_probability": 0.7}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, credentials());
        let predictions = client
            .classify_batch(&["Silla", "Mesa"], SiteId::Mla)
            .await
            .unwrap();
        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[1].name, "Mesas");
    }

    #[tokio::test]
    async fn test_classify_batch_sends_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PREDICT))
            .and(body_json(json!([])))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, credentials());
        let predictions = client.classify_batch(&[], SiteId::Mla).await.unwrap();
        assert!(predictions.is_empty());
    }
}
