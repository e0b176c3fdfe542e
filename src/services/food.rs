use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Config;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodInfo {
    pub name: String,
    pub calories_per_100g: f64,
}

/// Result of a food search. "Nothing matched" and "the provider failed" are
/// kept apart so callers can word their reply accordingly.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FoodLookupOutcome {
    Found(FoodInfo),
    NotFound {
        query: String,
    },
    Error {
        name: String,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        suggestion: Option<String>,
    },
}

#[async_trait]
pub trait FoodLookup: Send + Sync {
    async fn lookup(&self, query: &str) -> FoodLookupOutcome;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct Product {
    product_name: Option<String>,
    #[serde(default)]
    nutriments: serde_json::Value,
}

/// OpenFoodFacts product search; only the first hit is considered.
#[derive(Debug, Clone)]
pub struct OpenFoodFactsClient {
    client: reqwest::Client,
    api_url: String,
}

impl OpenFoodFactsClient {
    pub fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.provider_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.food_api_url.clone(),
        })
    }

    async fn search(&self, query: &str) -> Result<SearchResponse, reqwest::Error> {
        self.client
            .get(&self.api_url)
            .query(&[
                ("search_terms", query),
                ("search_simple", "1"),
                ("action", "process"),
                ("fields", "product_name,nutriments"),
                ("json", "1"),
                ("page_size", "1"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

fn outcome_of(query: &str, response: SearchResponse) -> FoodLookupOutcome {
    let not_found = || FoodLookupOutcome::NotFound {
        query: query.to_string(),
    };

    let Some(product) = response.products.into_iter().next() else {
        return not_found();
    };

    let calories = product
        .nutriments
        .get("energy-kcal_100g")
        .and_then(|v| v.as_f64())
        .filter(|kcal| kcal.is_finite() && *kcal > 0.0);

    let Some(calories_per_100g) = calories else {
        return not_found();
    };

    let name = product
        .product_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| query.to_string());

    FoodLookupOutcome::Found(FoodInfo {
        name,
        calories_per_100g,
    })
}

#[async_trait]
impl FoodLookup for OpenFoodFactsClient {
    async fn lookup(&self, query: &str) -> FoodLookupOutcome {
        match self.search(query).await {
            Ok(response) => outcome_of(query, response),
            Err(e) => {
                tracing::error!(query = %query, error = %e, "Food lookup failed");
                let suggestion = e
                    .is_timeout()
                    .then(|| "The food service is slow right now, try again shortly".to_string());
                FoodLookupOutcome::Error {
                    name: query.to_string(),
                    message: e.to_string(),
                    suggestion,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(query: &str, json: &str) -> FoodLookupOutcome {
        outcome_of(query, serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_found() {
        let json = r#"{"products":[{"product_name":" Banana ","nutriments":{"energy-kcal_100g":89}}]}"#;
        assert_eq!(
            parse("banana", json),
            FoodLookupOutcome::Found(FoodInfo {
                name: "Banana".into(),
                calories_per_100g: 89.0,
            })
        );
    }

    #[test]
    fn test_blank_name_falls_back_to_query() {
        let json = r#"{"products":[{"product_name":"","nutriments":{"energy-kcal_100g":52.5}}]}"#;
        match parse("apple", json) {
            FoodLookupOutcome::Found(info) => assert_eq!(info.name, "apple"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_no_products() {
        assert_eq!(
            parse("zzz", r#"{"count":0,"products":[]}"#),
            FoodLookupOutcome::NotFound { query: "zzz".into() }
        );
        assert!(matches!(parse("zzz", "{}"), FoodLookupOutcome::NotFound { .. }));
    }

    #[test]
    fn test_unusable_calories_are_not_found() {
        for nutriments in [r#"{}"#, r#"{"energy-kcal_100g":0}"#, r#"{"energy-kcal_100g":"89"}"#] {
            let json = format!(r#"{{"products":[{{"product_name":"X","nutriments":{nutriments}}}]}}"#);
            assert!(matches!(parse("x", &json), FoodLookupOutcome::NotFound { .. }));
        }
    }

    #[test]
    fn test_outcome_serialization() {
        let err = FoodLookupOutcome::Error {
            name: "kiwi".into(),
            message: "timeout".into(),
            suggestion: None,
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["status"], "error");
        assert!(json.get("suggestion").is_none());

        let found = serde_json::to_value(FoodLookupOutcome::Found(FoodInfo {
            name: "Kiwi".into(),
            calories_per_100g: 61.0,
        }))
        .unwrap();
        assert_eq!(found["status"], "found");
        assert_eq!(found["calories_per_100g"], 61.0);
    }
}
