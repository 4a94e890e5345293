use async_trait::async_trait;
use reqwest::StatusCode;

use crate::core::config::CustomerServiceConfig;
use crate::core::error::{AppError, Result};

/// Lookup of registered customers by CPF
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    /// `Ok(false)` when the customer is unknown, `Err` when the lookup itself failed
    async fn exists(&self, cpf: i64) -> Result<bool>;
}

/// Client for the customer service (`GET {base_url}/cliente/{cpf}`)
pub struct HttpCustomerDirectory {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCustomerDirectory {
    pub fn new(config: &CustomerServiceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn customer_url(&self, cpf: i64) -> String {
        format!("{}/cliente/{}", self.base_url, cpf)
    }
}

#[async_trait]
impl CustomerDirectory for HttpCustomerDirectory {
    async fn exists(&self, cpf: i64) -> Result<bool> {
        let url = self.customer_url(cpf);
        tracing::debug!("Looking up customer: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Customer service request failed: {:?}", e);
            AppError::ExternalServiceError(format!("Customer service request failed: {}", e))
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::info!("Customer {} not found (customer service returned {})", cpf, status);
        }

        Ok(status == StatusCode::OK)
    }
}
