//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection URL (PostgreSQL)
    pub database_url: String,

    /// AWS Cognito configuration
    pub cognito_region: String,
    pub cognito_user_pool_id: String,
    pub cognito_client_id: String,

    /// Object storage
    pub s3_bucket: String,
    pub s3_region: String,
    /// Custom endpoint for LocalStack testing; unset in production
    pub s3_endpoint_url: Option<String>,

    /// Runtime configuration
    pub log_level: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL is required"))?,

            cognito_region: env::var("COGNITO_REGION")
                .map_err(|_| anyhow::anyhow!("COGNITO_REGION is required"))?,
            cognito_user_pool_id: env::var("COGNITO_USER_POOL_ID")
                .map_err(|_| anyhow::anyhow!("COGNITO_USER_POOL_ID is required"))?,
            cognito_client_id: env::var("COGNITO_CLIENT_ID")
                .map_err(|_| anyhow::anyhow!("COGNITO_CLIENT_ID is required"))?,

            s3_bucket: env::var("S3_BUCKET").map_err(|_| anyhow::anyhow!("S3_BUCKET is required"))?,
            s3_region: env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            s3_endpoint_url: env::var("S3_ENDPOINT_URL").ok(),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        };

        Ok(config)
    }

    /// JWKS endpoint for the configured Cognito user pool
    pub fn cognito_jwks_url(&self) -> String {
        format!(
            "https://cognito-idp.{}.amazonaws.com/{}/.well-known/jwks.json",
            self.cognito_region, self.cognito_user_pool_id
        )
    }

    /// Issuer string Cognito embeds in tokens for this pool
    pub fn cognito_issuer(&self) -> String {
        format!(
            "https://cognito-idp.{}.amazonaws.com/{}",
            self.cognito_region, self.cognito_user_pool_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            database_url: "postgresql://localhost/pitchside".to_string(),
            cognito_region: "eu-west-1".to_string(),
            cognito_user_pool_id: "eu-west-1_AbCdEf123".to_string(),
            cognito_client_id: "client123".to_string(),
            s3_bucket: "pitchside-media".to_string(),
            s3_region: "eu-west-1".to_string(),
            s3_endpoint_url: None,
            log_level: "info".to_string(),
            port: 3000,
        }
    }

    #[test]
    fn test_cognito_jwks_url() {
        let config = test_config();
        assert_eq!(
            config.cognito_jwks_url(),
            "https://cognito-idp.eu-west-1.amazonaws.com/eu-west-1_AbCdEf123/.well-known/jwks.json"
        );
    }

    #[test]
    fn test_cognito_issuer() {
        let config = test_config();
        assert_eq!(
            config.cognito_issuer(),
            "https://cognito-idp.eu-west-1.amazonaws.com/eu-west-1_AbCdEf123"
        );
    }
}
