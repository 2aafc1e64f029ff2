use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, info, warn};

/// Public-facing details of the rental property, used in outgoing emails
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Display name of the property
    pub site_name: String,
    /// Public website URL
    pub site_url: String,
    /// Page where guests upload their documents
    pub upload_page_url: String,
}

impl SiteConfig {
    pub fn from_env() -> Self {
        info!("Loading site configuration from environment variables");

        let site_name = env::var("SITE_NAME").unwrap_or_else(|_| {
            warn!("SITE_NAME not set, using default");
            "Villa Claudia".to_string()
        });
        let site_url = env::var("SITE_URL")
            .unwrap_or_else(|_| {
                warn!("SITE_URL not set, using default");
                "https://villa-claudia.eu".to_string()
            })
            .trim_end_matches('/')
            .to_string();
        let upload_page_url = env::var("UPLOAD_PAGE_URL")
            .unwrap_or_else(|_| format!("{}/documents", site_url));

        debug!(site_name = %site_name, site_url = %site_url, upload_page_url = %upload_page_url, "Site configuration");
        SiteConfig { site_name, site_url, upload_page_url }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            site_name: "Villa Claudia".to_string(),
            site_url: "https://villa-claudia.eu".to_string(),
            upload_page_url: "https://villa-claudia.eu/documents".to_string(),
        }
    }
}
