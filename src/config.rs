use clap::Parser;
use reqwest::Url;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use crate::error::RelayError;

// placeholder identifiers used when an inpaint caller sends no images
pub const DEMO_SEED_IMAGE: &str = "c64351d5-4c59-42f7-95e1-eace013eddab";
pub const DEMO_MASK_IMAGE: &str = "d7e8f9a0-2b5c-4e7f-a1d3-9c8b7a6e5d4f";

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "runware-relay")]
#[command(about = "Thin relay in front of the Runware image and video API")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 5000)]
    pub port: u16,

    // Interface to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    // Runware credential, sent as a bearer token
    #[arg(long, env = "RUNWARE_API_KEY", hide_env_values = true)]
    pub api_key: String,

    // Runware API root
    #[arg(long, env = "RUNWARE_BASE_URL", default_value = "https://api.runware.ai")]
    pub base_url: String,

    // Outbound request timeout in seconds
    #[arg(long, default_value_t = 120)]
    pub request_timeout: u64,

    // Outbound connect timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub connect_timeout: u64,

    // Directory holding the front-end index.html
    #[arg(long, default_value = "static")]
    pub static_dir: PathBuf,

    // Seed image used by /inpaint-image when the caller sends none
    #[arg(long, default_value = DEMO_SEED_IMAGE)]
    pub inpaint_seed_image: String,

    // Mask image used by /inpaint-image when the caller sends none
    #[arg(long, default_value = DEMO_MASK_IMAGE)]
    pub inpaint_mask_image: String,
}

// bearer credential, redacted in Debug
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self, RelayError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(RelayError::InvalidConfig("RUNWARE_API_KEY is empty".to_string()));
        }
        Ok(Self(key))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

// Images that stand in for an upload when the inpaint caller sends none
#[derive(Debug, Clone)]
pub struct InpaintDefaults {
    pub seed_image: String,
    pub mask_image: String,
}

impl Default for InpaintDefaults {
    fn default() -> Self {
        Self {
            seed_image: DEMO_SEED_IMAGE.to_string(),
            mask_image: DEMO_MASK_IMAGE.to_string(),
        }
    }
}

// validated once at startup, never reloaded
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub base_url: Url,
    pub api_key: ApiKey,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub static_dir: PathBuf,
    pub inpaint: InpaintDefaults,
}

impl RelayConfig {
    pub fn new(base_url: &str, api_key: ApiKey) -> Result<Self, RelayError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            api_key,
            request_timeout: Duration::from_secs(120),
            connect_timeout: Duration::from_secs(10),
            static_dir: PathBuf::from("static"),
            inpaint: InpaintDefaults::default(),
        })
    }
}

impl TryFrom<Args> for RelayConfig {
    type Error = RelayError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let mut config = RelayConfig::new(&args.base_url, ApiKey::new(args.api_key)?)?;
        config.request_timeout = Duration::from_secs(args.request_timeout);
        config.connect_timeout = Duration::from_secs(args.connect_timeout);
        config.static_dir = args.static_dir;
        config.inpaint = InpaintDefaults {
            seed_image: args.inpaint_seed_image,
            mask_image: args.inpaint_mask_image,
        };
        Ok(config)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, RelayError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| RelayError::InvalidConfig(format!("invalid base url '{}': {}", raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(RelayError::InvalidConfig(format!(
            "base url must be an http(s) url, got '{}'",
            raw
        )));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("super-secret").unwrap();
        let printed = format!("{:?}", key);
        assert!(!printed.contains("super-secret"));
        assert_eq!(key.expose(), "super-secret");
    }

    #[test]
    fn empty_api_key_is_rejected() {
        assert!(ApiKey::new("   ").is_err());
    }

    #[test]
    fn base_url_must_be_http() {
        let key = ApiKey::new("k").unwrap();
        assert!(RelayConfig::new("ftp://api.runware.ai", key.clone()).is_err());
        assert!(RelayConfig::new("not a url", key.clone()).is_err());
        assert!(RelayConfig::new("http://127.0.0.1:9000", key).is_ok());
    }

    #[test]
    fn args_convert_with_defaults() {
        let args = Args::parse_from(["runware-relay", "--api-key", "abc"]);
        let config = RelayConfig::try_from(args).unwrap();

        assert_eq!(config.base_url.as_str(), "https://api.runware.ai/");
        assert_eq!(config.request_timeout, Duration::from_secs(120));
        assert_eq!(config.inpaint.seed_image, DEMO_SEED_IMAGE);
        assert_eq!(config.inpaint.mask_image, DEMO_MASK_IMAGE);
    }
}
