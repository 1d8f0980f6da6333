/// Client configuration, environment-driven.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend, e.g. "https://api.example.com".
    pub api_url: String,
    /// Bearer token attached to every request.
    pub token: String,
    /// Stats poll cadence for watch mode, in seconds.
    pub poll_secs: u64,
    /// Language code passed to the personalization endpoints.
    pub language: String,
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let api_url =
        std::env::var("HEALTHBELL_API_URL").unwrap_or_else(|_| "http://localhost:8000".into());
    url::Url::parse(&api_url)
        .map_err(|e| anyhow::anyhow!("HEALTHBELL_API_URL is not a valid URL ({api_url}): {e}"))?;

    let token = std::env::var("HEALTHBELL_TOKEN").unwrap_or_default();
    if token.is_empty() {
        let env_mode = std::env::var("HEALTHBELL_ENV")
            .or_else(|_| std::env::var("RUST_ENV"))
            .unwrap_or_default();
        if env_mode == "production" {
            anyhow::bail!(
                "HEALTHBELL_TOKEN is not set. Log in to the service and export \
                 your bearer token before running in production."
            );
        }
        eprintln!("⚠️  HEALTHBELL_TOKEN is not set — requests will be unauthenticated and likely rejected with 401.");
    }

    Ok(Config {
        api_url,
        token,
        poll_secs: std::env::var("HEALTHBELL_POLL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&v| v > 0)
            .unwrap_or(30),
        language: std::env::var("HEALTHBELL_LANG").unwrap_or_else(|_| "en".into()),
    })
}
