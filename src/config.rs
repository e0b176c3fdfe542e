use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    pub weather_api_key: String,
    pub weather_api_url: String,
    pub food_api_url: String,

    // Applies to every provider call; there are no retries
    pub provider_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),

            weather_api_key: env::var("WEATHER_API_KEY").expect("WEATHER_API_KEY must be set"),
            weather_api_url: env::var("WEATHER_API_URL")
                .unwrap_or_else(|_| "http://api.openweathermap.org/data/2.5/weather".into()),
            food_api_url: env::var("FOOD_API_URL")
                .unwrap_or_else(|_| "https://world.openfoodfacts.org/cgi/search.pl".into()),

            provider_timeout_secs: env::var("PROVIDER_TIMEOUT_SECS")
                .unwrap_or_else(|_| "5".into())
                .parse()
                .unwrap_or(5),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
