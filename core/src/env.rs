use std::{env::var, sync::OnceLock};


static ENV: OnceLock<Env> = OnceLock::new();

#[derive(Debug)]
pub struct Env {
    pub bot_token: String,
    pub mongo_url: String,
    pub mongo_db: String,
    pub dev_guild: Option<u64>,
    pub welcome_channel: String,
    pub dev: bool
}

impl Default for Env {
    fn default() -> Self {
        Self {
            bot_token: var("BOT_TOKEN").expect("BOT_TOKEN is not set"),
            mongo_url: var("MONGO_URL")
                .unwrap_or("mongodb://localhost:27017".to_string()),
            mongo_db: var("MONGO_DB").unwrap_or("warden".to_string()),
            dev_guild: var("DEV_GUILD").ok().and_then(|s| s.parse().ok()),
            welcome_channel: var("WELCOME_CHANNEL")
                .unwrap_or("welcome".to_string()),
            dev: cfg!(debug_assertions)
        }
    }
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn env() -> &'static Env {
    ENV.get_or_init(Env::new)
}
