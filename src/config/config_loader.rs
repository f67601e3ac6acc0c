use anyhow::Result;

use super::config_model::{Database, DotEnvyConfig, Jwt, Server, Xendit};

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: std::env::var("SERVER_PORT")
            .expect("SERVER_PORT is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let database = Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let xendit = Xendit {
        base_url: std::env::var("XENDIT_BASE_URL")
            .unwrap_or_else(|_| "https://api.xendit.co".to_string()),
        secret_key: std::env::var("XENDIT_SECRET_KEY").expect("XENDIT_SECRET_KEY is invalid"),
        webhook_token: std::env::var("XENDIT_WEBHOOK_TOKEN")
            .expect("XENDIT_WEBHOOK_TOKEN is invalid"),
        timeout: std::env::var("XENDIT_TIMEOUT")
            .unwrap_or_else(|_| "8".to_string())
            .parse()?,
    };

    let jwt = Jwt {
        secret: std::env::var("JWT_SECRET").expect("JWT_SECRET is invalid"),
    };

    Ok(DotEnvyConfig {
        server,
        database,
        xendit,
        jwt,
    })
}

pub fn get_jwt_secret() -> Result<Jwt> {
    dotenvy::dotenv().ok();

    Ok(Jwt {
        secret: std::env::var("JWT_SECRET").expect("JWT_SECRET is invalid"),
    })
}
