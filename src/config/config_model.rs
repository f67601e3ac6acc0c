#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub database: Database,
    pub xendit: Xendit,
    pub jwt: Jwt,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct Xendit {
    pub base_url: String,
    pub secret_key: String,
    pub webhook_token: String,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Jwt {
    pub secret: String,
}
