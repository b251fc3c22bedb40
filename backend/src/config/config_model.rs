#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub backend_server: BackendServer,
    pub storage: Storage,
    pub auth: AuthSecret,
    pub seed_admin: SeedAdmin,
}

#[derive(Debug, Clone)]
pub struct BackendServer {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Storage {
    pub data_dir: String,
}

#[derive(Debug, Clone)]
pub struct AuthSecret {
    pub jwt_secret: String,
    pub token_ttl_seconds: i64,
}

#[derive(Debug, Clone)]
pub struct SeedAdmin {
    pub username: String,
    pub password: String,
}
