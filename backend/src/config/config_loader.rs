use anyhow::{Ok, Result};

use super::config_model::{AuthSecret, BackendServer, DotEnvyConfig, SeedAdmin, Storage};

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let backend_server = BackendServer {
        port: std::env::var("SERVER_PORT_BACKEND")
            .expect("SERVER_PORT_BACKEND is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let storage = Storage {
        data_dir: std::env::var("STORAGE_DATA_DIR").unwrap_or_else(|_| "./data".to_string()),
    };

    let auth = AuthSecret {
        jwt_secret: std::env::var("JWT_USER_SECRET").expect("JWT_USER_SECRET is invalid"),
        token_ttl_seconds: std::env::var("JWT_TOKEN_TTL_SECONDS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()?,
    };

    let seed_admin = SeedAdmin {
        username: std::env::var("SEED_ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
        password: std::env::var("SEED_ADMIN_PASSWORD").expect("SEED_ADMIN_PASSWORD is invalid"),
    };

    Ok(DotEnvyConfig {
        backend_server,
        storage,
        auth,
        seed_admin,
    })
}

pub fn get_jwt_secret() -> Result<String> {
    dotenvy::dotenv().ok();

    Ok(std::env::var("JWT_USER_SECRET").expect("JWT_USER_SECRET is invalid"))
}
