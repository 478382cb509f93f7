use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub upload_dir: String,
    pub public_base_url: String,
    pub mail_host: String,
    pub mail_username: String,
    pub mail_password: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let jwt_secret = env::var("SECRET")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8000);
        let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "static/uploads".to_string());
        let public_base_url =
            env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| format!("http://localhost:{port}"));
        let mail_host = env::var("MAIL_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string());
        let mail_username = env::var("EMAIL").unwrap_or_default();
        let mail_password = env::var("PASSWORD").unwrap_or_default();
        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            upload_dir,
            public_base_url,
            mail_host,
            mail_username,
            mail_password,
        })
    }
}
