use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_maxage: i64,
    pub port: u16,
    pub client_url: String,
    pub max_upload_bytes: usize,
    pub cloudinary: CloudinaryConfig,
    pub admin_seed: Option<AdminSeed>,
}

#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub folder: String,
    pub timeout_secs: u64,
}

/// Admin account created on startup when `ADMIN_EMAIL` and `ADMIN_PASSWORD` are set.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub name: String,
    pub email: String,
    pub password: String,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub phone_no: Option<String>,
    pub address: Option<String>,
}

impl Config {
    pub fn init() -> Config {
        dotenv::dotenv().ok();

        let database_url = required("DATABASE_URL");
        let jwt_secret = required("JWT_SECRET_KEY");
        let jwt_maxage = parsed("JWT_MAXAGE", 60);
        let port = parsed("PORT", 8080);
        let client_url =
            env::var("CLIENT_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());
        let max_upload_bytes = parsed("MAX_UPLOAD_BYTES", 50 * 1024 * 1024);

        let cloudinary = CloudinaryConfig {
            cloud_name: required("CLOUDINARY_CLOUD_NAME"),
            api_key: required("CLOUDINARY_API_KEY"),
            api_secret: required("CLOUDINARY_API_SECRET"),
            folder: env::var("CLOUDINARY_FOLDER").unwrap_or_else(|_| "portfolio".to_string()),
            timeout_secs: parsed("UPLOAD_TIMEOUT_SECS", 60),
        };

        let admin_seed = match (optional("ADMIN_EMAIL"), optional("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminSeed {
                name: optional("ADMIN_NAME").unwrap_or_else(|| "Admin".to_string()),
                email,
                password,
                title: optional("ADMIN_TITLE"),
                bio: optional("ADMIN_BIO"),
                phone_no: optional("ADMIN_PHONE"),
                address: optional("ADMIN_ADDRESS"),
            }),
            _ => None,
        };

        Config {
            database_url,
            jwt_secret,
            jwt_maxage,
            port,
            client_url,
            max_upload_bytes,
            cloudinary,
            admin_seed,
        }
    }
}

fn required(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} must be set"))
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(value) => value
            .parse()
            .unwrap_or_else(|_| panic!("{key} has an invalid value: {value}")),
        Err(_) => default,
    }
}
