#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse_or_default, env_required};
#[cfg(feature = "config")]
use mongodb::options::ConnectionString;

/// Database used when none is configured, matching the driver's own default.
pub const DEFAULT_DATABASE: &str = "test";

/// MongoDB connection settings
///
/// Built once at startup and handed to [`super::connect_from_config`].
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "tienda")
///     .with_app_name("productos-api");
///
/// // Or, with the `config` feature:
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// Connection string: mongodb[+srv]://[username:password@]host[:port][/database][?options]
    pub url: String,

    /// Database name
    pub database: String,

    /// Application name reported to the server
    pub app_name: Option<String>,

    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connect_timeout_secs: u64,
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_database(url, DEFAULT_DATABASE)
    }

    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    pub fn with_pool_size(mut self, max_pool_size: u32, min_pool_size: u32) -> Self {
        self.max_pool_size = max_pool_size;
        self.min_pool_size = min_pool_size;
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Connection string with any password replaced by `****`, for logging.
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.url.split_once("://") else {
            return self.url.clone();
        };
        let Some((credentials, host)) = rest.rsplit_once('@') else {
            return self.url.clone();
        };
        match credentials.split_once(':') {
            Some((user, _)) => format!("{scheme}://{user}:****@{host}"),
            None => self.url.clone(),
        }
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            database: DEFAULT_DATABASE.to_string(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }
}

/// Atlas-style SRV connection string from separate credentials.
///
/// User and password are percent-encoded so reserved characters survive.
#[cfg(feature = "config")]
pub fn atlas_url(user: &str, password: &str, cluster: &str) -> String {
    format!(
        "mongodb+srv://{}:{}@{}/",
        urlencoding::encode(user),
        urlencoding::encode(password),
        cluster.trim_end_matches('/')
    )
}

/// Database named in the connection string path (`mongodb://host/tienda`), if any.
#[cfg(feature = "config")]
fn database_in_url(url: &str) -> Option<String> {
    ConnectionString::parse(url)
        .ok()
        .and_then(|parsed| parsed.default_database)
}

/// Load MongoConfig from environment variables
///
/// Connection string, in order of precedence:
/// - `MONGODB_URL` or `MONGO_URL`
/// - `DATABASE_USER` + `DATABASE_PASSWORD` + `DATABASE_CLUSTER`, combined by [`atlas_url`]
///
/// Database, in order of precedence:
/// - `MONGODB_DATABASE` or `MONGO_DATABASE`
/// - the database in the connection string path
/// - `test`
///
/// Other variables:
/// - `MONGODB_APP_NAME` (optional)
/// - `MONGODB_MAX_POOL_SIZE` (default: 100), `MONGODB_MIN_POOL_SIZE` (default: 5)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (default: 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (default: 30)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = match std::env::var("MONGODB_URL").or_else(|_| std::env::var("MONGO_URL")) {
            Ok(url) => url,
            Err(_) => {
                let user = env_required("DATABASE_USER")?;
                let password = env_required("DATABASE_PASSWORD")?;
                let cluster = env_required("DATABASE_CLUSTER")?;
                atlas_url(&user, &password, &cluster)
            }
        };

        let database = std::env::var("MONGODB_DATABASE")
            .or_else(|_| std::env::var("MONGO_DATABASE"))
            .ok()
            .or_else(|| database_in_url(&url))
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let defaults = Self::default();

        Ok(Self {
            url,
            database,
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            max_pool_size: env_parse_or_default("MONGODB_MAX_POOL_SIZE", defaults.max_pool_size)?,
            min_pool_size: env_parse_or_default("MONGODB_MIN_POOL_SIZE", defaults.min_pool_size)?,
            connect_timeout_secs: env_parse_or_default(
                "MONGODB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            server_selection_timeout_secs: env_parse_or_default(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                defaults.server_selection_timeout_secs,
            )?,
        })
    }
}
