use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::{AppConfig, QrConfig};

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("CAMPUS")
                    .separator("_")
                    .try_parsing(true),
            );

        // 支持从环境变量加载
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("server.unix_socket_path", std::env::var("UNIX_SOCKET").ok())?
            .set_override_option("server.workers", std::env::var("CPU_COUNT").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("cache.redis.url", std::env::var("REDIS_URL").ok())?
            .set_override_option(
                "cache.redis.key_prefix",
                std::env::var("REDIS_KEY_PREFIX").ok(),
            )?
            .set_override_option("cache.default_ttl", std::env::var("REDIS_TTL").ok())?;

        let config = builder.build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 处理工作线程数
        if app_config.server.workers == 0 {
            app_config.server.workers = num_cpus::get().min(app_config.server.max_workers);
        }

        app_config.qr.validate()?;

        Ok(app_config)
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取服务器绑定地址
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 获取 Unix 套接字路径 (如果配置了)
    #[cfg(unix)]
    pub fn unix_socket_path(&self) -> Option<&str> {
        if self.server.unix_socket_path.is_empty() {
            None
        } else {
            Some(&self.server.unix_socket_path)
        }
    }
}

impl QrConfig {
    /// 校验签到有效期区间：0 < min <= default <= max
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_ttl_secs <= 0 || self.min_ttl_secs > self.max_ttl_secs {
            return Err(ConfigError::Message(format!(
                "qr.min_ttl_secs ({}) must be positive and not exceed qr.max_ttl_secs ({})",
                self.min_ttl_secs, self.max_ttl_secs
            )));
        }
        if !(self.min_ttl_secs..=self.max_ttl_secs).contains(&self.default_ttl_secs) {
            return Err(ConfigError::Message(format!(
                "qr.default_ttl_secs ({}) must lie within {}..={}",
                self.default_ttl_secs, self.min_ttl_secs, self.max_ttl_secs
            )));
        }
        Ok(())
    }

    /// 请求的有效期，未指定时使用默认值
    pub fn resolve_ttl(&self, requested: Option<i64>) -> Result<i64, String> {
        let ttl = requested.unwrap_or(self.default_ttl_secs);
        if ttl < self.min_ttl_secs || ttl > self.max_ttl_secs {
            return Err(format!(
                "duration_seconds must be between {} and {}",
                self.min_ttl_secs, self.max_ttl_secs
            ));
        }
        Ok(ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qr(default_ttl_secs: i64, min_ttl_secs: i64, max_ttl_secs: i64) -> QrConfig {
        QrConfig {
            default_ttl_secs,
            min_ttl_secs,
            max_ttl_secs,
            checkin_base_url: "/attendance/checkin?code=".into(),
            image_size: 256,
        }
    }

    #[test]
    fn test_qr_bounds_validation() {
        assert!(qr(300, 30, 3600).validate().is_ok());
        assert!(qr(10, 30, 3600).validate().is_err());
        assert!(qr(300, 0, 3600).validate().is_err());
        assert!(qr(300, 600, 60).validate().is_err());
    }

    #[test]
    fn test_resolve_ttl() {
        let config = qr(300, 30, 3600);
        assert_eq!(config.resolve_ttl(None), Ok(300));
        assert_eq!(config.resolve_ttl(Some(30)), Ok(30));
        assert_eq!(config.resolve_ttl(Some(3600)), Ok(3600));
        assert!(config.resolve_ttl(Some(29)).is_err());
        assert!(config.resolve_ttl(Some(3601)).is_err());
    }

    #[test]
    fn test_load_default_config_file() {
        let config = AppConfig::load().unwrap();
        assert!(config.server.workers > 0);
        assert_eq!(config.cache.cache_type, "moka");
    }
}
