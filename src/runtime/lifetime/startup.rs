use crate::cache::{
    ObjectCache,
    register::{get_object_cache_plugin, registered_object_cache_plugins},
};
use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_admin_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

const FALLBACK_CACHE: &str = "moka";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

async fn build_cache(name: &str) -> Result<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(name).ok_or_else(|| {
        PortalError::cache_plugin_not_found(format!(
            "Cache backend '{name}' is not registered (available: {})",
            registered_object_cache_plugins().join(", ")
        ))
    })?;
    Ok(Arc::from(constructor().await?))
}

/// 按配置创建缓存，失败时回退到内存缓存
pub async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    let cache_type = &AppConfig::get().cache.cache_type;
    warn!("Attempting to create {} cache backend", cache_type);

    match build_cache(cache_type).await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", cache_type);
            Ok(cache)
        }
        Err(e) if cache_type != FALLBACK_CACHE => {
            warn!("{}, falling back to {} cache", e, FALLBACK_CACHE);
            build_cache(FALLBACK_CACHE).await
        }
        Err(e) => Err(e),
    }
}

/// 数据库中没有任何用户时创建默认管理员
///
/// 密码取自 `ADMIN_PASSWORD`，未设置时随机生成并只在日志中出现一次
pub async fn seed_admin(storage: &Arc<dyn Storage>) -> Result<()> {
    let count = storage.count_users().await?;
    if count > 0 {
        debug!("Database already has {} user(s), skipping admin seed", count);
        return Ok(());
    }
    info!("No users found in database, creating default admin account...");

    let password = match std::env::var("ADMIN_PASSWORD") {
        Ok(pwd) if !pwd.is_empty() => pwd,
        _ => {
            let pwd = generate_admin_password();
            warn!("==========================================================");
            warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
            warn!("  Generated admin password: {}", pwd);
            warn!("  Please save this password or set ADMIN_PASSWORD env var");
            warn!("==========================================================");
            pwd
        }
    };

    let admin = storage
        .create_user(CreateUserRequest {
            username: "admin".to_string(),
            email: "admin@localhost".to_string(),
            password: hash_password(&password)?,
            role: UserRole::Admin,
            display_name: Some("Administrator".to_string()),
            phone: None,
            department_id: None,
        })
        .await?;
    info!(
        "Default admin account created (ID: {}, username: {})",
        admin.id, admin.username
    );
    Ok(())
}

/// 准备服务器启动的上下文：存储、固定角色、默认管理员和缓存
pub async fn prepare_server_startup() -> Result<StartupContext> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    if cfg!(debug_assertions) {
        debug!(
            "Registered cache backends: {}",
            registered_object_cache_plugins().join(", ")
        );
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    storage.ensure_roles().await?;
    seed_admin(&storage).await?;

    let cache = create_cache().await?;
    warn!("Cache backend initialized");

    Ok(StartupContext { storage, cache })
}
