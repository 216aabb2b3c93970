// ==========================================
// 制造库存系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::api::{ProductApi, ProductMaterialApi, ProductionApi, RawMaterialApi};
use crate::config::{ConfigManager, InventoryConfigReader};
use crate::engine::InventoryRepositories;

/// 显式指定数据库路径的环境变量
pub const DB_PATH_ENV: &str = "AUTOFLEX_DB_PATH";

/// 数据库文件名
const DB_FILE_NAME: &str = "autoflex_inventory.db";

/// 应用状态
///
/// 包含所有API实例和共享资源，所有仓储共享同一个连接
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 产品API
    pub product_api: Arc<ProductApi>,

    /// 原材料API
    pub raw_material_api: Arc<RawMaterialApi>,

    /// 物料清单API
    pub product_material_api: Arc<ProductMaterialApi>,

    /// 生产计算API
    pub production_api: Arc<ProductionApi>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径（":memory:" 可用于临时库）
    ///
    /// # 返回
    /// - Ok(AppState): 初始化成功
    /// - Err(String): 初始化错误
    ///
    /// # 说明
    /// 打开连接后会执行建库脚本（幂等），再组装仓储与API
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = crate::db::open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        crate::db::init_schema(&conn).map_err(|e| format!("建库脚本执行失败: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let repos = InventoryRepositories::from_connection(conn.clone());

        // ==========================================
        // 初始化配置
        // ==========================================
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn)
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );
        let config_reader: Arc<dyn InventoryConfigReader> = config_manager.clone();

        // ==========================================
        // 初始化API层
        // ==========================================
        let product_api = Arc::new(ProductApi::new(repos.product_repo.clone()));
        let raw_material_api = Arc::new(RawMaterialApi::new(
            repos.raw_material_repo.clone(),
            repos.product_material_repo.clone(),
            repos.stock_movement_repo.clone(),
            config_reader.clone(),
        ));
        let product_material_api = Arc::new(ProductMaterialApi::new(
            repos.product_repo.clone(),
            repos.raw_material_repo.clone(),
            repos.product_material_repo.clone(),
        ));
        let production_api = Arc::new(ProductionApi::new(repos.snapshot_source(), config_reader));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            product_api,
            raw_material_api,
            product_material_api,
            production_api,
            config_manager,
        })
    }
}

/// 获取默认数据库路径
///
/// 顺序: 环境变量 AUTOFLEX_DB_PATH → 用户数据目录 → 当前目录
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from(".").join(DB_FILE_NAME);

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("autoflex-inventory");
        match std::fs::create_dir_all(&dir) {
            Ok(()) => path = dir.join(DB_FILE_NAME),
            Err(e) => tracing::warn!("无法创建数据目录 {}: {}，使用当前目录", dir.display(), e),
        }
    }

    path.to_string_lossy().to_string()
}
