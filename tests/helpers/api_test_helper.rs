// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 提供API层集成测试的通用辅助函数
// ==========================================

#![allow(dead_code)]

#[path = "../test_helpers.rs"]
mod test_helpers;

use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use tempfile::NamedTempFile;

use autoflex_inventory::api::{
    ApiError, ProductApi, ProductMaterialApi, ProductionApi, RawMaterialApi,
};
use autoflex_inventory::config::{ConfigManager, InventoryConfigReader};
use autoflex_inventory::domain::{Product, ProductInput, RawMaterial, RawMaterialInput};
use autoflex_inventory::engine::InventoryRepositories;

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
///
/// 包含所有API实例和必要的依赖
pub struct ApiTestEnv {
    pub db_path: String,
    pub product_api: Arc<ProductApi>,
    pub raw_material_api: Arc<RawMaterialApi>,
    pub product_material_api: Arc<ProductMaterialApi>,
    pub production_api: Arc<ProductionApi>,
    pub config_manager: Arc<ConfigManager>,

    // Repository层（用于测试数据准备与断言）
    pub repos: InventoryRepositories,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// 创建新的API测试环境
    ///
    /// # 说明
    /// - 使用临时数据库文件
    /// - 初始化所有Repository和API
    pub fn new() -> Result<Self, String> {
        autoflex_inventory::logging::init_test();

        let (temp_file, db_path) = test_helpers::create_test_db()
            .map_err(|e| format!("创建测试数据库失败: {}", e))?;

        let conn = autoflex_inventory::db::open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        let repos = InventoryRepositories::from_connection(conn.clone());
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn)
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );
        let config_reader: Arc<dyn InventoryConfigReader> = config_manager.clone();

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

        Ok(Self {
            db_path,
            product_api,
            raw_material_api,
            product_material_api,
            production_api,
            config_manager,
            repos,
            _temp_file: temp_file,
        })
    }

    // ==========================================
    // 测试数据准备
    // ==========================================

    /// 创建产品，value 以分为单位
    pub fn create_product(&self, code: &str, value_cents: i64) -> Product {
        self.product_api
            .create_product(ProductInput::new(
                code,
                format!("产品{}", code),
                Decimal::new(value_cents, 2),
            ))
            .expect("创建产品失败")
    }

    pub fn create_material(&self, code: &str, quantity: i64) -> RawMaterial {
        self.raw_material_api
            .create_raw_material(RawMaterialInput::new(
                code,
                format!("材料{}", code),
                quantity,
                Decimal::ONE,
            ))
            .expect("创建原材料失败")
    }

    pub fn require(&self, product: &Product, material: &RawMaterial, quantity: i64) {
        self.product_material_api
            .upsert_association(product.id, material.id, quantity)
            .expect("写入物料需求失败");
    }
}

/// 断言错误为 NotFound
pub fn assert_not_found<T: std::fmt::Debug>(result: Result<T, ApiError>) {
    match result {
        Err(ApiError::NotFound(_)) => {}
        other => panic!("Expected NotFound, got {:?}", other),
    }
}
