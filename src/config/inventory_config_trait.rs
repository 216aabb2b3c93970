// ==========================================
// 制造库存系统 - 库存配置读取 Trait
// ==========================================
// 职责: 定义 API 层所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use std::error::Error;

// ==========================================
// InventoryConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
pub trait InventoryConfigReader: Send + Sync {
    /// 生产建议最多返回条数
    ///
    /// # 默认值
    /// - 0（不限）
    fn get_suggestion_limit(&self) -> Result<usize, Box<dyn Error>>;

    /// 原材料默认计量单位
    ///
    /// # 默认值
    /// - "un"
    fn get_default_material_unit(&self) -> Result<String, Box<dyn Error>>;
}
