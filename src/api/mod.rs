// ==========================================
// 制造库存系统 - API 层
// ==========================================
// 职责: 输入校验、错误转换、调用仓储与引擎，供命令行调用
// ==========================================

pub mod error;
pub mod product_api;
pub mod product_material_api;
pub mod production_api;
pub mod raw_material_api;
pub mod validator;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use product_api::ProductApi;
pub use product_material_api::ProductMaterialApi;
pub use production_api::ProductionApi;
pub use raw_material_api::RawMaterialApi;
