// ==========================================
// 制造库存系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod codec;
pub mod error;
pub mod product_material_repo;
pub mod product_repo;
pub mod raw_material_repo;
pub mod snapshot_repo;
pub mod stock_movement_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use product_material_repo::ProductMaterialRepository;
pub use product_repo::ProductRepository;
pub use raw_material_repo::{RawMaterialRepository, StockAdjustment};
pub use snapshot_repo::InventorySnapshotRepository;
pub use stock_movement_repo::StockMovementRepository;
