// ==========================================
// 制造库存系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、计算结果
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod product;
pub mod product_material;
pub mod production;
pub mod raw_material;
pub mod snapshot;
pub mod stock_movement;
pub mod types;

// 重导出核心类型
pub use product::{Product, ProductInput};
pub use product_material::ProductMaterial;
pub use production::{
    ProductEvaluation, ProductFeasibility, ProductSummary, ProductionSimulation,
    ProductionSuggestion, SimulationMaterialDetail, SimulationOutcome, SuggestionMaterialDetail,
};
pub use raw_material::{RawMaterial, RawMaterialInput};
pub use snapshot::InventorySnapshot;
pub use stock_movement::{StockMovement, StockMovementDraft};
pub use types::{MovementDirection, NotEvaluableReason};
