// ==========================================
// 制造库存系统 - 引擎层
// ==========================================
// 职责: 实现业务计算引擎,不拼 SQL
// 红线: Engine 不拼 SQL, 不修改存储状态
// ==========================================

pub mod feasibility;
pub mod repositories;

// 重导出核心引擎
pub use feasibility::FeasibilityEngine;
pub use repositories::{InventoryRepositories, SnapshotSource};
