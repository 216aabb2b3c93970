// ==========================================
// 制造库存系统 - 引擎层仓储聚合
// ==========================================
// 职责: 聚合库存系统所需的所有 Repository，并定义引擎读取快照的接口
// 红线: 引擎只通过 SnapshotSource 读取，不调用任何写操作
// ==========================================

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::domain::snapshot::InventorySnapshot;
use crate::repository::{
    InventorySnapshotRepository, ProductMaterialRepository, ProductRepository,
    RawMaterialRepository, RepositoryResult, StockMovementRepository,
};

// ==========================================
// SnapshotSource - 快照来源
// ==========================================

/// 可生产性引擎的数据来源
///
/// 生产环境由 SQLite 快照仓储实现；测试中可直接使用内存快照。
pub trait SnapshotSource: Send + Sync {
    fn load_snapshot(&self) -> RepositoryResult<InventorySnapshot>;
}

impl SnapshotSource for InventorySnapshotRepository {
    fn load_snapshot(&self) -> RepositoryResult<InventorySnapshot> {
        self.load()
    }
}

impl SnapshotSource for InventorySnapshot {
    fn load_snapshot(&self) -> RepositoryResult<InventorySnapshot> {
        Ok(self.clone())
    }
}

// ==========================================
// InventoryRepositories - 仓储集合
// ==========================================

/// 库存系统仓储集合
///
/// 所有仓储共享同一个连接。
#[derive(Clone)]
pub struct InventoryRepositories {
    /// 产品仓储
    pub product_repo: Arc<ProductRepository>,
    /// 原材料仓储
    pub raw_material_repo: Arc<RawMaterialRepository>,
    /// 物料清单仓储
    pub product_material_repo: Arc<ProductMaterialRepository>,
    /// 库存流水仓储
    pub stock_movement_repo: Arc<StockMovementRepository>,
    /// 快照仓储
    pub snapshot_repo: Arc<InventorySnapshotRepository>,
}

impl InventoryRepositories {
    /// 基于共享连接创建全部仓储
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            product_repo: Arc::new(ProductRepository::new(conn.clone())),
            raw_material_repo: Arc::new(RawMaterialRepository::new(conn.clone())),
            product_material_repo: Arc::new(ProductMaterialRepository::new(conn.clone())),
            stock_movement_repo: Arc::new(StockMovementRepository::new(conn.clone())),
            snapshot_repo: Arc::new(InventorySnapshotRepository::new(conn)),
        }
    }

    /// 以 trait 对象形式返回快照来源
    pub fn snapshot_source(&self) -> Arc<dyn SnapshotSource> {
        self.snapshot_repo.clone()
    }
}
