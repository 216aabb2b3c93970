// ==========================================
// 制造库存系统 - 库存快照仓储
// ==========================================
// 职责: 单次加锁 + 读事务内取回 products / raw_materials / product_materials
// 说明: 快照返回后不再持锁，之后的并发库存写入不会反映到已取回的快照中
// ==========================================

use crate::domain::snapshot::InventorySnapshot;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::product_material_repo::query_all_product_materials;
use crate::repository::product_repo::query_all_products;
use crate::repository::raw_material_repo::query_all_raw_materials;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

pub struct InventorySnapshotRepository {
    conn: Arc<Mutex<Connection>>,
}

impl InventorySnapshotRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 读取一致性快照
    pub fn load(&self) -> RepositoryResult<InventorySnapshot> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let products = query_all_products(&tx)?;
        let raw_materials = query_all_raw_materials(&tx)?;
        let associations = query_all_product_materials(&tx)?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tracing::debug!(
            products = products.len(),
            raw_materials = raw_materials.len(),
            associations = associations.len(),
            "库存快照已加载"
        );

        Ok(InventorySnapshot::new(products, raw_materials, associations))
    }
}
