// ==========================================
// 制造库存系统 - 库存快照
// ==========================================
// 三类记录在同一读事务中取回，内存中按 id 连接
// ==========================================

use crate::domain::product::Product;
use crate::domain::product_material::ProductMaterial;
use crate::domain::raw_material::RawMaterial;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub products: Vec<Product>,
    pub raw_materials: Vec<RawMaterial>,
    pub associations: Vec<ProductMaterial>,
}

impl InventorySnapshot {
    pub fn new(
        products: Vec<Product>,
        raw_materials: Vec<RawMaterial>,
        associations: Vec<ProductMaterial>,
    ) -> Self {
        Self {
            products,
            raw_materials,
            associations,
        }
    }

    /// 原材料 id → 原材料
    pub fn stock_index(&self) -> HashMap<i64, &RawMaterial> {
        self.raw_materials.iter().map(|m| (m.id, m)).collect()
    }

    /// 产品 id → 物料需求（保持快照中的关联顺序）
    pub fn requirements_index(&self) -> HashMap<i64, Vec<&ProductMaterial>> {
        let mut index: HashMap<i64, Vec<&ProductMaterial>> = HashMap::new();
        for pm in &self.associations {
            index.entry(pm.product_id).or_default().push(pm);
        }
        index
    }

    pub fn find_product(&self, product_id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    pub fn requirements_for(&self, product_id: i64) -> Vec<&ProductMaterial> {
        self.associations
            .iter()
            .filter(|pm| pm.product_id == product_id)
            .collect()
    }
}
