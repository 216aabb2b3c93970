// ==========================================
// 制造库存系统 - 物料清单关联仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: (product_id, raw_material_id) 唯一，upsert 走 ON CONFLICT
// ==========================================

use crate::domain::product_material::ProductMaterial;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str =
    "SELECT id, product_id, raw_material_id, required_quantity FROM product_materials";

pub(crate) fn map_product_material_row(row: &Row<'_>) -> SqliteResult<ProductMaterial> {
    Ok(ProductMaterial {
        id: row.get(0)?,
        product_id: row.get(1)?,
        raw_material_id: row.get(2)?,
        required_quantity: row.get(3)?,
    })
}

pub(crate) fn query_all_product_materials(conn: &Connection) -> SqliteResult<Vec<ProductMaterial>> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY product_id ASC, id ASC", SELECT_COLUMNS))?;
    let rows = stmt
        .query_map([], map_product_material_row)?
        .collect::<SqliteResult<Vec<_>>>()?;
    Ok(rows)
}

// ==========================================
// ProductMaterialRepository - 物料清单仓储
// ==========================================
pub struct ProductMaterialRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProductMaterialRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询产品的全部物料需求
    pub fn list_by_product(&self, product_id: i64) -> RepositoryResult<Vec<ProductMaterial>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare(&format!("{} WHERE product_id = ?1 ORDER BY id ASC", SELECT_COLUMNS))?;
        let rows = stmt
            .query_map(params![product_id], map_product_material_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    /// 查询引用某原材料的全部关联（删除原材料前的影响检查）
    pub fn list_by_raw_material(
        &self,
        raw_material_id: i64,
    ) -> RepositoryResult<Vec<ProductMaterial>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE raw_material_id = ?1 ORDER BY product_id ASC",
            SELECT_COLUMNS
        ))?;
        let rows = stmt
            .query_map(params![raw_material_id], map_product_material_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    /// 按 (product, material) 点查
    pub fn find_association(
        &self,
        product_id: i64,
        raw_material_id: i64,
    ) -> RepositoryResult<Option<ProductMaterial>> {
        let conn = self.get_conn()?;
        let row = conn
            .query_row(
                &format!(
                    "{} WHERE product_id = ?1 AND raw_material_id = ?2",
                    SELECT_COLUMNS
                ),
                params![product_id, raw_material_id],
                map_product_material_row,
            )
            .optional()?;
        Ok(row)
    }

    /// 新增或更新关联的需求量
    ///
    /// # 返回
    /// - Ok(ProductMaterial): 写入后的关联（已存在时保留原 id）
    pub fn upsert(
        &self,
        product_id: i64,
        raw_material_id: i64,
        required_quantity: i64,
    ) -> RepositoryResult<ProductMaterial> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO product_materials (product_id, raw_material_id, required_quantity)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(product_id, raw_material_id)
            DO UPDATE SET required_quantity = excluded.required_quantity
            "#,
            params![product_id, raw_material_id, required_quantity],
        )?;

        let row = conn.query_row(
            &format!(
                "{} WHERE product_id = ?1 AND raw_material_id = ?2",
                SELECT_COLUMNS
            ),
            params![product_id, raw_material_id],
            map_product_material_row,
        )?;
        Ok(row)
    }

    /// 删除关联
    pub fn delete_association(
        &self,
        product_id: i64,
        raw_material_id: i64,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let rows = conn.execute(
            "DELETE FROM product_materials WHERE product_id = ?1 AND raw_material_id = ?2",
            params![product_id, raw_material_id],
        )?;
        if rows == 0 {
            return Err(RepositoryError::not_found(
                "ProductMaterial",
                format!("product_id={}, raw_material_id={}", product_id, raw_material_id),
            ));
        }
        Ok(())
    }
}
