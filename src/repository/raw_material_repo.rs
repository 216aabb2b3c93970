// ==========================================
// 制造库存系统 - 原材料数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 库存调整在单个事务内完成读-校验-写-记流水，结果不得低于 0
// ==========================================

use crate::domain::raw_material::{RawMaterial, RawMaterialInput};
use crate::domain::stock_movement::{StockMovement, StockMovementDraft};
use crate::repository::codec::{read_decimal, write_decimal};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::stock_movement_repo::insert_movement;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str = "SELECT id, code, name, unit, quantity, unit_price FROM raw_materials";

pub(crate) fn map_raw_material_row(row: &Row<'_>) -> SqliteResult<RawMaterial> {
    Ok(RawMaterial {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        unit: row.get(3)?,
        quantity: row.get(4)?,
        unit_price: read_decimal(row, 5)?,
    })
}

pub(crate) fn query_all_raw_materials(conn: &Connection) -> SqliteResult<Vec<RawMaterial>> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY id ASC", SELECT_COLUMNS))?;
    let materials = stmt
        .query_map([], map_raw_material_row)?
        .collect::<SqliteResult<Vec<_>>>()?;
    Ok(materials)
}

/// 库存调整结果
#[derive(Debug, Clone, PartialEq)]
pub struct StockAdjustment {
    pub quantity_before: i64,
    pub material: RawMaterial,
    pub movement: StockMovement,
}

// ==========================================
// RawMaterialRepository - 原材料仓储
// ==========================================
pub struct RawMaterialRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RawMaterialRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询全部原材料（按 id 升序）
    pub fn list_all(&self) -> RepositoryResult<Vec<RawMaterial>> {
        let conn = self.get_conn()?;
        Ok(query_all_raw_materials(&conn)?)
    }

    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<RawMaterial>> {
        let conn = self.get_conn()?;
        let material = conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id],
                map_raw_material_row,
            )
            .optional()?;
        Ok(material)
    }

    pub fn find_by_code(&self, code: &str) -> RepositoryResult<Option<RawMaterial>> {
        let conn = self.get_conn()?;
        let material = conn
            .query_row(
                &format!("{} WHERE code = ?1", SELECT_COLUMNS),
                params![code],
                map_raw_material_row,
            )
            .optional()?;
        Ok(material)
    }

    /// 插入原材料
    ///
    /// # 参数
    /// - `input`: 载荷，`unit` 必须已由上层填充
    pub fn insert(&self, input: &RawMaterialInput) -> RepositoryResult<RawMaterial> {
        let unit = required_unit(input)?;
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO raw_materials (code, name, unit, quantity, unit_price)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                input.code,
                input.name,
                unit,
                input.quantity,
                write_decimal(&input.unit_price),
            ],
        )?;
        let id = conn.last_insert_rowid();

        Ok(RawMaterial {
            id,
            code: input.code.clone(),
            name: input.name.clone(),
            unit,
            quantity: input.quantity,
            unit_price: input.unit_price,
        })
    }

    /// 全量更新（含在库数量）
    pub fn update(&self, id: i64, input: &RawMaterialInput) -> RepositoryResult<RawMaterial> {
        let unit = required_unit(input)?;
        let conn = self.get_conn()?;
        let rows = conn.execute(
            r#"
            UPDATE raw_materials
            SET code = ?2, name = ?3, unit = ?4, quantity = ?5, unit_price = ?6,
                updated_at = datetime('now')
            WHERE id = ?1
            "#,
            params![
                id,
                input.code,
                input.name,
                unit,
                input.quantity,
                write_decimal(&input.unit_price),
            ],
        )?;

        if rows == 0 {
            return Err(RepositoryError::not_found("RawMaterial", id));
        }

        Ok(RawMaterial {
            id,
            code: input.code.clone(),
            name: input.name.clone(),
            unit,
            quantity: input.quantity,
            unit_price: input.unit_price,
        })
    }

    /// 删除原材料
    ///
    /// 仍被物料清单引用时由外键拒绝（ForeignKeyViolation）
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let rows = conn.execute("DELETE FROM raw_materials WHERE id = ?1", params![id])?;
        if rows == 0 {
            return Err(RepositoryError::not_found("RawMaterial", id));
        }
        Ok(())
    }

    /// 调整库存
    ///
    /// # 参数
    /// - `id`: 原材料ID
    /// - `delta`: 变动量，可为负
    /// - `draft`: 流水草稿，与库存更新在同一事务内写入
    ///
    /// # 返回
    /// - Ok(StockAdjustment): 调整前数量 + 调整后实体 + 已写入的流水
    /// - Err(NotFound): 原材料不存在
    /// - Err(NegativeStock): 结果将低于 0，库存保持不变
    /// - 流水写入失败时整个事务回滚，库存保持不变
    pub fn adjust_stock(
        &self,
        id: i64,
        delta: i64,
        draft: StockMovementDraft,
    ) -> RepositoryResult<StockAdjustment> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let current: i64 = tx
            .query_row(
                "SELECT quantity FROM raw_materials WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| RepositoryError::not_found("RawMaterial", id))?;

        let updated = match current.checked_add(delta) {
            Some(q) if q >= 0 => q,
            Some(_) => {
                return Err(RepositoryError::NegativeStock {
                    raw_material_id: id,
                    current,
                    delta,
                })
            }
            None => {
                return Err(RepositoryError::FieldValueError {
                    field: "quantity".to_string(),
                    message: format!("库存溢出: current={}, delta={}", current, delta),
                })
            }
        };

        tx.execute(
            "UPDATE raw_materials SET quantity = ?2, updated_at = datetime('now') WHERE id = ?1",
            params![id, updated],
        )?;

        let material = tx.query_row(
            &format!("{} WHERE id = ?1", SELECT_COLUMNS),
            params![id],
            map_raw_material_row,
        )?;

        let movement = draft.into_movement(id, delta, current, updated);
        insert_movement(&tx, &movement)?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        Ok(StockAdjustment {
            quantity_before: current,
            material,
            movement,
        })
    }
}

fn required_unit(input: &RawMaterialInput) -> RepositoryResult<String> {
    input
        .unit
        .clone()
        .ok_or_else(|| RepositoryError::FieldValueError {
            field: "unit".to_string(),
            message: "计量单位未填充".to_string(),
        })
}
