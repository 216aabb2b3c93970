// ==========================================
// 制造库存系统 - 库存流水仓储
// ==========================================
// 红线: Repository 不做业务逻辑,只做数据映射
// 写入: 仅经 RawMaterialRepository::adjust_stock 的事务调用 insert_movement
// ==========================================

use crate::domain::stock_movement::StockMovement;
use crate::repository::codec::{read_timestamp, write_timestamp};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str = r#"
    SELECT movement_id, raw_material_id, delta, quantity_before, quantity_after,
           actor, reason, movement_ts
    FROM stock_movement
"#;

fn map_movement_row(row: &Row<'_>) -> SqliteResult<StockMovement> {
    Ok(StockMovement {
        movement_id: row.get(0)?,
        raw_material_id: row.get(1)?,
        delta: row.get(2)?,
        quantity_before: row.get(3)?,
        quantity_after: row.get(4)?,
        actor: row.get(5)?,
        reason: row.get(6)?,
        movement_ts: read_timestamp(row, 7)?,
    })
}

/// 写入一条流水（可在调用方事务内执行）
pub(crate) fn insert_movement(conn: &Connection, movement: &StockMovement) -> SqliteResult<()> {
    conn.execute(
        r#"
        INSERT INTO stock_movement (
            movement_id, raw_material_id, delta, quantity_before, quantity_after,
            actor, reason, movement_ts
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
        params![
            movement.movement_id,
            movement.raw_material_id,
            movement.delta,
            movement.quantity_before,
            movement.quantity_after,
            movement.actor,
            movement.reason,
            write_timestamp(&movement.movement_ts),
        ],
    )?;
    Ok(())
}

pub struct StockMovementRepository {
    conn: Arc<Mutex<Connection>>,
}

impl StockMovementRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询某原材料的流水（最新在前）
    pub fn list_by_raw_material(&self, raw_material_id: i64) -> RepositoryResult<Vec<StockMovement>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE raw_material_id = ?1 ORDER BY movement_ts DESC, rowid DESC",
            SELECT_COLUMNS
        ))?;
        let rows = stmt
            .query_map(params![raw_material_id], map_movement_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    /// 最近 N 条流水
    pub fn list_recent(&self, limit: usize) -> RepositoryResult<Vec<StockMovement>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} ORDER BY movement_ts DESC, rowid DESC LIMIT ?1",
            SELECT_COLUMNS
        ))?;
        let rows = stmt
            .query_map(params![limit as i64], map_movement_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }
}
