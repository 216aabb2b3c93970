// ==========================================
// 制造库存系统 - 列编解码辅助
// ==========================================
// 金额以 TEXT 存储，读取时解析为 Decimal；时间戳按 "%Y-%m-%d %H:%M:%S" 存储
// ==========================================

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rusqlite::types::Type;
use rusqlite::Row;
use std::str::FromStr;

/// 时间戳存储格式
pub const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 读取金额列
pub fn read_decimal(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    Decimal::from_str(raw.trim())
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// 金额落库表示
pub fn write_decimal(value: &Decimal) -> String {
    value.to_string()
}

/// 读取时间戳列
pub fn read_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(idx)?;
    NaiveDateTime::parse_from_str(&raw, TS_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub fn write_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TS_FORMAT).to_string()
}
