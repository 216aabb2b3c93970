// ==========================================
// 制造库存系统 - 命令行入口
// ==========================================
// 用法:
//   autoflex-inventory [--db <path>] <command> [args...]
//
// 输出: JSON 写到 stdout，日志写到 stderr
// ==========================================

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;

use autoflex_inventory::app::{get_default_db_path, AppState};
use autoflex_inventory::config::config_keys;
use autoflex_inventory::logging;

const RECENT_MOVEMENT_LIMIT: usize = 50;

const USAGE: &str = "\
用法: autoflex-inventory [--db <path>] <command> [args...]

命令:
  init                                    初始化数据库
  suggest                                 生产建议（按总价值降序）
  simulate <product_id> <quantity>        模拟生产（不扣减库存）
  blocked                                 不可生产的产品及原因
  products                                产品列表
  materials                               原材料列表
  adjust-stock <material_id> <delta> [actor] [reason]
                                          调整库存（delta 可为负）
  movements [material_id]                 库存流水（不指定原材料时列出最近 50 条）
  config [<key> [<value>]]                查看或写入配置

环境变量:
  AUTOFLEX_DB_PATH   默认数据库路径
  RUST_LOG           日志级别（默认 info）";

fn main() -> Result<()> {
    logging::init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let db_path = match args.iter().position(|a| a == "--db") {
        Some(idx) => {
            if idx + 1 >= args.len() {
                bail!("--db 需要一个路径参数\n\n{}", USAGE);
            }
            let path = args.remove(idx + 1);
            args.remove(idx);
            path
        }
        None => get_default_db_path(),
    };

    let Some(command) = args.first().cloned() else {
        println!("{}", USAGE);
        return Ok(());
    };
    let rest = &args[1..];

    tracing::info!(command = %command, db_path = %db_path, "{} v{}", autoflex_inventory::APP_NAME, autoflex_inventory::VERSION);

    let state = AppState::new(db_path).map_err(|e| anyhow!(e))?;

    match command.as_str() {
        "init" => print_json(&serde_json::json!({
            "db_path": state.db_path,
            "schema_version": autoflex_inventory::db::CURRENT_SCHEMA_VERSION,
        })),
        "suggest" => print_json(&state.production_api.get_suggestions()?),
        "simulate" => {
            let product_id = parse_arg(rest, 0, "product_id")?;
            let quantity = parse_arg(rest, 1, "quantity")?;
            print_json(&state.production_api.simulate_production(product_id, quantity)?)
        }
        "blocked" => print_json(&state.production_api.list_blocked_products()?),
        "products" => print_json(&state.product_api.list_products()?),
        "materials" => print_json(&state.raw_material_api.list_raw_materials()?),
        "adjust-stock" => {
            let material_id = parse_arg(rest, 0, "material_id")?;
            let delta = parse_arg(rest, 1, "delta")?;
            let actor = rest.get(2).map(String::as_str).unwrap_or("cli");
            let reason = rest.get(3).map(String::as_str);
            print_json(
                &state
                    .raw_material_api
                    .adjust_stock(material_id, delta, actor, reason)?,
            )
        }
        "movements" => {
            if rest.is_empty() {
                print_json(&state.raw_material_api.list_recent_movements(RECENT_MOVEMENT_LIMIT)?)
            } else {
                let material_id = parse_arg(rest, 0, "material_id")?;
                print_json(&state.raw_material_api.list_stock_movements(material_id)?)
            }
        }
        "config" => match (rest.first(), rest.get(1)) {
            (Some(key), Some(value)) => {
                if key != config_keys::SUGGESTION_LIMIT && key != config_keys::DEFAULT_MATERIAL_UNIT {
                    tracing::warn!(config_key = %key, "未知配置键，仍然写入");
                }
                state
                    .config_manager
                    .set_global_config_value(key, value)
                    .map_err(|e| anyhow!("写入配置失败: {}", e))?;
                print_json(&serde_json::json!({ "key": key, "value": value }))
            }
            (None, _) => print_json(
                &state
                    .config_manager
                    .list_global_configs()
                    .map_err(|e| anyhow!("读取配置失败: {}", e))?,
            ),
            (Some(key), None) => {
                let value = state
                    .config_manager
                    .get_global_config_value(key)
                    .map_err(|e| anyhow!("读取配置失败: {}", e))?;
                print_json(&serde_json::json!({ "key": key, "value": value }))
            }
        },
        other => bail!("未知命令: {}\n\n{}", other, USAGE),
    }
}

fn parse_arg(args: &[String], idx: usize, name: &str) -> Result<i64> {
    let raw = args
        .get(idx)
        .ok_or_else(|| anyhow!("缺少参数 <{}>\n\n{}", name, USAGE))?;
    raw.parse::<i64>()
        .with_context(|| format!("参数 <{}> 不是整数: {}", name, raw))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("序列化输出失败")?;
    println!("{}", json);
    Ok(())
}
