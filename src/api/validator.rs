// ==========================================
// 制造库存系统 - 输入校验
// ==========================================
// 职责: API 边界的输入校验，先于任何存储访问与计算
// ==========================================

use rust_decimal::{Decimal, RoundingStrategy};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::product::{ProductInput, PRODUCT_CODE_MAX_LEN, PRODUCT_NAME_MAX_LEN};
use crate::domain::raw_material::RawMaterialInput;

/// 金额保留小数位
pub const MONEY_SCALE: u32 = 2;

/// 金额上限 99,999,999.99（十位有效数字、两位小数）
///
/// 尾数 9_999_999_999 = 2 × 2^32 + 1_410_065_407
pub const MONEY_MAX: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, MONEY_SCALE);

/// 校验非空文本并去除首尾空白
///
/// # 参数
/// - field: 字段名（用于错误信息）
/// - value: 原始值
/// - max_len: 最大字符数（None 表示不限）
pub fn validate_text(field: &str, value: &str, max_len: Option<usize>) -> ApiResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput(format!("{}不能为空", field)));
    }
    if let Some(max) = max_len {
        if trimmed.chars().count() > max {
            return Err(ApiError::InvalidInput(format!(
                "{}长度不能超过{}个字符",
                field, max
            )));
        }
    }
    Ok(trimmed.to_string())
}

/// 校验金额非负、不超过 MONEY_MAX，并按两位小数四舍五入（远离零）
pub fn validate_money(field: &str, value: Decimal) -> ApiResult<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ApiError::InvalidInput(format!("{}不能为负: {}", field, value)));
    }
    let rounded = value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded > MONEY_MAX {
        return Err(ApiError::InvalidInput(format!(
            "{}超出上限{}: {}",
            field, MONEY_MAX, value
        )));
    }
    Ok(rounded)
}

/// 校验正整数数量（需求量、请求量）
pub fn validate_positive_quantity(field: &str, value: i64) -> ApiResult<i64> {
    if value <= 0 {
        return Err(ApiError::InvalidQuantity {
            field: field.to_string(),
            value,
        });
    }
    Ok(value)
}

/// 校验非负库存数量
pub fn validate_stock_quantity(field: &str, value: i64) -> ApiResult<i64> {
    if value < 0 {
        return Err(ApiError::InvalidInput(format!("{}不能为负: {}", field, value)));
    }
    Ok(value)
}

/// 规范化产品载荷
pub fn normalize_product_input(input: &ProductInput) -> ApiResult<ProductInput> {
    Ok(ProductInput {
        code: validate_text("产品编码", &input.code, Some(PRODUCT_CODE_MAX_LEN))?,
        name: validate_text("产品名称", &input.name, Some(PRODUCT_NAME_MAX_LEN))?,
        value: validate_money("产品单价", input.value)?,
    })
}

/// 规范化原材料载荷
///
/// # 参数
/// - default_unit: unit 为空时使用的计量单位
pub fn normalize_raw_material_input(
    input: &RawMaterialInput,
    default_unit: &str,
) -> ApiResult<RawMaterialInput> {
    let unit = match input.unit.as_deref().map(str::trim) {
        Some(u) if !u.is_empty() => u.to_string(),
        _ => default_unit.to_string(),
    };

    Ok(RawMaterialInput {
        code: validate_text("原材料编码", &input.code, None)?,
        name: validate_text("原材料名称", &input.name, None)?,
        unit: Some(unit),
        quantity: validate_stock_quantity("在库数量", input.quantity)?,
        unit_price: validate_money("原材料单价", input.unit_price)?,
    })
}
