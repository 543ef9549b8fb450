//! 班级晋级服务 - 业务能力层
//!
//! 一个固定的确定性状态机：通过考试则晋级到下一班级，
//! 其余任何结果保持原班级。无隐藏状态，不做持久化，
//! 当前班级与考试结果均由调用方提供并负责其真实性。

use phf::phf_map;

/// 晋级链：Class 1 → … → Class 5 → Graduated（吸收态）
static NEXT_CLASS: phf::Map<&'static str, &'static str> = phf_map! {
    "Class 1" => "Class 2",
    "Class 2" => "Class 3",
    "Class 3" => "Class 4",
    "Class 4" => "Class 5",
    "Class 5" => "Graduated",
    "Graduated" => "Graduated",
};

/// 触发晋级的考试结果
pub const PASS_RESULT: &str = "pass";

/// 计算下一班级
///
/// - `result` 为 `"pass"` 时按晋级链查表
/// - 其他结果返回原班级
/// - 未识别的班级名原样返回（视为"未知班级，不操作"）
pub fn advance(current_class: &str, result: &str) -> String {
    if result != PASS_RESULT {
        return current_class.to_string();
    }

    NEXT_CLASS
        .get(current_class)
        .map(|next| (*next).to_string())
        .unwrap_or_else(|| current_class.to_string())
}
