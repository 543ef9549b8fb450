//! 文件名清洗与命名服务 - 业务能力层
//!
//! 把不可信的外部名称（学生姓名、讲义文件名、路径片段）转换为
//! 文件系统安全、不会冲突的名称。全部为确定性纯函数，无副作用。

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{AppError, AppResult};

/// 路径分隔符（正斜杠、反斜杠的连续片段）
fn path_separators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[/\\]+").unwrap())
}

/// 安全集合之外的字符（字母、数字、下划线、连字符、点号之外）
fn unsafe_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9._-]").unwrap())
}

/// 连续两个以上的点号（目录穿越标记）
fn dot_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\.{2,}").unwrap())
}

/// 清洗不可信名称
///
/// 处理顺序：
/// 1. 把路径分隔符片段折叠为单个下划线
/// 2. 删除安全集合之外的所有字符
/// 3. 把连续点号折叠为单个点号（`..` 在此被消灭）
///
/// 清洗结果为空时返回校验错误。
pub fn sanitize(raw: &str) -> AppResult<String> {
    let collapsed = path_separators().replace_all(raw, "_");
    let stripped = unsafe_chars().replace_all(&collapsed, "");
    let safe = dot_runs().replace_all(&stripped, ".");

    if safe.is_empty() {
        return Err(AppError::invalid_name(raw));
    }

    Ok(safe.into_owned())
}

/// 生成答题卡存储文件名
///
/// 格式：`{清洗后姓名}_{时间戳}_AnswerSheet.pdf`。
/// 时间戳为秒级，同一学生同一秒内的两次提交会得到相同名称，
/// 这是已知并接受的限制。
pub fn submission_filename(student_name: &str, timestamp: i64) -> AppResult<String> {
    let name = sanitize(student_name)?;
    Ok(format!("{}_{}_AnswerSheet.pdf", name, timestamp))
}

/// 生成试卷规范文件名
///
/// 格式：`{清洗后班级（空格转下划线）}_Final_Exam.pdf`，
/// 例如 `Class_1_Final_Exam.pdf`。同一 (科目, 班级, 学生组)
/// 身份的再次发布会覆盖旧文件。
pub fn exam_filename(class_level: &str) -> AppResult<String> {
    let level = sanitize(&class_level.replace(' ', "_"))?;
    Ok(format!("{}_Final_Exam.pdf", level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_safe_characters() {
        assert_eq!(sanitize("Asha").unwrap(), "Asha");
        assert_eq!(sanitize("lesson-3_notes.pdf").unwrap(), "lesson-3_notes.pdf");
    }

    #[test]
    fn test_sanitize_strips_unsafe_characters() {
        assert_eq!(sanitize("Asha Rao").unwrap(), "AshaRao");
        assert_eq!(sanitize("notes (final)!.pdf").unwrap(), "notesfinal.pdf");
    }

    #[test]
    fn test_sanitize_removes_traversal_sequences() {
        let result = sanitize("../../etc/passwd").unwrap();
        assert!(!result.contains(".."));
        assert!(!result.contains('/'));
        assert!(!result.contains('\\'));

        let windows = sanitize(r"..\..\boot.ini").unwrap();
        assert!(!windows.contains(".."));
        assert!(!windows.contains('\\'));
    }

    #[test]
    fn test_sanitize_rejects_empty_results() {
        assert!(sanitize("").is_err());
        assert!(sanitize("???!!!").is_err());
        assert!(sanitize("   ").is_err());
    }

    #[test]
    fn test_sanitize_nonempty_when_safe_char_present() {
        assert_eq!(sanitize("!a!").unwrap(), "a");
    }

    #[test]
    fn test_submission_filename_format() {
        assert_eq!(
            submission_filename("Asha", 1700000000).unwrap(),
            "Asha_1700000000_AnswerSheet.pdf"
        );
    }

    #[test]
    fn test_exam_filename_format() {
        assert_eq!(exam_filename("Class 1").unwrap(), "Class_1_Final_Exam.pdf");
        assert_eq!(exam_filename("Class 5").unwrap(), "Class_5_Final_Exam.pdf");
    }

    #[test]
    fn test_exam_filename_collapses_separators() {
        assert_eq!(exam_filename("Class/1").unwrap(), "Class_1_Final_Exam.pdf");
    }
}
