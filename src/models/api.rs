//! 对外接口的数据结构
//!
//! 与路由层约定的请求/响应载荷，字段名与前端保持一致
//! （部分字段在线上为 camelCase）。

use serde::{Deserialize, Serialize};

/// 聊天请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// 来源标识，用于访问控制
    pub source: String,
    /// 学生的提问
    #[serde(default)]
    pub message: String,
    /// 是否启用无障碍（盲人）模式
    #[serde(default)]
    pub is_blind: bool,
    /// 会话标识；缺省时每次请求使用一次性会话
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
}

/// 聊天响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// 答题卡上传响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerUploadResponse {
    pub message: String,
    pub status: String,
    pub filename: String,
}

/// 讲义上传响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesUploadResponse {
    pub message: String,
    pub filename: String,
}

/// 试卷发布响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamUploadResponse {
    pub message: String,
}

/// 提交记录条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionEntry {
    pub filename: String,
    pub url: String,
}

/// 提交记录删除响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// 评分请求
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeRequest {
    /// "pass" 或其他任意结果
    pub result: String,
    pub current_class: String,
}

/// 评分响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResponse {
    pub status: String,
    pub result: String,
    pub next_class: String,
}
