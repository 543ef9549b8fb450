//! 流程层（Workflow Layer）
//!
//! 定义"一次请求"的完整处理流程，只依赖业务能力（services）
//! 与基础设施（infrastructure），不持有跨请求资源。
//!
//! - `exam_store` - 考试档案生命周期：发布试卷、上传讲义、
//!   提交答题卡、列举与删除提交记录
//! - `tutor_session` - 辅导会话：提示词模板选择、轮次管理、
//!   失败回滚

pub mod exam_store;
pub mod tutor_session;

pub use exam_store::ExamStore;
pub use tutor_session::{TutorEngine, TutorSession};
