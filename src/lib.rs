//! # Academy Backend
//!
//! 学业支持后台的核心库：考试档案生命周期 + 辅导会话引擎
//!
//! 三种角色通过外部路由层调用本库：学生提问由语言模型作答；
//! 监护人提交答题卡；管理员发布试卷与讲义、评分并晋级学生。
//! HTTP 路由、CORS、静态文件传输与进程引导均由外部协作方负责，
//! 本库只暴露类型化的操作入口与请求/响应数据结构。
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（上传根目录），只暴露能力
//! - `UploadRoot` - 唯一的文件系统 owner，提供 解析/写入/列举/删除 能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每个模块一种能力
//! - `naming` - 名称清洗与命名能力（纯函数）
//! - `validator` - 上传校验能力（无 I/O）
//! - `progression` - 班级晋级查表能力（纯函数）
//! - `LlmService` - 辅导模型调用能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次请求"的完整处理流程
//! - `ExamStore` - 考试档案流程（发布 → 上传 → 列举 → 删除）
//! - `TutorSession` / `TutorEngine` - 辅导会话流程（追加 → 调用 → 回滚）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 应用编排器，持有资源与会话表，
//!   为每个对外操作提供一个入口
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::UploadRoot;
pub use models::{ChatRequest, ChatResponse, ContentCategory, UploadedFile};
pub use orchestrator::App;
pub use workflow::{ExamStore, TutorEngine, TutorSession};
