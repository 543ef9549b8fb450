//! 应用编排器 - 编排层
//!
//! 持有全部跨请求资源（配置、考试档案流程、辅导流程、会话表），
//! 外部路由层把解析好的请求交给这里的类型化入口。

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{
    AnswerUploadResponse, ChatRequest, ChatResponse, DeleteResponse, ExamUploadResponse,
    GradeRequest, GradeResponse, NotesUploadResponse, SubmissionEntry, UploadedFile,
};
use crate::services::progression;
use crate::utils::logging;
use crate::workflow::{ExamStore, TutorEngine, TutorSession};

/// 应用主结构
///
/// 会话表按调用方提供的会话标识存放辅导会话；表锁只在查找/插入
/// 期间持有，单个会话的锁横跨 LLM 调用（同一会话同时只有一次
/// 未完成调用）。互不相关的调用方之间不共享任何会话状态。
pub struct App {
    config: Config,
    exam_store: ExamStore,
    tutor: TutorEngine,
    sessions: Mutex<HashMap<String, Arc<Mutex<TutorSession>>>>,
}

impl App {
    /// 初始化应用
    pub fn new(config: Config) -> Self {
        logging::log_startup(&config);

        let exam_store = ExamStore::new(&config);
        let tutor = TutorEngine::new(&config);

        Self {
            config,
            exam_store,
            tutor,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// 获取配置
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ========== 学生：辅导提问 ==========

    /// 处理辅导提问
    ///
    /// 来源标识与配置不符时拒绝访问（路由层映射为 403）。
    /// 请求携带会话标识时在对应会话上续聊；未携带时使用一次性会话。
    /// 已存在会话的无障碍模式以创建时为准，请求中的标志不改变它。
    pub async fn handle_chat(&self, req: ChatRequest) -> AppResult<ChatResponse> {
        if req.source != self.config.chat_source_tag {
            warn!("⚠️ 拒绝来源 '{}' 的聊天请求", req.source);
            return Err(AppError::AccessDenied {
                source_tag: req.source,
            });
        }

        if req.message.trim().is_empty() {
            return Err(AppError::missing_field("message"));
        }

        let reply = match &req.session {
            Some(key) => {
                let session = self.session_for(key, req.is_blind).await;
                let mut session = session.lock().await;
                self.tutor.ask(&mut session, &req.message).await?
            }
            None => {
                let mut session = TutorSession::start(req.is_blind);
                self.tutor.ask(&mut session, &req.message).await?
            }
        };

        Ok(ChatResponse { reply })
    }

    /// 查找或创建指定标识的会话
    async fn session_for(
        &self,
        key: &str,
        accessibility_mode: bool,
    ) -> Arc<Mutex<TutorSession>> {
        let mut table = self.sessions.lock().await;
        table
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(TutorSession::start(accessibility_mode))))
            .clone()
    }

    // ========== 监护人：答题卡提交 ==========

    /// 处理答题卡上传
    pub async fn handle_upload_answers(
        &self,
        file: Option<UploadedFile>,
        student_name: Option<&str>,
    ) -> AppResult<AnswerUploadResponse> {
        let filename = self.exam_store.submit_answers(file, student_name).await?;

        Ok(AnswerUploadResponse {
            message: "Answer sheet submitted successfully".to_string(),
            status: "submitted".to_string(),
            filename,
        })
    }

    // ========== 管理员：内容发布与评分 ==========

    /// 处理试卷发布
    pub async fn handle_upload_exam(
        &self,
        file: Option<UploadedFile>,
        class_level: Option<&str>,
        subject: Option<&str>,
        student_type: Option<&str>,
    ) -> AppResult<ExamUploadResponse> {
        let message = self
            .exam_store
            .publish_exam(file, class_level, subject, student_type)
            .await?;

        Ok(ExamUploadResponse { message })
    }

    /// 处理讲义上传
    pub async fn handle_upload_notes(
        &self,
        file: Option<UploadedFile>,
    ) -> AppResult<NotesUploadResponse> {
        let filename = self.exam_store.upload_notes(file).await?;

        Ok(NotesUploadResponse {
            message: "Notes uploaded successfully".to_string(),
            filename,
        })
    }

    /// 列举全部提交记录
    pub async fn handle_list_submissions(&self) -> AppResult<Vec<SubmissionEntry>> {
        self.exam_store.list_submissions().await
    }

    /// 删除单个提交记录
    pub async fn handle_delete_submission(&self, filename: &str) -> AppResult<DeleteResponse> {
        self.exam_store.delete_submission(filename).await?;

        Ok(DeleteResponse {
            message: format!("Submission '{}' deleted", filename),
        })
    }

    /// 处理考试评分
    ///
    /// 纯查表操作：引擎只负责 班级 × 结果 → 下一班级 的映射，
    /// 学生当前班级的真实性由调用方保证。
    pub async fn handle_grade_exam(&self, req: GradeRequest) -> AppResult<GradeResponse> {
        let next_class = progression::advance(&req.current_class, &req.result);

        info!(
            "✓ 评分完成: {} ({}) → {}",
            req.current_class, req.result, next_class
        );

        Ok(GradeResponse {
            status: "graded".to_string(),
            result: req.result,
            next_class,
        })
    }
}
