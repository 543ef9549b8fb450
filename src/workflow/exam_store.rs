//! 考试档案生命周期流程 - 流程层
//!
//! 核心职责：编排 校验 → 路径解析 → 命名 → 写入 的完整流程
//!
//! 三类内容的身份规则：
//! 1. 试卷：(科目, 班级, 学生组) 唯一，重复发布覆盖
//! 2. 讲义：清洗后的原始文件名唯一，重复上传覆盖
//! 3. 答题卡：时间戳限定的生成名，永不隐式覆盖

use chrono::Utc;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppResult, ValidationError};
use crate::infrastructure::UploadRoot;
use crate::models::{ContentCategory, SubmissionEntry, UploadedFile};
use crate::services::{naming, validator};

/// 考试档案生命周期流程
///
/// - 编排完整的上传 / 列举 / 删除流程
/// - 决定何时校验、何时清洗、何时写入
/// - 通过 UploadRoot 访问文件系统，自身不做 I/O
pub struct ExamStore {
    upload_root: UploadRoot,
    submissions_url_prefix: String,
}

impl ExamStore {
    /// 创建新的考试档案流程
    pub fn new(config: &Config) -> Self {
        Self {
            upload_root: UploadRoot::new(&config.upload_root),
            submissions_url_prefix: config.submissions_url_prefix.clone(),
        }
    }

    /// 发布试卷
    ///
    /// 同一 (科目, 班级, 学生组) 槽位只保留一份规范试卷，
    /// 重复发布覆盖旧文件。返回带科目与班级的确认消息。
    pub async fn publish_exam(
        &self,
        file: Option<UploadedFile>,
        class_level: Option<&str>,
        subject: Option<&str>,
        student_type: Option<&str>,
    ) -> AppResult<String> {
        validator::validate_upload(
            file.as_ref(),
            &[
                ("classLevel", class_level),
                ("subject", subject),
                ("studentType", student_type),
            ],
        )?;

        let file = file.ok_or(ValidationError::MissingFile)?;
        let class_level = class_level.unwrap_or_default();
        let subject = subject.unwrap_or_default();
        let student_type = student_type.unwrap_or_default();

        let dir = self
            .upload_root
            .resolve_dir(ContentCategory::ExamPaper, &[subject, student_type])
            .await?;
        let filename = naming::exam_filename(class_level)?;
        let path = self.upload_root.write_atomic(&dir, &filename, &file.data).await?;

        info!(
            "📤 试卷已发布: {} ({} / {} / {})",
            path.display(),
            subject,
            class_level,
            student_type
        );

        Ok(format!(
            "{} exam for {} ({}) published successfully",
            subject, class_level, student_type
        ))
    }

    /// 上传讲义
    ///
    /// 保留清洗后的原始文件名，不做改名；同名讲义覆盖。
    /// 返回存储文件名。
    pub async fn upload_notes(&self, file: Option<UploadedFile>) -> AppResult<String> {
        validator::validate_upload(file.as_ref(), &[])?;

        let file = file.ok_or(ValidationError::MissingFile)?;
        let filename = naming::sanitize(&file.filename)?;

        let dir = self
            .upload_root
            .resolve_dir(ContentCategory::Note, &[])
            .await?;
        self.upload_root.write_atomic(&dir, &filename, &file.data).await?;

        info!("📤 讲义已上传: {}", filename);

        Ok(filename)
    }

    /// 提交答题卡（以当前时间为时间戳）
    pub async fn submit_answers(
        &self,
        file: Option<UploadedFile>,
        student_name: Option<&str>,
    ) -> AppResult<String> {
        self.submit_answers_at(file, student_name, Utc::now().timestamp())
            .await
    }

    /// 提交答题卡（指定时间戳）
    ///
    /// 存储名为 `{学生名}_{时间戳}_AnswerSheet.pdf`，每次提交得到
    /// 新名称，不覆盖既有提交。同一学生同一秒内的并发提交会
    /// 落到同一名称（秒级时间戳的已知限制）。
    pub async fn submit_answers_at(
        &self,
        file: Option<UploadedFile>,
        student_name: Option<&str>,
        timestamp: i64,
    ) -> AppResult<String> {
        validator::validate_upload(file.as_ref(), &[("studentName", student_name)])?;

        let file = file.ok_or(ValidationError::MissingFile)?;
        let student_name = student_name.unwrap_or_default();
        let filename = naming::submission_filename(student_name, timestamp)?;

        let dir = self
            .upload_root
            .resolve_dir(ContentCategory::Submission, &[])
            .await?;
        self.upload_root.write_atomic(&dir, &filename, &file.data).await?;

        info!("📤 答题卡已提交: {} (学生: {})", filename, student_name);

        Ok(filename)
    }

    /// 列举全部提交记录
    ///
    /// 按目录遍历顺序返回 文件名 + 访问地址；提交目录尚不存在时
    /// 返回空列表而不是错误。
    pub async fn list_submissions(&self) -> AppResult<Vec<SubmissionEntry>> {
        let filenames = self.upload_root.list(ContentCategory::Submission).await?;

        Ok(filenames
            .into_iter()
            .map(|filename| {
                let url = format!("{}/{}", self.submissions_url_prefix, filename);
                SubmissionEntry { filename, url }
            })
            .collect())
    }

    /// 删除单个提交记录
    ///
    /// 文件名先清洗再在提交目录内解析；文件不存在返回 NotFound，
    /// 不影响其他文件。
    pub async fn delete_submission(&self, filename: &str) -> AppResult<()> {
        let filename = naming::sanitize(filename)?;

        match self
            .upload_root
            .remove(ContentCategory::Submission, &filename)
            .await
        {
            Ok(()) => {
                info!("🗑️ 提交记录已删除: {}", filename);
                Ok(())
            }
            Err(e) => {
                warn!("⚠️ 删除提交记录失败: {} ({})", filename, e);
                Err(e)
            }
        }
    }
}
