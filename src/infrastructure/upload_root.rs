//! 上传根目录 - 基础设施层
//!
//! 持有唯一的上传根目录资源，只暴露"解析目录 / 原子写入 / 列举 / 删除"能力

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::ContentCategory;
use crate::services::naming;

/// 上传根目录
///
/// 职责：
/// - 持有唯一的根目录路径
/// - 按内容分类解析存储目录（按需创建）
/// - 暴露原子写入 / 列举 / 删除能力
/// - 不认识试卷 / 讲义 / 答题卡的业务含义
/// - 不处理业务流程
pub struct UploadRoot {
    root: PathBuf,
}

impl UploadRoot {
    /// 创建新的上传根目录
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// 获取根目录路径
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 解析分类存储目录，目录不存在时创建（幂等）
    ///
    /// # 参数
    /// - `category`: 内容分类，决定根目录下的子树
    /// - `attributes`: 附加路径片段（试卷为 科目/学生组，其余分类为空）
    ///
    /// 每个片段在拼接前都会清洗；清洗后仍包含穿越标记的片段
    /// 返回路径穿越错误。
    pub async fn resolve_dir(
        &self,
        category: ContentCategory,
        attributes: &[&str],
    ) -> AppResult<PathBuf> {
        let mut dir = self.root.join(category.subdir());

        for raw in attributes {
            let segment = naming::sanitize(raw)?;
            if segment == "." || segment.contains("..") {
                return Err(AppError::path_escape(segment));
            }
            dir.push(&segment);
        }

        fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::create_dir_failed(dir.display().to_string(), e))?;

        Ok(dir)
    }

    /// 原子写入文件
    ///
    /// 先写入同目录下的 `{文件名}.part` 临时文件，再重命名到位。
    /// 中途失败最多留下一个临时文件，目标路径上永远不会出现半截文件；
    /// 同名并发写入为"后写者胜"。
    pub async fn write_atomic(
        &self,
        dir: &Path,
        filename: &str,
        data: &[u8],
    ) -> AppResult<PathBuf> {
        if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
            return Err(AppError::path_escape(filename));
        }

        let final_path = dir.join(filename);
        let temp_path = dir.join(format!("{}.part", filename));

        fs::write(&temp_path, data)
            .await
            .map_err(|e| AppError::write_failed(temp_path.display().to_string(), e))?;

        fs::rename(&temp_path, &final_path)
            .await
            .map_err(|e| AppError::write_failed(final_path.display().to_string(), e))?;

        debug!("已写入 {} ({} 字节)", final_path.display(), data.len());

        Ok(final_path)
    }

    /// 列举分类目录下的文件名（目录遍历顺序）
    ///
    /// 目录尚不存在时返回空列表而不是错误；`.part` 临时文件不计入。
    pub async fn list(&self, category: ContentCategory) -> AppResult<Vec<String>> {
        let dir = self.root.join(category.subdir());

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AppError::read_failed(dir.display().to_string(), e)),
        };

        let mut filenames = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AppError::read_failed(dir.display().to_string(), e))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| AppError::read_failed(dir.display().to_string(), e))?;
            if !file_type.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            if name.ends_with(".part") {
                continue;
            }
            filenames.push(name);
        }

        Ok(filenames)
    }

    /// 删除分类目录下的单个文件
    ///
    /// 文件不存在返回 NotFound（非致命），不影响其他文件。
    pub async fn remove(&self, category: ContentCategory, filename: &str) -> AppResult<()> {
        if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
            return Err(AppError::path_escape(filename));
        }

        let path = self.root.join(category.subdir()).join(filename);

        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!("已删除 {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::not_found(filename))
            }
            Err(e) => Err(AppError::delete_failed(path.display().to_string(), e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_dir_creates_category_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let root = UploadRoot::new(tmp.path());

        let dir = root
            .resolve_dir(ContentCategory::ExamPaper, &["Maths", "Standard"])
            .await
            .unwrap();

        assert!(dir.is_dir());
        assert_eq!(dir, tmp.path().join("exams").join("Maths").join("Standard"));

        // 幂等：再次解析同一目录不报错
        let again = root
            .resolve_dir(ContentCategory::ExamPaper, &["Maths", "Standard"])
            .await
            .unwrap();
        assert_eq!(dir, again);
    }

    #[tokio::test]
    async fn test_resolve_dir_stays_inside_root() {
        let tmp = tempfile::tempdir().unwrap();
        let root = UploadRoot::new(tmp.path());

        let dir = root
            .resolve_dir(ContentCategory::ExamPaper, &["../../outside", "Blind"])
            .await
            .unwrap();

        assert!(dir.starts_with(tmp.path()));
    }

    #[tokio::test]
    async fn test_write_atomic_leaves_no_temp_file() {
        let tmp = tempfile::tempdir().unwrap();
        let root = UploadRoot::new(tmp.path());

        let dir = root
            .resolve_dir(ContentCategory::Note, &[])
            .await
            .unwrap();
        let path = root.write_atomic(&dir, "lesson.pdf", b"v1").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"v1");
        assert!(!dir.join("lesson.pdf.part").exists());
    }

    #[tokio::test]
    async fn test_write_atomic_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let root = UploadRoot::new(tmp.path());

        let dir = root
            .resolve_dir(ContentCategory::Note, &[])
            .await
            .unwrap();
        root.write_atomic(&dir, "lesson.pdf", b"v1").await.unwrap();
        let path = root.write_atomic(&dir, "lesson.pdf", b"v2").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"v2");
    }

    #[tokio::test]
    async fn test_write_atomic_rejects_separator_in_filename() {
        let tmp = tempfile::tempdir().unwrap();
        let root = UploadRoot::new(tmp.path());

        let dir = root
            .resolve_dir(ContentCategory::Note, &[])
            .await
            .unwrap();
        assert!(root
            .write_atomic(&dir, "../escape.pdf", b"x")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_list_missing_directory_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let root = UploadRoot::new(tmp.path());

        let listed = root.list(ContentCategory::Submission).await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let root = UploadRoot::new(tmp.path());
        root.resolve_dir(ContentCategory::Submission, &[])
            .await
            .unwrap();

        let err = root
            .remove(ContentCategory::Submission, "nonexistent.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
