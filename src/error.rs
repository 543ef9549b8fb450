use std::fmt;

/// 应用程序错误类型
///
/// 每个请求的失败都被限定在该请求范围内，任何错误都不会导致进程退出。
#[derive(Debug)]
pub enum AppError {
    /// 上传校验错误（缺少字段、非法扩展名、非法文件名等）
    Validation(ValidationError),
    /// 文件存储错误
    Storage(StorageError),
    /// 上游 LLM 服务错误
    Upstream(UpstreamError),
    /// 删除的提交记录不存在
    NotFound { filename: String },
    /// 来源标识不匹配，拒绝访问
    AccessDenied { source_tag: String },
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(e) => write!(f, "{}", e),
            AppError::Storage(e) => write!(f, "{}", e),
            AppError::Upstream(e) => write!(f, "{}", e),
            AppError::NotFound { filename } => {
                write!(f, "Submission not found: {}", filename)
            }
            AppError::AccessDenied { source_tag } => {
                write!(f, "Access denied for source '{}'", source_tag)
            }
            AppError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Validation(e) => Some(e),
            AppError::Storage(e) => Some(e),
            AppError::Upstream(e) => Some(e),
            _ => None,
        }
    }
}

/// 上传校验错误
///
/// 校验永远发生在任何写入之前，因此校验失败不产生任何状态变化。
#[derive(Debug)]
pub enum ValidationError {
    /// 请求中没有文件
    MissingFile,
    /// 文件名为空
    EmptyFilename,
    /// 扩展名不在允许列表中
    DisallowedExtension { extension: String },
    /// 必填字段缺失或为空
    MissingField { field: String },
    /// 清洗后的名称为空
    InvalidName { raw: String },
    /// 清洗后的路径片段仍包含目录穿越标记
    PathEscape { segment: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingFile => write!(f, "No file found in request"),
            ValidationError::EmptyFilename => write!(f, "No file selected"),
            ValidationError::DisallowedExtension { extension } => {
                write!(f, "File type '.{}' is not allowed", extension)
            }
            ValidationError::MissingField { field } => {
                write!(f, "Required field '{}' is missing", field)
            }
            ValidationError::InvalidName { raw } => {
                write!(f, "Name '{}' contains no usable characters", raw)
            }
            ValidationError::PathEscape { segment } => {
                write!(f, "Path segment '{}' is not allowed", segment)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// 文件存储错误
#[derive(Debug)]
pub enum StorageError {
    /// 创建目录失败
    CreateDirFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 读取目录失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 删除文件失败
    DeleteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::CreateDirFailed { path, source } => {
                write!(f, "Failed to create directory {}: {}", path, source)
            }
            StorageError::WriteFailed { path, source } => {
                write!(f, "Failed to write {}: {}", path, source)
            }
            StorageError::ReadFailed { path, source } => {
                write!(f, "Failed to read {}: {}", path, source)
            }
            StorageError::DeleteFailed { path, source } => {
                write!(f, "Failed to delete {}: {}", path, source)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::CreateDirFailed { source, .. }
            | StorageError::WriteFailed { source, .. }
            | StorageError::ReadFailed { source, .. }
            | StorageError::DeleteFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

/// 上游 LLM 服务错误
///
/// 重试与退避策略由上游协作方负责，本层只负责如实上报。
#[derive(Debug)]
pub enum UpstreamError {
    /// API 调用失败
    ApiCallFailed {
        model: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回内容为空
    EmptyReply { model: String },
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamError::ApiCallFailed { model, source } => {
                write!(f, "Tutor model call failed (model: {}): {}", model, source)
            }
            UpstreamError::EmptyReply { model } => {
                write!(f, "Tutor model returned no content (model: {})", model)
            }
        }
    }
}

impl std::error::Error for UpstreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UpstreamError::ApiCallFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            UpstreamError::EmptyReply { .. } => None,
        }
    }
}

// ========== 从子错误类型转换 ==========

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err)
    }
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        AppError::Upstream(err)
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建必填字段缺失错误
    pub fn missing_field(field: impl Into<String>) -> Self {
        AppError::Validation(ValidationError::MissingField {
            field: field.into(),
        })
    }

    /// 创建路径穿越错误
    pub fn path_escape(segment: impl Into<String>) -> Self {
        AppError::Validation(ValidationError::PathEscape {
            segment: segment.into(),
        })
    }

    /// 创建无效名称错误
    pub fn invalid_name(raw: impl Into<String>) -> Self {
        AppError::Validation(ValidationError::InvalidName { raw: raw.into() })
    }

    /// 创建文件写入错误
    pub fn write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Storage(StorageError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建目录创建错误
    pub fn create_dir_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Storage(StorageError::CreateDirFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建目录读取错误
    pub fn read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Storage(StorageError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件删除错误
    pub fn delete_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Storage(StorageError::DeleteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建上游调用失败错误
    pub fn upstream_call_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Upstream(UpstreamError::ApiCallFailed {
            model: model.into(),
            source: Box::new(source),
        })
    }

    /// 创建上游空回复错误
    pub fn upstream_empty_reply(model: impl Into<String>) -> Self {
        AppError::Upstream(UpstreamError::EmptyReply {
            model: model.into(),
        })
    }

    /// 创建提交记录不存在错误
    pub fn not_found(filename: impl Into<String>) -> Self {
        AppError::NotFound {
            filename: filename.into(),
        }
    }
}

// ========== 路由层适配 ==========

impl AppError {
    /// 返回与错误分类对应的 HTTP 状态码
    ///
    /// 路由层（不属于本 crate）用它把错误映射为响应状态。
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Validation(_) => 400,
            AppError::AccessDenied { .. } => 403,
            AppError::NotFound { .. } => 404,
            AppError::Upstream(_) => 502,
            AppError::Storage(_) | AppError::Other(_) => 500,
        }
    }

    /// 返回 `{"error": ...}` 形式的响应体
    pub fn to_response_body(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.to_string() })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
