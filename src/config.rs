use anyhow::{Context, Result};
use std::path::Path;

/// 程序配置文件
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// 上传文件根目录
    pub upload_root: String,
    /// 提交记录的静态访问路径前缀（由路由层挂载）
    pub submissions_url_prefix: String,
    /// 允许访问聊天接口的来源标识
    pub chat_source_tag: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upload_root: "uploads".to_string(),
            submissions_url_prefix: "/uploads/submissions".to_string(),
            chat_source_tag: "student_dashboard".to_string(),
            verbose_logging: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.groq.com/openai/v1".to_string(),
            llm_model_name: "llama-3.3-70b-versatile".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            upload_root: std::env::var("UPLOAD_ROOT").unwrap_or(default.upload_root),
            submissions_url_prefix: std::env::var("SUBMISSIONS_URL_PREFIX").unwrap_or(default.submissions_url_prefix),
            chat_source_tag: std::env::var("CHAT_SOURCE_TAG").unwrap_or(default.chat_source_tag),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
        }
    }

    /// 从 TOML 配置文件加载
    ///
    /// 文件中未出现的字段使用默认值。
    pub async fn from_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("无法解析配置文件: {}", path.display()))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.upload_root, "uploads");
        assert_eq!(config.chat_source_tag, "student_dashboard");
        assert_eq!(config.llm_model_name, "llama-3.3-70b-versatile");
    }

    #[test]
    fn test_from_file_merges_with_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "upload_root = \"data\"\nllm_model_name = \"test-model\"\n",
        )
        .unwrap();

        let config = tokio_test::block_on(Config::from_file(&path)).unwrap();

        assert_eq!(config.upload_root, "data");
        assert_eq!(config.llm_model_name, "test-model");
        // 文件中未出现的字段保持默认值
        assert_eq!(config.chat_source_tag, "student_dashboard");
    }

    #[test]
    fn test_from_file_missing_path_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let result = tokio_test::block_on(Config::from_file(&tmp.path().join("absent.toml")));
        assert!(result.is_err());
    }
}
