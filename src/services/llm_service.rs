//! LLM 服务 - 业务能力层
//!
//! 只负责"调用辅导模型"能力，不关心会话流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Groq、Azure 等）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{ChatRole, ChatTurn};

/// LLM 服务
///
/// 职责：
/// - 把有序的对话轮次转换为 API 消息列表
/// - 发起一次对话补全调用并取回文本回复
/// - 不持有会话状态
/// - 不关心提示词模板的选择
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
        }
    }

    /// 获取模型名称
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 发送完整的对话轮次序列并取回回复
    ///
    /// # 参数
    /// - `turns`: 有序轮次（system 轮 + 全部历史 + 最新 user 轮）
    ///
    /// # 返回
    /// 返回模型回复的文本内容；调用失败或内容为空时返回上游错误。
    pub async fn send_chat(&self, turns: &[ChatTurn]) -> AppResult<String> {
        debug!("调用 LLM API，模型: {}，轮次数: {}", self.model_name, turns.len());

        // 构建消息列表
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::with_capacity(turns.len());
        for turn in turns {
            let message = match turn.role {
                ChatRole::System => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessageArgs::default()
                        .content(turn.content.as_str())
                        .build()
                        .map_err(|e| AppError::upstream_call_failed(&self.model_name, e))?,
                ),
                ChatRole::User => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessageArgs::default()
                        .content(turn.content.as_str())
                        .build()
                        .map_err(|e| AppError::upstream_call_failed(&self.model_name, e))?,
                ),
                ChatRole::Assistant => ChatCompletionRequestMessage::Assistant(
                    ChatCompletionRequestAssistantMessageArgs::default()
                        .content(turn.content.as_str())
                        .build()
                        .map_err(|e| AppError::upstream_call_failed(&self.model_name, e))?,
                ),
            };
            messages.push(message);
        }

        // 构建请求
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(0.7)
            .max_tokens(1024u32)
            .build()
            .map_err(|e| AppError::upstream_call_failed(&self.model_name, e))?;

        // 调用 API
        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::upstream_call_failed(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        // 提取响应内容；空回复按上游错误处理
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| AppError::upstream_empty_reply(&self.model_name))?;

        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 测试 LLM API 连接性
    ///
    /// 运行方式：
    /// ```bash
    /// LLM_API_KEY=... cargo test test_send_chat_live -- --ignored --nocapture
    /// ```
    #[tokio::test]
    #[ignore]
    async fn test_send_chat_live() {
        let _ = tracing_subscriber::fmt::try_init();

        let config = Config::from_env();
        let service = LlmService::new(&config);

        let turns = vec![
            ChatTurn::system("You are a concise assistant. Keep answers short."),
            ChatTurn::user("What is the capital of France?"),
        ];

        let reply = service.send_chat(&turns).await.expect("LLM 调用失败");
        println!("LLM 响应: {}", reply);
        assert!(!reply.is_empty());
    }
}
