//! 辅导会话流程 - 流程层
//!
//! 核心职责：定义"一次提问"的完整处理流程
//!
//! 流程顺序：
//! 1. 追加 user 轮 → 携带完整轮次序列调用 LLM → 追加 assistant 轮
//! 2. 调用失败 → 回滚刚追加的 user 轮（会话保持一致，可直接重试）
//!
//! 两套系统提示词只在输出排版指令上不同（无障碍模式要求
//! 全词拼读算术、短句、无符号；标准模式使用表情符号分节），
//! 不改变答案的知识内容。模板为静态文本，永不插入用户数据。

use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{ChatRole, ChatTurn};
use crate::services::LlmService;

/// 标准模式系统提示词（面向明眼学生的仪表盘渲染）
pub const STANDARD_SYSTEM_PROMPT: &str = r#"You are a friendly school tutor for students.

IMPORTANT FORMATTING RULE:
You MUST use double line breaks (press Enter twice) between every section.
Markdown requires this to display correctly on the student's dashboard.

RULES:
1. First understand the SUBJECT of the question:
   - Maths: show a step-by-step solution
   - Science: explain the concept simply
   - English: explain with examples
   - Programming: explain the logic with an example

2. Use finger counting 🖐️🤚 ONLY IF:
   - The question is basic arithmetic (addition or multiplication)
   - Numbers are small (10 or less)

3. DO NOT use finger emojis for:
   - Theory questions
   - Science definitions
   - English grammar
   - Programming logic

4. Always format answers clearly:

📌 ANSWER
---------
[Direct answer]

📖 EXPLANATION
--------------
[Simple explanation]

💡 EXAMPLE (if helpful)
----------------------
[Example]

Be clear, correct, and student-friendly."#;

/// 无障碍模式系统提示词（面向读屏软件的语音播报）
pub const BLIND_SYSTEM_PROMPT: &str = r#"You are a friendly tutor for a BLIND student.
To ensure the computer's text-to-speech reads your answer clearly:

1. USE FULL WORDS FOR MATH: say "plus", "minus", "times", and "equals". Never write arithmetic with symbols.
2. ADD PAUSES: use periods and commas frequently so the voice pauses.
   For the sum of two and three, write "Two, plus three, equals five."
3. NO SYMBOLS: never use emojis, bullet glyphs, or decorative lines.
4. STRUCTURE: start sections with "The answer is", then "The explanation is", then "An example is".
5. STEP BY STEP: when counting, put a comma after every number so the voice pauses.
   Example: "Count with me: one, two, three, four, five."
6. WRITE IN SHORT SENTENCES.
7. USE VERY EASY LANGUAGE. First standard kids should understand."#;

/// 辅导会话
///
/// 会话不变量：
/// - 恰好一条 system 轮，永远位于首位
/// - system 轮内容由无障碍标志在创建时一次性决定，中途不变
/// - 轮次按时间有序，失败的提问不留下无回复的 user 轮
#[derive(Debug, Clone)]
pub struct TutorSession {
    accessibility_mode: bool,
    turns: Vec<ChatTurn>,
}

impl TutorSession {
    /// 创建新会话，按无障碍标志播种 system 轮
    pub fn start(accessibility_mode: bool) -> Self {
        let template = if accessibility_mode {
            BLIND_SYSTEM_PROMPT
        } else {
            STANDARD_SYSTEM_PROMPT
        };

        Self {
            accessibility_mode,
            turns: vec![ChatTurn::system(template)],
        }
    }

    /// 会话的无障碍模式（创建后不可变）
    pub fn accessibility_mode(&self) -> bool {
        self.accessibility_mode
    }

    /// 有序轮次序列
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// 轮次数量
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }
}

/// 辅导会话流程
///
/// - 编排完整的提问流程
/// - 决定何时追加轮次、何时回滚
/// - 只依赖业务能力（LlmService）
pub struct TutorEngine {
    llm_service: LlmService,
}

impl TutorEngine {
    /// 创建新的辅导流程
    pub fn new(config: &Config) -> Self {
        Self {
            llm_service: LlmService::new(config),
        }
    }

    /// 处理一次提问
    ///
    /// 成功时把 user 轮与 assistant 轮一起追加进会话并返回回复文本；
    /// 失败时回滚刚追加的 user 轮并上报上游错误，会话轮次数与调用前
    /// 完全一致。
    pub async fn ask(&self, session: &mut TutorSession, question: &str) -> AppResult<String> {
        session.turns.push(ChatTurn::user(question));

        match self.llm_service.send_chat(&session.turns).await {
            Ok(reply) => {
                session.turns.push(ChatTurn::assistant(reply.clone()));
                info!(
                    "✓ 辅导回复已生成 (无障碍模式: {}, 轮次: {})",
                    session.accessibility_mode,
                    session.turns.len()
                );
                Ok(reply)
            }
            Err(e) => {
                // 回滚刚追加的 user 轮，保证下次提问时会话状态一致
                session.turns.pop();
                warn!("⚠️ 辅导调用失败，已回滚本轮提问: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_start_seeds_exactly_one_system_turn() {
        let session = TutorSession::start(false);

        assert_eq!(session.turn_count(), 1);
        assert_eq!(session.turns()[0].role, ChatRole::System);
        assert_eq!(session.turns()[0].content, STANDARD_SYSTEM_PROMPT);
    }

    #[test]
    fn test_accessibility_mode_selects_blind_template() {
        let session = TutorSession::start(true);

        assert!(session.accessibility_mode());
        assert_eq!(session.turns()[0].content, BLIND_SYSTEM_PROMPT);
    }

    #[test]
    fn test_templates_are_distinct_and_static() {
        assert_ne!(STANDARD_SYSTEM_PROMPT, BLIND_SYSTEM_PROMPT);
        assert!(!STANDARD_SYSTEM_PROMPT.is_empty());
        assert!(!BLIND_SYSTEM_PROMPT.is_empty());
    }

    #[test]
    fn test_blind_template_is_symbol_free() {
        // 无障碍模板本身不得出现算术符号或表情分节符，
        // 算术必须以全词形式示范
        assert!(!BLIND_SYSTEM_PROMPT.contains('+'));
        assert!(!BLIND_SYSTEM_PROMPT.contains('='));
        assert!(!BLIND_SYSTEM_PROMPT.contains('📌'));
        assert!(!BLIND_SYSTEM_PROMPT.contains("---"));
        assert!(BLIND_SYSTEM_PROMPT.contains("plus"));
        assert!(BLIND_SYSTEM_PROMPT.contains("equals"));
    }

    #[tokio::test]
    async fn test_failed_ask_rolls_back_user_turn() {
        // 指向无监听端口，调用必然失败
        let config = Config {
            llm_api_base_url: "http://127.0.0.1:9/v1".to_string(),
            llm_api_key: "test-key".to_string(),
            ..Config::default()
        };
        let engine = TutorEngine::new(&config);
        let mut session = TutorSession::start(true);
        let before = session.turn_count();

        let result = engine.ask(&mut session, "What is 2 plus 3?").await;

        assert!(matches!(result, Err(AppError::Upstream(_))));
        assert_eq!(session.turn_count(), before);
        assert_eq!(session.turns()[0].role, ChatRole::System);
    }
}
