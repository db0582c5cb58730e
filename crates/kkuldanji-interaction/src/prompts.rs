//! Prompt wording for the two model calls.

use crate::error::AgentError;
use kkuldanji_core::source::FileExcerpt;
use minijinja::{Environment, context};

pub const GENERATION_SYSTEM_INSTRUCTION: &str = "당신은 한국 최고의 인수인계서 작성 전문가입니다. 모든 응답과 데이터는 반드시 정중하고 명확한 한국어로 작성하세요. 전문 용어 사용이 필요한 경우 한국어 표현을 우선시하세요.";

pub const CHAT_SYSTEM_INSTRUCTION: &str = "당신은 인수인계 도우미 '꿀단지'입니다. 무조건 한국어로만 답변하세요. 사용자가 질문하면 업로드된 파일의 내용을 바탕으로 친절하고 달콤하게 한국어로 답변하세요. 사내 보안 가이드를 준수하세요.";

const GENERATION_TEMPLATE_NAME: &str = "generate_report.txt";
const CHAT_TEMPLATE_NAME: &str = "chat.txt";

const GENERATION_TEMPLATE: &str = "\
제공된 자료를 분석하여 전문적인 인수인계서 데이터를 생성해줘.
중요: 모든 텍스트 데이터(이름, 직급, 과제명, 설명 등)는 반드시 '한국어'로 작성해야 해.
데이터가 부족하다면 파일 내용을 바탕으로 논리적으로 유추하여 풍부하게 채워넣어줘.

분석 대상 자료:
{% for file in files %}
[파일명: {{ file.name }}]
내용: {{ file.text }}
{% if not loop.last %}

{% endif %}
{% endfor %}
";

const CHAT_TEMPLATE: &str = "\
{% if files %}
분석 가능한 파일 컨텍스트:
{% for file in files %}
[{{ file.name }}]: {{ file.text }}
{% endfor %}
{% else %}
현재 참조할 수 있는 파일이 없습니다.
{% endif %}

사용자 질문: {{ message }}
";

/// Renders the user-turn text of both calls.
pub struct PromptRenderer {
    env: Environment<'static>,
}

impl PromptRenderer {
    pub fn new() -> Result<Self, AgentError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_template(GENERATION_TEMPLATE_NAME, GENERATION_TEMPLATE)?;
        env.add_template(CHAT_TEMPLATE_NAME, CHAT_TEMPLATE)?;
        Ok(Self { env })
    }

    /// The generation request: instructions followed by every excerpt.
    pub fn generation_prompt(&self, files: &[FileExcerpt]) -> Result<String, AgentError> {
        let template = self.env.get_template(GENERATION_TEMPLATE_NAME)?;
        Ok(template.render(context! { files => files })?)
    }

    /// The final chat turn: file context block and the user's question.
    pub fn chat_prompt(&self, message: &str, files: &[FileExcerpt]) -> Result<String, AgentError> {
        let template = self.env.get_template(CHAT_TEMPLATE_NAME)?;
        Ok(template.render(context! { files => files, message => message })?)
    }
}
