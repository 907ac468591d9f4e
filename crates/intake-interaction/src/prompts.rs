//! Prompt templates for the generative service.

use intake_core::generation::{CONFIG_BATCH_SIZE, ConceptRequest};
use intake_core::persona::Persona;
use intake_core::report::SessionReport;
use intake_core::round::RoundKind;
use intake_core::session::Session;
use intake_core::{IntakeError, Result};
use minijinja::{Environment, Value, context};

const FUNCTIONAL_CONFIGS: &str = r#"你是一位资深的未来汽车用户体验研究专家。
基于以下用户画像和感性需求，生成 {{ count }} 个最具创新性的功能配置。

【用户画像】
- 年龄段/家庭: {{ persona.familyStructure }}
- 出行频率: {{ persona.travelFrequency }}
- 自动驾驶认知: {{ persona.adKnowledge }}
- 自动驾驶接受度: {{ persona.adAcceptance }}
- 核心情绪需求: {{ persona.emotionalNeeds | join(", ") }}
- 社会意涵: {{ persona.socialNeeds | join(", ") }}

【功能感性关键词】
{{ keywords | join(", ") }}

【要求】
1. 生成 {{ count }} 个配置。
2. 每个配置包含：
   - 标题 (title): 不超过10个字，言简意赅。
   - 说明 (description): 不超过20个字，描述核心价值。
3. 输出必须是 JSON 数组，元素形如 {"title": "...", "description": "..."}。
"#;

const INTERACTION_CONFIGS: &str = r#"你是一位资深的未来汽车交互设计专家。
基于以下用户画像和交互感性词，生成 {{ count }} 个创新的交互体验配置。

【用户画像】
- 家庭结构: {{ persona.familyStructure }}
- 出行频率: {{ persona.travelFrequency }}
- 认知: {{ persona.adKnowledge }}
- 接受度: {{ persona.adAcceptance }}
- 情绪需求: {{ persona.emotionalNeeds | join(", ") }}

【交互感性关键词】
{{ keywords | join(", ") }}

【要求】
1. 生成 {{ count }} 个配置。
2. 每个配置包含：
   - 标题 (title): 不超过10个字 (例如: "沉浸式光场", "透明驾驶解释")。
   - 说明 (description): 不超过20个字。
3. 输出必须是 JSON 数组，元素形如 {"title": "...", "description": "..."}。
"#;

const INTERIOR_CONCEPT: &str = r#"Design a futuristic autonomous car interior (Concept Art).

Target User: {{ request.persona.familyStructure }}.
Context: Frequent use ({{ request.persona.travelFrequency }}), Acceptance: {{ request.persona.adAcceptance }}.
Mood: {{ request.persona.emotionalNeeds | join(", ") }}.
Style Description: {{ request.style_description }}.

Key Features to Visualize:
{% if request.functional_features %}Functional Features: {{ request.functional_features | join(", ") }}{% else %}Smart Cabin features{% endif %}
{% if request.interaction_features %}Interaction Features: {{ request.interaction_features | join(", ") }}{% else %}Immersive Experience{% endif %}

Camera and composition (follow exactly, ignore the reference image angle):
1. Perspective: wide-angle high-angle shot.
2. Angle: from above, diagonally downwards, giving an overview of the cabin.
3. Camera position: above the rear right seat, looking forward through the front seats.
4. Depth of field: everything in focus.
5. Interior only: no exterior body shell, wheels or street.
6. Windows: abstract soft light or gradients only.

Visual style: photorealistic, futuristic rendering, 16:9, cinematic lighting.
"#;

const SESSION_SUMMARY: &str = r#"请为本次未来汽车体验研究 Session 撰写一份专业的总结报告。

【用户数据】
家庭结构: {{ report.family_structure }}
出行频率: {{ report.travel_frequency }}
自动驾驶认知: {{ report.ad_knowledge }}
自动驾驶接受度: {{ report.ad_acceptance }}
核心需求: {{ report.emotional_needs | join(", ") }}{% if report.social_needs %}, {{ report.social_needs | join(", ") }}{% endif %}

【Round 1: 功能需求】
选择配置: {% for option in report.functional_choices %}{{ option.title }} ({{ option.description }}){% if not loop.last %}; {% endif %}{% else %}无{% endfor %}
用户备注: {{ report.functional_comment }}

【Round 2: 交互体验】
选择配置: {% for option in report.interaction_choices %}{{ option.title }} ({{ option.description }}){% if not loop.last %}; {% endif %}{% else %}无{% endfor %}
用户备注: {{ report.interaction_comment }}

【Round 3: 设计偏好】
风格描述: {{ report.style_description }}
评价:
{% for row in report.evaluation -%}
- {{ row.category }}:
  - 喜欢的点: {{ row.liked or "未填写" }}
  - 不喜欢的点: {{ row.disliked or "未填写" }}
{% endfor %}
【任务】
请输出一段约 300-400 字的总结，包含：
1. 用户画像与核心痛点分析
2. 功能偏好与场景亮点总结
3. 交互体验模式洞察
4. 视觉设计风格与改进建议

语气专业、客观、有洞察力。仅输出纯文本，不要 markdown 格式。
"#;

fn render(name: &str, source: &str, ctx: Value) -> Result<String> {
    let mut env = Environment::new();
    env.add_template(name, source)
        .map_err(|e| IntakeError::internal(format!("Invalid prompt template '{}': {}", name, e)))?;
    env.get_template(name)
        .and_then(|template| template.render(ctx))
        .map_err(|e| IntakeError::internal(format!("Failed to render prompt '{}': {}", name, e)))
}

/// Prompt asking for a batch of option candidates for `kind`.
pub fn config_prompt(kind: RoundKind, persona: &Persona, keywords: &[String]) -> Result<String> {
    let (name, source) = match kind {
        RoundKind::Functional => ("functional_configs", FUNCTIONAL_CONFIGS),
        RoundKind::Interaction => ("interaction_configs", INTERACTION_CONFIGS),
    };
    render(
        name,
        source,
        context! {
            persona => persona,
            keywords => keywords,
            count => CONFIG_BATCH_SIZE,
        },
    )
}

pub fn concept_prompt(request: &ConceptRequest) -> Result<String> {
    render("interior_concept", INTERIOR_CONCEPT, context! { request => request })
}

pub fn summary_prompt(session: &Session) -> Result<String> {
    let report = SessionReport::from_session(session);
    render("session_summary", SESSION_SUMMARY, context! { report => report })
}
