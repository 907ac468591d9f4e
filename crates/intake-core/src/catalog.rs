//! Fixed option catalogs offered by the wizard.
//!
//! These are the choices presented to the researcher at each step. The
//! wizard never validates answers against them; they only seed the UI.

/// A family-structure choice and the age bracket it implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyOption {
    pub label: &'static str,
    pub age_group: &'static str,
    pub structure: &'static str,
}

pub const FAMILY_OPTIONS: [FamilyOption; 4] = [
    FamilyOption {
        label: "未婚人群（大致年龄20-30）",
        age_group: "20-30",
        structure: "未婚人群",
    },
    FamilyOption {
        label: "年轻小家庭2+1儿童（大致年龄30-40）",
        age_group: "30-40",
        structure: "年轻小家庭(2+1)",
    },
    FamilyOption {
        label: "扩展家庭3+2老人（大致年龄40-50）",
        age_group: "40-50",
        structure: "扩展家庭(3+2)",
    },
    FamilyOption {
        label: "新老年人（大致年龄50-60）",
        age_group: "50-60",
        structure: "新老年人",
    },
];

pub const TRAVEL_FREQUENCY_OPTIONS: [&str; 3] = [
    "低（每周出行频率次数少）",
    "中（每周有一定次数的出行）",
    "高（几乎每天都有出行）",
];

pub const EMOTIONAL_NEEDS: [&str; 7] = ["兴奋", "欣喜", "快乐", "满足", "安心", "放松", "信任"];

pub const SOCIAL_NEEDS: [&str; 7] = [
    "身份认同",
    "个性表达",
    "群体归属",
    "社会尊重",
    "自信",
    "天然无修饰",
    "手工匠心",
];

/// Functional keywords offered in round 1.
pub const ROUND1_KEYWORDS: [&str; 8] = ["安全", "舒适", "稳定", "灵活", "趣味", "自由", "省心", "贴心"];

/// An interaction keyword with its explanatory subtext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordHint {
    pub label: &'static str,
    pub subtext: &'static str,
}

/// A themed group of round-2 keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordCategory {
    pub title: &'static str,
    pub keywords: &'static [KeywordHint],
}

const fn hint(label: &'static str, subtext: &'static str) -> KeywordHint {
    KeywordHint { label, subtext }
}

/// Interaction keyword categories offered in round 2.
pub const ROUND2_CATEGORIES: [KeywordCategory; 4] = [
    KeywordCategory {
        title: "未来反馈体验",
        keywords: &[
            hint("即时", "操作后立即反馈"),
            hint("温和", "反馈柔和不突兀"),
            hint("多模态", "声光触协同提示"),
            hint("细腻", "反馈精细更柔和"),
        ],
    },
    KeywordCategory {
        title: "隐私与边界体验",
        keywords: &[
            hint("包裹", "空间围合提升安全感"),
            hint("隔绝", "减少外界干扰刺激"),
            hint("半开放", "隐私与开放的平衡"),
            hint("柔性边界", "灯光结构构成可变边界"),
        ],
    },
    KeywordCategory {
        title: "情境与模式体验",
        keywords: &[
            hint("沉浸", "空间完全沉入情境"),
            hint("情境切换", "空间适应多生活场景"),
            hint("模式转场", "休息办公观影自由切换"),
            hint("环境联动", "光/香/座椅联动变化"),
        ],
    },
    KeywordCategory {
        title: "预见与自适应体验",
        keywords: &[
            hint("预见性", "提前判断用户需求"),
            hint("自适应", "交互自动调整方式"),
            hint("主动引导", "主动提示下一步动作"),
            hint("透明决策", "解释系统的决策逻辑"),
            hint("不干扰", "只在必要时触达"),
            hint("包容性", "适应不同用户能力"),
        ],
    },
];

/// Looks up a family option by its display label.
pub fn family_option(label: &str) -> Option<&'static FamilyOption> {
    FAMILY_OPTIONS.iter().find(|option| option.label == label)
}

/// Iterates every round-2 keyword label across categories.
pub fn round2_keywords() -> impl Iterator<Item = &'static str> {
    ROUND2_CATEGORIES
        .iter()
        .flat_map(|category| category.keywords.iter().map(|k| k.label))
}
