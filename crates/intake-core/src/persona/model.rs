//! Persona domain model.

use crate::catalog::FamilyOption;
use serde::{Deserialize, Serialize};

/// The target user segment being researched in a session.
///
/// Created empty together with its session and filled in by the setup step.
/// Later rounds read it but never re-validate it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Persona {
    /// Age bracket derived from the chosen family option (e.g. "30-40")
    pub age_group: String,
    /// Full family-structure label as displayed to the researcher
    pub family_structure: String,
    /// How often the segment travels
    pub travel_frequency: String,
    /// Knowledge level about automated driving
    pub ad_knowledge: String,
    /// Acceptance level of automated driving
    pub ad_acceptance: String,
    /// Selected emotional-need tags
    pub emotional_needs: Vec<String>,
    /// Selected social-need tags
    pub social_needs: Vec<String>,
}

impl Persona {
    /// Applies a family option, setting both the label and the derived age group.
    pub fn select_family(&mut self, option: &FamilyOption) {
        self.family_structure = option.label.to_string();
        self.age_group = option.age_group.to_string();
    }

    /// Whether the family structure has been chosen.
    ///
    /// The step gate uses this as the completion proxy for the whole setup step.
    pub fn has_family_structure(&self) -> bool {
        !self.family_structure.trim().is_empty()
    }

    /// Whether every field required to leave the setup step is filled.
    pub fn is_complete(&self) -> bool {
        self.has_family_structure()
            && !self.travel_frequency.trim().is_empty()
            && !self.ad_knowledge.trim().is_empty()
            && !self.ad_acceptance.trim().is_empty()
            && !self.emotional_needs.is_empty()
            && !self.social_needs.is_empty()
    }

    /// Toggles an emotional-need tag.
    pub fn toggle_emotional_need(&mut self, tag: &str) {
        toggle(&mut self.emotional_needs, tag);
    }

    /// Toggles a social-need tag.
    pub fn toggle_social_need(&mut self, tag: &str) {
        toggle(&mut self.social_needs, tag);
    }

    /// Short one-line label for session lists.
    pub fn headline(&self) -> Option<String> {
        if self.age_group.is_empty() {
            return None;
        }
        Some(format!("{} / {}", self.age_group, self.family_structure))
    }
}

pub(crate) fn toggle(list: &mut Vec<String>, item: &str) {
    if let Some(pos) = list.iter().position(|existing| existing == item) {
        list.remove(pos);
    } else {
        list.push(item.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FAMILY_OPTIONS;

    fn complete_persona() -> Persona {
        let mut persona = Persona::default();
        persona.select_family(&FAMILY_OPTIONS[1]);
        persona.travel_frequency = "中（每周有一定次数的出行）".to_string();
        persona.ad_knowledge = "了解".to_string();
        persona.ad_acceptance = "愿意尝试".to_string();
        persona.toggle_emotional_need("安心");
        persona.toggle_social_need("群体归属");
        persona
    }

    #[test]
    fn test_empty_persona_is_incomplete() {
        let persona = Persona::default();
        assert!(!persona.has_family_structure());
        assert!(!persona.is_complete());
        assert_eq!(persona.headline(), None);
    }

    #[test]
    fn test_select_family_sets_age_group() {
        let persona = complete_persona();
        assert_eq!(persona.family_structure, "年轻小家庭2+1儿童（大致年龄30-40）");
        assert_eq!(persona.age_group, "30-40");
        assert!(persona.is_complete());
    }

    #[test]
    fn test_toggle_needs() {
        let mut persona = complete_persona();
        persona.toggle_emotional_need("安心");
        assert!(persona.emotional_needs.is_empty());
        assert!(!persona.is_complete());
        assert!(persona.has_family_structure());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(complete_persona()).unwrap();
        assert!(json.get("familyStructure").is_some());
        assert!(json.get("emotionalNeeds").is_some());
    }
}
