//! The visual concept round (round 3).

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// One of the four fixed evaluation categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum EvaluationCategory {
    Form,
    Proportion,
    Material,
    Color,
}

impl EvaluationCategory {
    /// Display label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            EvaluationCategory::Form => "形态感知",
            EvaluationCategory::Proportion => "比例分量",
            EvaluationCategory::Material => "材质触感",
            EvaluationCategory::Color => "色彩",
        }
    }
}

/// Liked / disliked notes for one category. Both are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationAspect {
    pub liked: String,
    pub disliked: String,
}

/// Researcher feedback on the selected concept image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Evaluation {
    pub form: EvaluationAspect,
    pub proportion: EvaluationAspect,
    pub material: EvaluationAspect,
    pub color: EvaluationAspect,
}

impl Evaluation {
    pub fn aspect(&self, category: EvaluationCategory) -> &EvaluationAspect {
        match category {
            EvaluationCategory::Form => &self.form,
            EvaluationCategory::Proportion => &self.proportion,
            EvaluationCategory::Material => &self.material,
            EvaluationCategory::Color => &self.color,
        }
    }

    pub fn aspect_mut(&mut self, category: EvaluationCategory) -> &mut EvaluationAspect {
        match category {
            EvaluationCategory::Form => &mut self.form,
            EvaluationCategory::Proportion => &mut self.proportion,
            EvaluationCategory::Material => &mut self.material,
            EvaluationCategory::Color => &mut self.color,
        }
    }
}

/// Payload of the visual concept round.
///
/// Images are stored as data URLs (`data:image/...;base64,...`) or plain
/// URLs. A generation request replaces `generated_images` as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Round3Data {
    pub style_description: String,
    #[serde(rename = "styleImageBase64")]
    pub style_image: Option<String>,
    pub generated_images: Vec<String>,
    pub selected_image_index: Option<usize>,
    pub evaluation: Evaluation,
}

impl Round3Data {
    /// Completion proxy used when resuming a session.
    pub fn has_selected_image(&self) -> bool {
        self.selected_image_index.is_some()
    }

    /// Whether the round can be finished: a selected index that points into
    /// the generated images.
    pub fn can_finish(&self) -> bool {
        self.selected_image_index
            .is_some_and(|index| index < self.generated_images.len())
    }

    /// Replaces the generated batch and resets the selection.
    pub fn replace_images(&mut self, images: Vec<String>) {
        self.generated_images = images;
        self.selected_image_index = None;
    }

    /// The image shown in the report: the selected one, else the first.
    pub fn final_image(&self) -> Option<&str> {
        self.generated_images
            .get(self.selected_image_index.unwrap_or(0))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_can_finish_requires_index_in_bounds() {
        let mut round = Round3Data::default();
        assert!(!round.can_finish());

        round.replace_images(vec!["https://img/1".into(), "https://img/2".into()]);
        round.selected_image_index = Some(2);
        assert!(round.has_selected_image());
        assert!(!round.can_finish());

        round.selected_image_index = Some(1);
        assert!(round.can_finish());
        assert_eq!(round.final_image(), Some("https://img/2"));
    }

    #[test]
    fn test_replace_images_resets_selection() {
        let mut round = Round3Data {
            generated_images: vec!["a".into()],
            selected_image_index: Some(0),
            ..Default::default()
        };
        round.replace_images(vec!["b".into(), "c".into()]);
        assert_eq!(round.selected_image_index, None);
        assert_eq!(round.final_image(), Some("b"));
    }

    #[test]
    fn test_evaluation_aspects() {
        let mut evaluation = Evaluation::default();
        evaluation.aspect_mut(EvaluationCategory::Color).liked = "暖色".to_string();
        assert_eq!(evaluation.color.liked, "暖色");
        assert_eq!(EvaluationCategory::iter().count(), 4);
        assert_eq!(EvaluationCategory::Material.label(), "材质触感");
    }

    #[test]
    fn test_style_image_field_name() {
        let round = Round3Data {
            style_image: Some("data:image/png;base64,AAAA".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&round).unwrap();
        assert!(json.get("styleImageBase64").is_some());
        assert!(json.get("selectedImageIndex").unwrap().is_null());
    }
}
