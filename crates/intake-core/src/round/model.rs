//! Option-selection rounds (round 1 and round 2).

use crate::persona::toggle;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which option-selection round a batch of options belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RoundKind {
    /// Round 1: functional needs
    Functional,
    /// Round 2: interaction preferences
    Interaction,
}

impl RoundKind {
    /// Prefix of locally generated option identifiers.
    pub fn id_prefix(self) -> &'static str {
        match self {
            RoundKind::Functional => "func",
            RoundKind::Interaction => "inter",
        }
    }
}

/// A single AI-suggested candidate answer.
///
/// Identifiers are generated locally from a timestamp and the position in
/// the batch, so they are only unique within one generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigOption {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl ConfigOption {
    pub fn new(id: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Payload of an option-selection round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoundData {
    /// Keywords the researcher picked before generating options
    pub selected_keywords: Vec<String>,
    /// Full candidate set, retained for the report
    pub generated_configs: Vec<ConfigOption>,
    /// Identifiers of the chosen candidates
    pub selected_config_ids: Vec<String>,
    /// Free-text comment
    pub comment: String,
}

impl RoundData {
    /// Whether at least one option is selected.
    ///
    /// The step gate uses this as the completion proxy for the round.
    pub fn has_selection(&self) -> bool {
        !self.selected_config_ids.is_empty()
    }

    /// Whether the round may be completed: one or more selections and a
    /// non-empty comment.
    pub fn can_proceed(&self) -> bool {
        self.has_selection() && !self.comment.trim().is_empty()
    }

    /// Keywords can no longer change once options exist for them.
    pub fn keywords_locked(&self) -> bool {
        !self.generated_configs.is_empty()
    }

    /// Toggles a keyword. Returns `false` when the keywords are locked.
    pub fn toggle_keyword(&mut self, keyword: &str) -> bool {
        if self.keywords_locked() {
            return false;
        }
        toggle(&mut self.selected_keywords, keyword);
        true
    }

    /// Replaces the candidate set wholesale and drops every selection.
    pub fn replace_options(&mut self, options: Vec<ConfigOption>) {
        self.generated_configs = options;
        self.selected_config_ids.clear();
    }

    /// Toggles the selection of a generated option.
    ///
    /// Returns `false` if no generated option carries `id`.
    pub fn toggle_selection(&mut self, id: &str) -> bool {
        if !self.generated_configs.iter().any(|option| option.id == id) {
            return false;
        }
        toggle(&mut self.selected_config_ids, id);
        true
    }

    /// The selected options, resolved against the generated set at read time.
    ///
    /// Selected identifiers with no matching option are skipped.
    pub fn selected_options(&self) -> Vec<&ConfigOption> {
        self.generated_configs
            .iter()
            .filter(|option| self.selected_config_ids.contains(&option.id))
            .collect()
    }

    /// Removes selected identifiers that do not refer to a generated option.
    ///
    /// Returns how many identifiers were dropped.
    pub fn prune_dangling_selections(&mut self) -> usize {
        let before = self.selected_config_ids.len();
        let generated = &self.generated_configs;
        self.selected_config_ids
            .retain(|id| generated.iter().any(|option| &option.id == id));
        before - self.selected_config_ids.len()
    }
}
