//! Option catalog: static reference data for select-style parameters.
//!
//! The catalog holds the generation models and the option lists (styles,
//! moods, tempos, durations, voices) that the parameter registry draws from.
//! It is built once by the caller and read through shared references.

use serde::{Deserialize, Serialize};

use crate::tier::Tier;

/// The value carried by an option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Integer(i64),
    Text(String),
}

impl OptionValue {
    /// Returns the value as a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            OptionValue::Integer(n) => serde_json::Value::from(*n),
            OptionValue::Text(s) => serde_json::Value::from(s.as_str()),
        }
    }

    /// Returns true if this option equals the given form value.
    ///
    /// Numeric options also match their decimal text and numeric text options
    /// match the number, so `15` and `"15"` pick the same option.
    pub fn matches(&self, value: &serde_json::Value) -> bool {
        match (self, value) {
            (OptionValue::Integer(n), serde_json::Value::Number(v)) => v.as_i64() == Some(*n),
            (OptionValue::Integer(n), serde_json::Value::String(v)) => {
                v.parse::<i64>().ok() == Some(*n)
            }
            (OptionValue::Text(s), serde_json::Value::String(v)) => s == v,
            (OptionValue::Text(s), serde_json::Value::Number(v)) => v.to_string() == *s,
            _ => false,
        }
    }
}

impl std::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionValue::Integer(n) => write!(f, "{}", n),
            OptionValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(s.to_string())
    }
}

impl From<i64> for OptionValue {
    fn from(n: i64) -> Self {
        OptionValue::Integer(n)
    }
}

/// One selectable choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    pub value: OptionValue,
    pub label: String,
    /// Lowest tier allowed to pick this option. `None` means everyone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligible_from: Option<Tier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tempo options only, e.g. "90-120".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpm_range: Option<String>,
}

impl OptionItem {
    /// Creates an option open to every tier.
    pub fn new(value: impl Into<OptionValue>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            eligible_from: None,
            description: None,
            bpm_range: None,
        }
    }

    /// Restricts the option to `tier` and above.
    pub fn eligible_from(mut self, tier: Tier) -> Self {
        self.eligible_from = Some(tier);
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the BPM range.
    pub fn bpm_range(mut self, range: impl Into<String>) -> Self {
        self.bpm_range = Some(range.into());
        self
    }

    /// Returns true if a user on `tier` may pick this option.
    pub fn is_available_to(&self, tier: Tier) -> bool {
        self.eligible_from.map_or(true, |min| tier >= min)
    }
}

/// A generation model offered to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub id: String,
    pub name: String,
    pub description: String,
    pub minimum_tier: Tier,
}

impl ModelSpec {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        minimum_tier: Tier,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            minimum_tier,
        }
    }

    /// Converts the model into a select option.
    pub fn to_option(&self) -> OptionItem {
        let mut option = OptionItem::new(self.id.as_str(), self.name.as_str())
            .description(self.description.as_str());
        if self.minimum_tier > Tier::Free {
            option = option.eligible_from(self.minimum_tier);
        }
        option
    }
}

/// The read-only option catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub models: Vec<ModelSpec>,
    pub styles: Vec<OptionItem>,
    pub moods: Vec<OptionItem>,
    pub tempos: Vec<OptionItem>,
    pub durations: Vec<OptionItem>,
    pub voices: Vec<OptionItem>,
}

impl Catalog {
    /// Returns the catalog shipped with the product.
    pub fn builtin() -> Self {
        Self {
            models: vec![
                ModelSpec::new(
                    "Chirp v4.0",
                    "Chirp v4.0",
                    "Catchy pop melodies for short videos and social media",
                    Tier::Free,
                ),
                ModelSpec::new(
                    "Chirp v4.5",
                    "Chirp v4.5",
                    "Classical and orchestral scoring for film and commercial work",
                    Tier::Standard,
                ),
                ModelSpec::new(
                    "Chirp v5.0",
                    "Chirp v5.0",
                    "Authentic jazz with strong improvisation",
                    Tier::Standard,
                ),
                ModelSpec::new(
                    "Chirp v5.5",
                    "Chirp v5.5",
                    "Warm country and folk arrangements",
                    Tier::Premium,
                ),
            ],
            styles: vec![
                OptionItem::new("pop", "Pop"),
                OptionItem::new("classical", "Classical"),
                OptionItem::new("jazz", "Jazz"),
                OptionItem::new("rock", "Rock"),
                OptionItem::new("electronic", "Electronic"),
                OptionItem::new("country", "Country"),
                OptionItem::new("folk", "Folk"),
            ],
            moods: vec![
                OptionItem::new("happy", "Happy"),
                OptionItem::new("sad", "Sad"),
                OptionItem::new("exciting", "Exciting"),
                OptionItem::new("calm", "Calm"),
                OptionItem::new("mysterious", "Mysterious"),
                OptionItem::new("inspiring", "Inspiring"),
                OptionItem::new("romantic", "Romantic"),
            ],
            tempos: vec![
                OptionItem::new("slow", "Slow").bpm_range("60-90"),
                OptionItem::new("medium", "Medium").bpm_range("90-120"),
                OptionItem::new("fast", "Fast").bpm_range("120-160"),
            ],
            durations: vec![
                OptionItem::new("15", "15 seconds"),
                OptionItem::new("30", "30 seconds"),
                OptionItem::new("60", "60 seconds").eligible_from(Tier::Standard),
                OptionItem::new("120", "120 seconds").eligible_from(Tier::Standard),
                OptionItem::new("180", "180 seconds").eligible_from(Tier::Standard),
            ],
            voices: vec![
                OptionItem::new("random", "Random"),
                OptionItem::new("male", "Male"),
                OptionItem::new("female", "Female"),
            ],
        }
    }

    /// Looks up a model by id.
    pub fn model(&self, id: &str) -> Option<&ModelSpec> {
        self.models.iter().find(|m| m.id == id)
    }

    /// Returns the models a user on `tier` may select.
    pub fn models_for_tier(&self, tier: Tier) -> impl Iterator<Item = &ModelSpec> {
        self.models.iter().filter(move |m| tier >= m.minimum_tier)
    }

    /// Returns the durations a user on `tier` may select.
    pub fn durations_for_tier(&self, tier: Tier) -> impl Iterator<Item = &OptionItem> {
        self.durations
            .iter()
            .filter(move |d| d.is_available_to(tier))
    }

    /// Returns the model list as select options.
    pub fn model_options(&self) -> Vec<OptionItem> {
        self.models.iter().map(ModelSpec::to_option).collect()
    }

    /// Returns the id of the first model, used as the form default.
    pub fn default_model_id(&self) -> Option<&str> {
        self.models.first().map(|m| m.id.as_str())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Looks up an option by value in an option list.
pub fn find_option<'a>(
    options: &'a [OptionItem],
    value: &serde_json::Value,
) -> Option<&'a OptionItem> {
    options.iter().find(|o| o.value.matches(value))
}
