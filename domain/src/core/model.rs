//! Model value object representing a completion model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Completion models known by name (Value Object)
///
/// Anything else is carried through verbatim as [`Model::Custom`], so any
/// OpenAI-compatible endpoint can be targeted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    Gpt4oMini,
    Gpt4o,
    Gpt41,
    Gpt41Mini,
    Gpt41Nano,
    Custom(String),
}

impl Model {
    /// Get the string identifier sent to the endpoint
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gpt4oMini => "gpt-4o-mini",
            Model::Gpt4o => "gpt-4o",
            Model::Gpt41 => "gpt-4.1",
            Model::Gpt41Mini => "gpt-4.1-mini",
            Model::Gpt41Nano => "gpt-4.1-nano",
            Model::Custom(s) => s,
        }
    }

    /// Check if this is a model outside the built-in list
    pub fn is_custom(&self) -> bool {
        matches!(self, Model::Custom(_))
    }
}

impl Default for Model {
    /// Returns the default model (gpt-4o-mini)
    fn default() -> Self {
        Model::Gpt4oMini
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "gpt-4o-mini" => Model::Gpt4oMini,
            "gpt-4o" => Model::Gpt4o,
            "gpt-4.1" => Model::Gpt41,
            "gpt-4.1-mini" => Model::Gpt41Mini,
            "gpt-4.1-nano" => Model::Gpt41Nano,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let Ok(model) = s.parse::<Model>();
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        for model in [Model::Gpt4oMini, Model::Gpt4o, Model::Gpt41] {
            let parsed: Model = model.to_string().parse().unwrap();
            assert_eq!(model, parsed);
        }
    }

    #[test]
    fn test_custom_model() {
        let model: Model = "llama-3.1-70b".parse().unwrap();
        assert_eq!(model, Model::Custom("llama-3.1-70b".to_string()));
        assert!(model.is_custom());
        assert_eq!(model.to_string(), "llama-3.1-70b");
    }

    #[test]
    fn test_model_default() {
        assert_eq!(Model::default(), Model::Gpt4oMini);
        assert_eq!(Model::default().as_str(), "gpt-4o-mini");
    }

    #[test]
    fn test_model_serde_as_string() {
        let json = serde_json::to_string(&Model::Gpt4o).unwrap();
        assert_eq!(json, "\"gpt-4o\"");
        let back: Model = serde_json::from_str("\"gpt-4.1-mini\"").unwrap();
        assert_eq!(back, Model::Gpt41Mini);
    }
}
