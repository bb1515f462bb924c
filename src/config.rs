use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PLACEHOLDER: char = ' ';

pub const MASK_ATTRIBUTE: &str = "mask";
pub const PLACEHOLDER_ATTRIBUTE: &str = "placeholder";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid YAML mask configuration")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON mask configuration")]
    Json(#[from] serde_json::Error),
}

/// Declarative options of a masked field, as found in a style/attribute bag.
///
/// Unrecognized attributes are ignored, so a bag shared with other widget
/// options can be passed as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MaskAttributes {
    /// Mask pattern: `9` digit, `A` letter, `*` letter or digit, `?` any,
    /// `\` escapes the next character.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
    /// Placeholder glyph. Only the first character is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl MaskAttributes {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Reads the recognized options from an ordered attribute bag. When a key
    /// repeats, the last occurrence wins.
    pub fn from_attributes(attributes: &IndexMap<String, String>) -> Self {
        let mut out = Self::default();
        for (key, value) in attributes {
            match key.as_str() {
                MASK_ATTRIBUTE => out.mask = Some(value.clone()),
                PLACEHOLDER_ATTRIBUTE => out.placeholder = Some(value.clone()),
                other => tracing::trace!(attribute = other, "ignoring attribute"),
            }
        }
        out
    }

    pub fn placeholder_char(&self) -> Option<char> {
        self.placeholder
            .as_deref()
            .and_then(|value| value.chars().next())
    }
}

/// JSON schema of [`MaskAttributes`].
pub fn attributes_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(MaskAttributes)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskConfig {
    pub mask: String,
    pub placeholder: char,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            mask: String::new(),
            placeholder: DEFAULT_PLACEHOLDER,
        }
    }
}

impl MaskConfig {
    pub fn new(mask: impl Into<String>, placeholder: char) -> Self {
        Self {
            mask: mask.into(),
            placeholder,
        }
    }

    /// Combines explicit constructor arguments with an attribute bag.
    ///
    /// The attribute mask applies only when `mask` is empty. The attribute
    /// placeholder applies only when `placeholder` is the default glyph and
    /// the attribute is non-empty.
    pub fn resolve(mask: &str, placeholder: char, attributes: &MaskAttributes) -> Self {
        let mask = match attributes.mask.as_deref() {
            Some(from_attr) if mask.is_empty() => from_attr.to_string(),
            _ => mask.to_string(),
        };
        let placeholder = match attributes.placeholder_char() {
            Some(from_attr) if placeholder == DEFAULT_PLACEHOLDER => from_attr,
            _ => placeholder,
        };
        Self { mask, placeholder }
    }

    pub fn from_attributes(attributes: &MaskAttributes) -> Self {
        Self::resolve("", DEFAULT_PLACEHOLDER, attributes)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        MaskAttributes::from_yaml_str(source).map(|attributes| Self::from_attributes(&attributes))
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        MaskAttributes::from_json_str(source).map(|attributes| Self::from_attributes(&attributes))
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DEFAULT_PLACEHOLDER, MaskAttributes, MaskConfig, attributes_schema};
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    #[test]
    fn yaml_config_reads_mask_and_placeholder() {
        let config = MaskConfig::from_yaml_str("mask: \"(999) 999-9999\"\nplaceholder: \"_\"\n")
            .expect("config should parse");
        assert_eq!(config, MaskConfig::new("(999) 999-9999", '_'));
    }

    #[test]
    fn json_config_defaults_placeholder() {
        let config = MaskConfig::from_json_str(r#"{"mask": "99/99"}"#).expect("config");
        assert_eq!(config.placeholder, DEFAULT_PLACEHOLDER);
        assert_eq!(config.mask, "99/99");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config =
            MaskConfig::from_yaml_str("hint: Phone\nmask: \"9-9\"\n").expect("config should parse");
        assert_eq!(config.mask, "9-9");
    }

    #[test]
    fn malformed_sources_report_their_format() {
        let yaml = MaskConfig::from_yaml_str("mask: [unterminated");
        assert!(matches!(yaml, Err(ConfigError::Yaml(_))));

        let json = MaskConfig::from_json_str("{\"mask\": 9");
        assert!(matches!(json, Err(ConfigError::Json(_))));
    }

    #[test]
    fn explicit_mask_wins_over_attribute() {
        let attributes = MaskAttributes {
            mask: Some("AAA".to_string()),
            placeholder: None,
        };
        assert_eq!(MaskConfig::resolve("999", ' ', &attributes).mask, "999");
        assert_eq!(MaskConfig::resolve("", ' ', &attributes).mask, "AAA");
    }

    #[test]
    fn attribute_placeholder_applies_only_over_default() {
        let attributes = MaskAttributes {
            mask: None,
            placeholder: Some("#x".to_string()),
        };
        assert_eq!(MaskConfig::resolve("9", ' ', &attributes).placeholder, '#');
        assert_eq!(MaskConfig::resolve("9", '*', &attributes).placeholder, '*');

        let empty = MaskAttributes {
            mask: None,
            placeholder: Some(String::new()),
        };
        assert_eq!(MaskConfig::resolve("9", ' ', &empty).placeholder, ' ');
    }

    #[test]
    fn attribute_bag_keeps_recognized_keys() {
        let mut bag = IndexMap::<String, String>::new();
        bag.insert("textColor".to_string(), "red".to_string());
        bag.insert("mask".to_string(), "AA-99".to_string());
        bag.insert("placeholder".to_string(), "_".to_string());

        let attributes = MaskAttributes::from_attributes(&bag);
        assert_eq!(attributes.mask.as_deref(), Some("AA-99"));
        assert_eq!(attributes.placeholder_char(), Some('_'));
    }

    #[test]
    fn schema_lists_both_options() {
        let schema = attributes_schema();
        let object = schema.schema.object.expect("object schema");
        assert!(object.properties.contains_key("mask"));
        assert!(object.properties.contains_key("placeholder"));
    }
}
