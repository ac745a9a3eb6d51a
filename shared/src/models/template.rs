//! Message template models

use serde::{Deserialize, Serialize};

/// Which template an update targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    #[default]
    Password,
    Birthday,
}

impl TemplateKind {
    /// Placeholders that must appear in a template of this kind
    pub fn required_placeholders(&self) -> &'static [&'static str] {
        match self {
            Self::Password => &["{membership_id}", "{password}"],
            Self::Birthday => &["{name}"],
        }
    }
}

/// `POST /update-template` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateUpdate {
    pub template: Option<String>,
    #[serde(default)]
    pub kind: TemplateKind,
}

/// Current templates as returned by `GET /template`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSet {
    pub password: String,
    pub birthday: String,
}
