use serde::{Deserialize, Serialize};

/// Raw struct deserilized from yaml
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    pub r#type: String,
    #[serde(default)]
    pub is_calculated: bool,
    pub value: Option<f64>,
    pub initial_value: Option<f64>,
    #[serde(default)]
    pub linked_categories: Vec<Link>,
    pub linked_keywords: Option<String>,
    pub max_value: Option<f64>,
}

/// Either a bare category name or a full governance rule
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Link {
    Name(String),
    Rule {
        name: String,
        cap: Option<f64>,
        period: Option<String>,
    },
}

impl Link {
    pub fn name(&self) -> &str {
        match self {
            Link::Name(name) => name,
            Link::Rule { name, .. } => name,
        }
    }
}
