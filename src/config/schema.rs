use crate::output::Format;
use crate::query::Include;
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    pub parse_comments: bool,
    pub recursive: bool,
    pub format: Format,
    pub includes: Vec<String>,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            parse_comments: true,
            recursive: false,
            format: Format::Json,
            includes: vec!["func".to_string()],
        }
    }
}

impl MotionConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        for (index, name) in self.includes.iter().enumerate() {
            if name.trim().is_empty() {
                issues.push(ValidationIssue::EmptyInclude { index });
            } else if Include::parse(name).is_none() {
                issues.push(ValidationIssue::UnknownInclude { name: name.clone() });
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    EmptyInclude { index: usize },
    UnknownInclude { name: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyInclude { index } => {
                write!(f, "includes[{index}] is empty")
            }
            ValidationIssue::UnknownInclude { name } => {
                write!(f, "unknown include '{name}', expected 'type' or 'func'")
            }
        }
    }
}
