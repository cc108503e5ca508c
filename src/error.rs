use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

#[derive(Debug, Eq, PartialEq)]
pub enum StatementError {
    EmptyConditionValues(String),
    InvalidAccessLevel(String),
    InvalidActionPattern(String),
    InvalidArnTemplate(String),
    InvalidConditionKey(String),
    InvalidConditionOperator(String),
    InvalidEffect(String),
    InvalidPolicyVersion(String),
    NoServiceCatalogue(String),
    UnknownResourceType {
        service: String,
        resource_type: String,
    },
    UnresolvedPlaceholder {
        template: String,
        placeholder: String,
    },
}

impl Display for StatementError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::EmptyConditionValues(key) => write!(f, "Empty condition values for key: {}", key),
            Self::InvalidAccessLevel(level) => write!(f, "Invalid access level: {}", level),
            Self::InvalidActionPattern(pattern) => write!(f, "Invalid action pattern: {}", pattern),
            Self::InvalidArnTemplate(template) => write!(f, "Invalid ARN template: {}", template),
            Self::InvalidConditionKey(key) => write!(f, "Invalid condition key: {}", key),
            Self::InvalidConditionOperator(operator) => write!(f, "Invalid condition operator: {}", operator),
            Self::InvalidEffect(effect) => write!(f, "Invalid effect: {}", effect),
            Self::InvalidPolicyVersion(version) => write!(f, "Invalid policy version: {}", version),
            Self::NoServiceCatalogue(operation) => write!(f, "No service catalogue available for {}", operation),
            Self::UnknownResourceType {
                service,
                resource_type,
            } => write!(f, "Unknown resource type for service {}: {}", service, resource_type),
            Self::UnresolvedPlaceholder {
                template,
                placeholder,
            } => write!(f, "Unresolved placeholder ${{{}}} in ARN template: {}", placeholder, template),
        }
    }
}

impl Error for StatementError {}
