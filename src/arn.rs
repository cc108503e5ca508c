//! Resolution of catalogue ARN templates into concrete resource ARNs.
//!
//! Catalogue templates look like `arn:${Partition}:memorydb:${Region}:${Account}:acl/${AclName}`. The `Partition`,
//! `Region`, and `Account` (or `AccountId`) placeholders fall back to the configured [ArnDefaults]; every other
//! placeholder must be supplied through [ArnFields].

use {
    crate::StatementError,
    indexmap::IndexMap,
    lazy_static::lazy_static,
    log::{debug, trace},
    regex::{Captures, Regex},
    serde::{Deserialize, Serialize},
    std::collections::HashMap,
};

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\$\{([^${}]*)\}").unwrap();
}

pub const PARTITION: &str = "Partition";
pub const REGION: &str = "Region";
pub const ACCOUNT: &str = "Account";
pub const ACCOUNT_ID: &str = "AccountId";

/// Per-field defaults used when a caller omits the partition, region, or account of a resource.
///
/// The generated catalogues disagree on whether a missing region or account should be blank (`""`) or a wildcard
/// (`"*"`), so each service catalogue carries its own copy.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArnDefaults {
    pub partition: String,
    pub region: String,
    pub account: String,
}

impl Default for ArnDefaults {
    fn default() -> Self {
        Self {
            partition: "aws".to_string(),
            region: "*".to_string(),
            account: "*".to_string(),
        }
    }
}

impl ArnDefaults {
    /// Defaults for global or account-agnostic resources: region and account are left blank.
    pub fn blank() -> Self {
        Self {
            partition: "aws".to_string(),
            region: String::new(),
            account: String::new(),
        }
    }

    pub fn to_map(&self) -> HashMap<String, String> {
        HashMap::from([
            (PARTITION.to_string(), self.partition.clone()),
            (REGION.to_string(), self.region.clone()),
            (ACCOUNT.to_string(), self.account.clone()),
            (ACCOUNT_ID.to_string(), self.account.clone()),
        ])
    }
}

/// Caller-supplied placeholder values for a single resource.
///
/// An explicitly supplied empty string is kept as an empty ARN segment; only omitted fields fall back to the
/// defaults.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ArnFields {
    values: IndexMap<String, String>,
}

impl ArnFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value of an arbitrary placeholder, e.g. `ClusterName` or `ResourceId`.
    pub fn set<K: Into<String>, V: Into<String>>(mut self, placeholder: K, value: V) -> Self {
        self.values.insert(placeholder.into(), value.into());
        self
    }

    #[inline]
    pub fn partition<V: Into<String>>(self, value: V) -> Self {
        self.set(PARTITION, value)
    }

    #[inline]
    pub fn region<V: Into<String>>(self, value: V) -> Self {
        self.set(REGION, value)
    }

    /// Set the account. This fills both `${Account}` and `${AccountId}`.
    #[inline]
    pub fn account<V: Into<String>>(self, value: V) -> Self {
        self.set(ACCOUNT, value)
    }

    #[inline]
    pub fn get(&self, placeholder: &str) -> Option<&str> {
        self.values.get(placeholder).map(String::as_str)
    }

    /// Look up a placeholder, treating `Account` and `AccountId` as the same field. An exact match wins.
    fn lookup(&self, placeholder: &str) -> Option<&str> {
        self.get(placeholder).or_else(|| match placeholder {
            ACCOUNT => self.get(ACCOUNT_ID),
            ACCOUNT_ID => self.get(ACCOUNT),
            _ => None,
        })
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ArnFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Return the placeholder names of an ARN template, in order of appearance.
pub fn placeholders(template: &str) -> Vec<&str> {
    PLACEHOLDER.captures_iter(template).filter_map(|c| c.get(1)).map(|m| m.as_str()).collect()
}

/// Substitute every `${Name}` placeholder of `template`.
///
/// Values come from `fields` first, then from `defaults`. The template is scanned once, so substituted values are
/// inserted verbatim even if they contain policy variables such as `${aws:username}`.
///
/// # Errors
///
/// * [StatementError::InvalidArnTemplate] if the template does not start with `arn:` and have six segments, has an
///   empty `${}` placeholder, or has a `${` with no closing `}`.
/// * [StatementError::UnresolvedPlaceholder] if a placeholder has neither a value nor a default.
pub fn resolve(
    template: &str,
    fields: &ArnFields,
    defaults: &HashMap<String, String>,
) -> Result<String, StatementError> {
    if !template.starts_with("arn:") || template.splitn(6, ':').count() != 6 {
        debug!("ARN template does not have six segments: {}", template);
        return Err(StatementError::InvalidArnTemplate(template.to_string()));
    }

    let unclosed = PLACEHOLDER.replace_all(template, "").contains("${");
    if unclosed || placeholders(template).iter().any(|name| name.is_empty()) {
        debug!("ARN template has a malformed placeholder: {}", template);
        return Err(StatementError::InvalidArnTemplate(template.to_string()));
    }

    let mut missing: Option<String> = None;
    let resolved = PLACEHOLDER.replace_all(template, |caps: &Captures| {
        let name = &caps[1];
        match fields.lookup(name).or_else(|| defaults.get(name).map(String::as_str)) {
            Some(value) => value.to_string(),
            None => {
                if missing.is_none() {
                    missing = Some(name.to_string());
                }
                String::new()
            }
        }
    });

    if let Some(placeholder) = missing {
        debug!("ARN template {} has no value for placeholder {}", template, placeholder);
        return Err(StatementError::UnresolvedPlaceholder {
            template: template.to_string(),
            placeholder,
        });
    }

    trace!("Resolved ARN template {} to {}", template, resolved);
    Ok(resolved.into_owned())
}
