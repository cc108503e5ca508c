//! The fluent statement builder shared by every service binding.
//!
//! A [PolicyStatement] accumulates actions, resources, principals and conditions through chained calls, then
//! projects them into a [Statement] with [PolicyStatement::render]. Rendering is read-only; the builder stays
//! mutable afterwards and a later render reflects any further calls.

mod conditions;
mod principals;

use {
    crate::{
        accumulator::Accumulator,
        arn::{resolve, ArnFields},
        catalog::{AccessLevel, Service},
        condition::{ConditionSet, ConditionValues, Operator, DEFAULT_OPERATOR},
        condop,
        principal::PrincipalSet,
        serutil::StringList,
        Effect, Statement, StatementError,
    },
    log::{debug, trace},
    regex::Regex,
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        sync::Arc,
    },
};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PolicyStatement {
    service: Option<Arc<Service>>,
    sid: Option<String>,
    effect: Effect,
    actions: Accumulator,
    not_action: bool,
    resources: Accumulator,
    not_resource: bool,
    principals: PrincipalSet,
    not_principal: bool,
    conditions: ConditionSet,
}

impl PolicyStatement {
    /// A statement with no service catalogue. Actions and condition keys must be fully qualified.
    pub fn new() -> Self {
        Self::default()
    }

    /// A statement bound to a service catalogue. Unqualified action names and condition keys receive the
    /// service prefix, and the catalogue-driven selectors become available.
    pub fn from_service(service: Arc<Service>) -> Self {
        Self {
            service: Some(service),
            ..Self::default()
        }
    }

    /// Set the statement id. This is only available while constructing the statement.
    pub fn with_sid<S: Into<String>>(mut self, sid: S) -> Self {
        self.sid = Some(sid.into());
        self
    }

    #[inline]
    pub fn sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    #[inline]
    pub fn service(&self) -> Option<&Service> {
        self.service.as_deref()
    }

    #[inline]
    pub fn effect(&self) -> Effect {
        self.effect
    }

    #[inline]
    pub fn actions(&self) -> &Accumulator {
        &self.actions
    }

    #[inline]
    pub fn resources(&self) -> &Accumulator {
        &self.resources
    }

    #[inline]
    pub fn principals(&self) -> &PrincipalSet {
        &self.principals
    }

    #[inline]
    pub fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }

    #[inline]
    pub fn has_actions(&self) -> bool {
        !self.actions.is_empty()
    }

    #[inline]
    pub fn has_resources(&self) -> bool {
        !self.resources.is_empty()
    }

    #[inline]
    pub fn has_principals(&self) -> bool {
        !self.principals.is_empty()
    }

    #[inline]
    pub fn has_conditions(&self) -> bool {
        !self.conditions.is_empty()
    }

    pub fn allow(&mut self) -> &mut Self {
        self.effect = Effect::Allow;
        self
    }

    pub fn deny(&mut self) -> &mut Self {
        self.effect = Effect::Deny;
        self
    }

    /// Add an action. Names without a `:` are qualified with the service prefix when a catalogue is bound.
    ///
    /// Action names are not checked against the catalogue.
    pub fn to<S: Into<String>>(&mut self, action: S) -> &mut Self {
        let action = self.qualify(action.into());
        trace!("Adding action {}", action);
        self.actions.insert(action);
        self
    }

    /// Alias of [PolicyStatement::to].
    #[inline]
    pub fn add<S: Into<String>>(&mut self, action: S) -> &mut Self {
        self.to(action)
    }

    /// Render the actions under `NotAction` instead of `Action`.
    pub fn not_action(&mut self) -> &mut Self {
        self.not_action = true;
        self
    }

    /// Add `prefix:*`.
    pub fn all_actions(&mut self) -> Result<&mut Self, StatementError> {
        let prefix = self.require_service("all_actions")?.prefix().to_string();
        Ok(self.to(format!("{}:*", prefix)))
    }

    pub fn all_list_actions(&mut self) -> Result<&mut Self, StatementError> {
        self.add_access_level("all_list_actions", AccessLevel::List)
    }

    pub fn all_read_actions(&mut self) -> Result<&mut Self, StatementError> {
        self.add_access_level("all_read_actions", AccessLevel::Read)
    }

    pub fn all_write_actions(&mut self) -> Result<&mut Self, StatementError> {
        self.add_access_level("all_write_actions", AccessLevel::Write)
    }

    pub fn all_permission_management_actions(&mut self) -> Result<&mut Self, StatementError> {
        self.add_access_level("all_permission_management_actions", AccessLevel::PermissionsManagement)
    }

    pub fn all_tagging_actions(&mut self) -> Result<&mut Self, StatementError> {
        self.add_access_level("all_tagging_actions", AccessLevel::Tagging)
    }

    /// Add every catalogue action whose name matches `pattern`.
    ///
    /// The pattern is a regular expression matched against the unqualified action name. It is not anchored; use
    /// `^` and `$` to match whole names.
    pub fn all_matching_actions(&mut self, pattern: &str) -> Result<&mut Self, StatementError> {
        let service = self.require_service("all_matching_actions")?;
        let re = match Regex::new(pattern) {
            Ok(re) => re,
            Err(e) => {
                debug!("Invalid action pattern {:?}: {}", pattern, e);
                return Err(StatementError::InvalidActionPattern(pattern.to_string()));
            }
        };

        let matched: Vec<String> = service
            .actions()
            .keys()
            .filter(|name| re.is_match(name))
            .map(|name| format!("{}:{}", service.prefix(), name))
            .collect();

        trace!("Pattern {:?} matched {} actions", pattern, matched.len());
        self.actions.extend(matched);
        Ok(self)
    }

    /// Add a resource ARN. `*` means all resources.
    pub fn on<S: Into<String>>(&mut self, arn: S) -> &mut Self {
        let arn = arn.into();
        trace!("Adding resource {}", arn);
        self.resources.insert(arn);
        self
    }

    /// Resolve the catalogue ARN template for `resource_type` and add the result as a resource.
    ///
    /// # Errors
    ///
    /// * [StatementError::NoServiceCatalogue] if no catalogue is bound.
    /// * [StatementError::UnknownResourceType] if the catalogue has no such resource type.
    /// * Any error from [resolve].
    pub fn on_resource_type(&mut self, resource_type: &str, fields: &ArnFields) -> Result<&mut Self, StatementError> {
        let service = self.require_service("on_resource_type")?;
        let descriptor = match service.resource_type(resource_type) {
            Some(descriptor) => descriptor,
            None => {
                debug!("Service {} has no resource type {}", service.prefix(), resource_type);
                return Err(StatementError::UnknownResourceType {
                    service: service.prefix().to_string(),
                    resource_type: resource_type.to_string(),
                });
            }
        };

        let arn = resolve(descriptor.arn(), fields, &service.arn_defaults().to_map())?;
        Ok(self.on(arn))
    }

    /// Render the resources under `NotResource` instead of `Resource`.
    pub fn not_resource(&mut self) -> &mut Self {
        self.not_resource = true;
        self
    }

    /// Render the principals under `NotPrincipal` instead of `Principal`.
    pub fn not_principal(&mut self) -> &mut Self {
        self.not_principal = true;
        self
    }

    /// Add a condition. `operator` defaults to `StringLike`. Keys without a `:` are qualified with the service prefix
    /// when a catalogue is bound.
    ///
    /// Repeating a key with the same operator adds to its values. Repeating it with a different operator replaces the
    /// earlier values.
    ///
    /// # Errors
    ///
    /// * [StatementError::InvalidConditionKey] if the key is malformed.
    /// * [StatementError::EmptyConditionValues] if `values` is empty.
    pub fn condition<K, V>(&mut self, key: K, values: V, operator: Option<Operator>) -> Result<&mut Self, StatementError>
    where
        K: Into<String>,
        V: Into<ConditionValues>,
    {
        let key = self.qualify(key.into());
        self.conditions.add(key, operator.unwrap_or(DEFAULT_OPERATOR), values)?;
        Ok(self)
    }

    /// Add a binary condition. The bytes are base64-encoded; `operator` defaults to `BinaryEquals`.
    pub fn condition_binary<K, B>(
        &mut self,
        key: K,
        bytes: B,
        operator: Option<Operator>,
    ) -> Result<&mut Self, StatementError>
    where
        K: Into<String>,
        B: AsRef<[u8]>,
    {
        let operator = operator.unwrap_or(condop::BinaryEquals);
        self.condition(key, ConditionValues::binary(bytes), Some(operator))
    }

    /// Project the accumulated state into a [Statement].
    ///
    /// With no resources the resource element is the single string `*`. The condition element is omitted when no
    /// condition was added.
    pub fn render(&self) -> Statement {
        let actions = StringList::List(self.actions.to_vec());
        let resources = if self.resources.is_empty() {
            StringList::from("*")
        } else {
            StringList::List(self.resources.to_vec())
        };
        let principal = self.principals.render();

        let (action, not_action) = if self.not_action {
            (None, Some(actions))
        } else {
            (Some(actions), None)
        };

        let (resource, not_resource) = if self.not_resource {
            (None, Some(resources))
        } else {
            (Some(resources), None)
        };

        let (principal, not_principal) = if self.not_principal {
            (None, principal)
        } else {
            (principal, None)
        };

        Statement {
            sid: self.sid.clone(),
            effect: self.effect,
            action,
            not_action,
            resource,
            not_resource,
            principal,
            not_principal,
            condition: self.conditions.render(),
        }
    }

    fn qualify(&self, name: String) -> String {
        match &self.service {
            Some(service) if !name.contains(':') => format!("{}:{}", service.prefix(), name),
            _ => name,
        }
    }

    fn partition(&self) -> &str {
        match &self.service {
            Some(service) => &service.arn_defaults().partition,
            None => "aws",
        }
    }

    fn require_service(&self, operation: &str) -> Result<Arc<Service>, StatementError> {
        match &self.service {
            Some(service) => Ok(Arc::clone(service)),
            None => {
                debug!("{} requires a service catalogue", operation);
                Err(StatementError::NoServiceCatalogue(operation.to_string()))
            }
        }
    }

    fn add_access_level(&mut self, operation: &str, level: AccessLevel) -> Result<&mut Self, StatementError> {
        let service = self.require_service(operation)?;
        for name in service.actions_with_access_level(level) {
            self.actions.insert(format!("{}:{}", service.prefix(), name));
        }
        Ok(self)
    }
}

impl Display for PolicyStatement {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        Display::fmt(&self.render(), f)
    }
}

#[cfg(test)]
mod tests;
