use {
    crate::{display_json, from_str_json, ArnDefaults, StatementError},
    derive_builder::Builder,
    indexmap::IndexMap,
    serde::{
        de::{self, Deserializer},
        ser::Serializer,
        Deserialize, Serialize,
    },
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// Access level classification of an action, as labelled in the service authorization reference.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AccessLevel {
    List,
    Read,
    Write,
    PermissionsManagement,
    Tagging,
}

impl Display for AccessLevel {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::List => f.write_str("List"),
            Self::Read => f.write_str("Read"),
            Self::Write => f.write_str("Write"),
            Self::PermissionsManagement => f.write_str("Permissions management"),
            Self::Tagging => f.write_str("Tagging"),
        }
    }
}

impl FromStr for AccessLevel {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "List" => Ok(Self::List),
            "Read" => Ok(Self::Read),
            "Write" => Ok(Self::Write),
            "Permissions management" => Ok(Self::PermissionsManagement),
            "Tagging" => Ok(Self::Tagging),
            _ => Err(StatementError::InvalidAccessLevel(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for AccessLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        AccessLevel::from_str(&s).map_err(de::Error::custom)
    }
}

impl Serialize for AccessLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceTypeRef {
    pub required: bool,
}

/// Static description of a single action of a service.
#[derive(Builder, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ActionDescriptor {
    #[builder(setter(into), default)]
    #[serde(default, skip_serializing_if = "String::is_empty")]
    url: String,

    #[builder(setter(into), default)]
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,

    access_level: AccessLevel,

    #[builder(default)]
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    resource_types: IndexMap<String, ResourceTypeRef>,

    #[builder(default)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    conditions: Vec<String>,

    #[builder(default)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    dependent_actions: Vec<String>,
}

impl ActionDescriptor {
    #[inline]
    pub fn builder() -> ActionDescriptorBuilder {
        ActionDescriptorBuilder::default()
    }

    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn access_level(&self) -> AccessLevel {
        self.access_level
    }

    #[inline]
    pub fn resource_types(&self) -> &IndexMap<String, ResourceTypeRef> {
        &self.resource_types
    }

    #[inline]
    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    #[inline]
    pub fn dependent_actions(&self) -> &[String] {
        &self.dependent_actions
    }
}

/// Static description of a resource type of a service, including its ARN template.
#[derive(Builder, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ResourceTypeDescriptor {
    #[builder(setter(into))]
    name: String,

    #[builder(setter(into), default)]
    #[serde(default, skip_serializing_if = "String::is_empty")]
    url: String,

    #[builder(setter(into))]
    arn: String,

    #[builder(default)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    condition_keys: Vec<String>,
}

impl ResourceTypeDescriptor {
    #[inline]
    pub fn builder() -> ResourceTypeDescriptorBuilder {
        ResourceTypeDescriptorBuilder::default()
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The ARN template, e.g. `arn:${Partition}:memorydb:${Region}:${Account}:acl/${AclName}`.
    #[inline]
    pub fn arn(&self) -> &str {
        &self.arn
    }

    #[inline]
    pub fn condition_keys(&self) -> &[String] {
        &self.condition_keys
    }
}

/// The static catalogue of one service: its prefix, actions, resource types and ARN defaults.
///
/// Catalogues are immutable once built and are shared between statements through an `Arc`.
#[derive(Builder, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct Service {
    #[builder(setter(into))]
    prefix: String,

    #[builder(default)]
    #[serde(default)]
    arn_defaults: ArnDefaults,

    #[builder(default)]
    #[serde(default)]
    actions: IndexMap<String, ActionDescriptor>,

    #[builder(default)]
    #[serde(default)]
    resource_types: IndexMap<String, ResourceTypeDescriptor>,
}

display_json!(Service);
from_str_json!(Service);

impl Service {
    #[inline]
    pub fn builder() -> ServiceBuilder {
        ServiceBuilder::default()
    }

    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[inline]
    pub fn arn_defaults(&self) -> &ArnDefaults {
        &self.arn_defaults
    }

    #[inline]
    pub fn actions(&self) -> &IndexMap<String, ActionDescriptor> {
        &self.actions
    }

    #[inline]
    pub fn action(&self, name: &str) -> Option<&ActionDescriptor> {
        self.actions.get(name)
    }

    #[inline]
    pub fn resource_types(&self) -> &IndexMap<String, ResourceTypeDescriptor> {
        &self.resource_types
    }

    #[inline]
    pub fn resource_type(&self, name: &str) -> Option<&ResourceTypeDescriptor> {
        self.resource_types.get(name)
    }

    /// Names of the actions at the given access level, in catalogue order.
    pub fn actions_with_access_level(&self, level: AccessLevel) -> Vec<&str> {
        self.actions.iter().filter(|(_, a)| a.access_level == level).map(|(name, _)| name.as_str()).collect()
    }
}

impl ServiceBuilder {
    /// Add a single action to the catalogue being built.
    pub fn action<N: Into<String>>(&mut self, name: N, action: ActionDescriptor) -> &mut Self {
        self.actions.get_or_insert_with(IndexMap::new).insert(name.into(), action);
        self
    }

    /// Add a single resource type to the catalogue being built, keyed by its name.
    pub fn resource_type(&mut self, resource_type: ResourceTypeDescriptor) -> &mut Self {
        self.resource_types.get_or_insert_with(IndexMap::new).insert(resource_type.name.clone(), resource_type);
        self
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{AccessLevel, ActionDescriptor, ArnDefaults, ResourceTypeDescriptor, Service},
        indoc::indoc,
        pretty_assertions::assert_eq,
        std::str::FromStr,
    };

    const MEMORYDB: &str = indoc! { r#"
        {
            "prefix": "memorydb",
            "actions": {
                "CreateAcl": {
                    "url": "https://docs.aws.amazon.com/memorydb/latest/APIReference/API_CreateAcl.html",
                    "description": "Grants permissions to create a new access control list",
                    "accessLevel": "Write",
                    "resourceTypes": {
                        "acl": {
                            "required": true
                        }
                    },
                    "conditions": [
                        "aws:RequestTag/${TagKey}",
                        "aws:TagKeys"
                    ],
                    "dependentActions": [
                        "memorydb:TagResource"
                    ]
                },
                "DescribeAcls": {
                    "accessLevel": "Read"
                },
                "ListTags": {
                    "accessLevel": "Read"
                },
                "TagResource": {
                    "accessLevel": "Tagging"
                }
            },
            "resourceTypes": {
                "acl": {
                    "name": "acl",
                    "arn": "arn:${Partition}:memorydb:${Region}:${Account}:acl/${AclName}",
                    "conditionKeys": [
                        "aws:ResourceTag/${TagKey}"
                    ]
                }
            }
        }"# };

    #[test_log::test]
    fn test_parse_catalogue() {
        let service = Service::from_str(MEMORYDB).unwrap();
        assert_eq!(service.prefix(), "memorydb");
        assert_eq!(service.arn_defaults(), &ArnDefaults::default());
        assert_eq!(service.actions().len(), 4);

        let create = service.action("CreateAcl").unwrap();
        assert_eq!(create.access_level(), AccessLevel::Write);
        assert!(create.resource_types()["acl"].required);
        assert_eq!(create.conditions(), &["aws:RequestTag/${TagKey}".to_string(), "aws:TagKeys".to_string()]);
        assert_eq!(create.dependent_actions(), &["memorydb:TagResource".to_string()]);

        let acl = service.resource_type("acl").unwrap();
        assert_eq!(acl.arn(), "arn:${Partition}:memorydb:${Region}:${Account}:acl/${AclName}");
        assert_eq!(acl.condition_keys().len(), 1);

        assert_eq!(service.actions_with_access_level(AccessLevel::Read), vec!["DescribeAcls", "ListTags"]);
        assert!(service.actions_with_access_level(AccessLevel::List).is_empty());
    }

    #[test_log::test]
    fn test_bad_access_level() {
        let e = Service::from_str(r#"{"prefix": "x", "actions": {"A": {"accessLevel": "Admin"}}}"#).unwrap_err();
        assert!(e.to_string().starts_with("Invalid access level: Admin"));
    }

    #[test_log::test]
    fn test_access_level_labels() {
        for level in [
            AccessLevel::List,
            AccessLevel::Read,
            AccessLevel::Write,
            AccessLevel::PermissionsManagement,
            AccessLevel::Tagging,
        ] {
            assert_eq!(AccessLevel::from_str(&level.to_string()).unwrap(), level);
        }
        assert_eq!(AccessLevel::PermissionsManagement.to_string(), "Permissions management");
    }

    #[test_log::test]
    fn test_builder() {
        let service = Service::builder()
            .prefix("svc")
            .arn_defaults(ArnDefaults::blank())
            .action("Read", ActionDescriptor::builder().access_level(AccessLevel::Read).build().unwrap())
            .action("List", ActionDescriptor::builder().access_level(AccessLevel::List).build().unwrap())
            .resource_type(
                ResourceTypeDescriptor::builder()
                    .name("thing")
                    .arn("arn:${Partition}:svc:${Region}:${Account}:thing/${ThingId}")
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        assert_eq!(service.actions().keys().collect::<Vec<_>>(), vec!["Read", "List"]);
        assert_eq!(service.arn_defaults().region, "");
        assert!(service.resource_type("thing").is_some());

        let e = Service::builder().build().unwrap_err();
        assert!(e.to_string().contains("prefix"));
    }
}
