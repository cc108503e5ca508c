use {
    crate::{accumulator::Accumulator, display_json, from_str_json, serutil::StringList},
    derive_builder::Builder,
    log::debug,
    serde::{
        de::{self, value::MapAccessDeserializer, Deserializer, MapAccess, Unexpected, Visitor},
        ser::Serializer,
        Deserialize, Serialize,
    },
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// The principal types that may appear in a `Principal` or `NotPrincipal` element.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum PrincipalKind {
    Aws,
    CanonicalUser,
    Federated,
    Service,
}

impl Display for PrincipalKind {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Aws => f.write_str("AWS"),
            Self::CanonicalUser => f.write_str("CanonicalUser"),
            Self::Federated => f.write_str("Federated"),
            Self::Service => f.write_str("Service"),
        }
    }
}

#[derive(Builder, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SpecifiedPrincipal {
    #[builder(setter(into, strip_option), default)]
    #[serde(rename = "AWS", skip_serializing_if = "Option::is_none")]
    aws: Option<StringList>,

    #[builder(setter(into, strip_option), default)]
    #[serde(rename = "CanonicalUser", skip_serializing_if = "Option::is_none")]
    canonical_user: Option<StringList>,

    #[builder(setter(into, strip_option), default)]
    #[serde(rename = "Federated", skip_serializing_if = "Option::is_none")]
    federated: Option<StringList>,

    #[builder(setter(into, strip_option), default)]
    #[serde(rename = "Service", skip_serializing_if = "Option::is_none")]
    service: Option<StringList>,
}

display_json!(SpecifiedPrincipal);

impl SpecifiedPrincipal {
    #[inline]
    pub fn builder() -> SpecifiedPrincipalBuilder {
        SpecifiedPrincipalBuilder::default()
    }

    pub fn get(&self, kind: PrincipalKind) -> Option<&StringList> {
        match kind {
            PrincipalKind::Aws => self.aws.as_ref(),
            PrincipalKind::CanonicalUser => self.canonical_user.as_ref(),
            PrincipalKind::Federated => self.federated.as_ref(),
            PrincipalKind::Service => self.service.as_ref(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Principal {
    Any,
    Specified(SpecifiedPrincipal),
}

impl From<SpecifiedPrincipal> for Principal {
    fn from(sp: SpecifiedPrincipal) -> Self {
        Self::Specified(sp)
    }
}

display_json!(Principal);
from_str_json!(Principal);

struct PrincipalVisitor {}

impl<'de> Visitor<'de> for PrincipalVisitor {
    type Value = Principal;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "map of principal types to values or \"*\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        if v == "*" {
            Ok(Principal::Any)
        } else {
            Err(E::invalid_value(Unexpected::Str(v), &self))
        }
    }

    fn visit_map<A: MapAccess<'de>>(self, access: A) -> Result<Self::Value, A::Error> {
        let deserializer = MapAccessDeserializer::new(access);
        match SpecifiedPrincipal::deserialize(deserializer) {
            Ok(sp) => Ok(Principal::Specified(sp)),
            Err(e) => {
                debug!("Failed to deserialize principal: {:?}", e);
                Err(e)
            }
        }
    }
}

impl<'de> Deserialize<'de> for Principal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PrincipalVisitor {})
    }
}

impl Serialize for Principal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Any => serializer.serialize_str("*"),
            Self::Specified(specified) => specified.serialize(serializer),
        }
    }
}

/// Principals accumulated by a statement. Adding the public principal overrides every other entry.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PrincipalSet {
    public: bool,
    aws: Accumulator,
    canonical_user: Accumulator,
    federated: Accumulator,
    service: Accumulator,
}

impl PrincipalSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<S: Into<String>>(&mut self, kind: PrincipalKind, identifier: S) {
        let identifier = identifier.into();
        if kind == PrincipalKind::Aws && identifier == "*" {
            self.public = true;
            return;
        }

        match kind {
            PrincipalKind::Aws => self.aws.insert(identifier),
            PrincipalKind::CanonicalUser => self.canonical_user.insert(identifier),
            PrincipalKind::Federated => self.federated.insert(identifier),
            PrincipalKind::Service => self.service.insert(identifier),
        };
    }

    #[inline]
    pub fn set_public(&mut self) {
        self.public = true;
    }

    #[inline]
    pub fn is_public(&self) -> bool {
        self.public
    }

    pub fn is_empty(&self) -> bool {
        !self.public
            && self.aws.is_empty()
            && self.canonical_user.is_empty()
            && self.federated.is_empty()
            && self.service.is_empty()
    }

    pub fn render(&self) -> Option<Principal> {
        if self.public {
            return Some(Principal::Any);
        }

        if self.is_empty() {
            return None;
        }

        fn list(acc: &Accumulator) -> Option<StringList> {
            if acc.is_empty() {
                None
            } else {
                Some(StringList::List(acc.to_vec()))
            }
        }

        Some(Principal::Specified(SpecifiedPrincipal {
            aws: list(&self.aws),
            canonical_user: list(&self.canonical_user),
            federated: list(&self.federated),
            service: list(&self.service),
        }))
    }
}
