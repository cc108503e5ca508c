//! The IAM condition operator vocabulary.
//!
//! Every operator is an [Operator]: an optional set qualifier (`ForAnyValue:` or `ForAllValues:`) applied to one of
//! the base [ConditionOp] operators. The constants in this module cover every base operator; qualified forms are
//! built with [Operator::for_any_value] and [Operator::for_all_values].

use {
    crate::StatementError,
    log::debug,
    serde::{de, de::Deserializer, ser::Serializer, Deserialize, Serialize},
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// The variant on an operation.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum Variant {
    None = 0,
    IfExists = 1,
    Negated = 2,
    IfExistsNegated = 3,
}

impl Variant {
    #[inline]
    fn as_usize(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn if_exists(self) -> bool {
        matches!(self, Self::IfExists | Self::IfExistsNegated)
    }

    #[inline]
    pub fn negated(self) -> bool {
        matches!(self, Self::Negated | Self::IfExistsNegated)
    }
}

/// The variant on an operation that has no negated form.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum ExistsVariant {
    None = 0,
    IfExists = 1,
}

impl ExistsVariant {
    #[inline]
    fn as_usize(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn if_exists(self) -> bool {
        self == Self::IfExists
    }
}

// For each comparison the if-exists variant follows, then the negated variant, then the negated if-exists variant.
// The comparison discriminants are offsets into these tables.

const ARN_DISPLAY_NAMES: [&str; 8] = [
    "ArnEquals",
    "ArnEqualsIfExists",
    "ArnNotEquals",
    "ArnNotEqualsIfExists",
    "ArnLike",
    "ArnLikeIfExists",
    "ArnNotLike",
    "ArnNotLikeIfExists",
];

const BINARY_DISPLAY_NAMES: [&str; 2] = ["BinaryEquals", "BinaryEqualsIfExists"];

const BOOL_DISPLAY_NAMES: [&str; 2] = ["Bool", "BoolIfExists"];

const DATE_DISPLAY_NAMES: [&str; 12] = [
    "DateEquals",
    "DateEqualsIfExists",
    "DateNotEquals",
    "DateNotEqualsIfExists",
    "DateLessThan",
    "DateLessThanIfExists",
    "DateGreaterThanEquals",
    "DateGreaterThanEqualsIfExists",
    "DateLessThanEquals",
    "DateLessThanEqualsIfExists",
    "DateGreaterThan",
    "DateGreaterThanIfExists",
];

const IP_ADDRESS_DISPLAY_NAMES: [&str; 4] = ["IpAddress", "IpAddressIfExists", "NotIpAddress", "NotIpAddressIfExists"];

const NUMERIC_DISPLAY_NAMES: [&str; 12] = [
    "NumericEquals",
    "NumericEqualsIfExists",
    "NumericNotEquals",
    "NumericNotEqualsIfExists",
    "NumericLessThan",
    "NumericLessThanIfExists",
    "NumericGreaterThanEquals",
    "NumericGreaterThanEqualsIfExists",
    "NumericLessThanEquals",
    "NumericLessThanEqualsIfExists",
    "NumericGreaterThan",
    "NumericGreaterThanIfExists",
];

const STRING_DISPLAY_NAMES: [&str; 12] = [
    "StringEquals",
    "StringEqualsIfExists",
    "StringNotEquals",
    "StringNotEqualsIfExists",
    "StringEqualsIgnoreCase",
    "StringEqualsIgnoreCaseIfExists",
    "StringNotEqualsIgnoreCase",
    "StringNotEqualsIgnoreCaseIfExists",
    "StringLike",
    "StringLikeIfExists",
    "StringNotLike",
    "StringNotLikeIfExists",
];

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum ArnCmp {
    Equals = 0,
    Like = 4,
}

/// Date comparisons. `GreaterThanEquals` is the negation of `LessThan`; `GreaterThan` that of `LessThanEquals`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum DateCmp {
    Equals = 0,
    LessThan = 4,
    LessThanEquals = 8,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum NumericCmp {
    Equals = 0,
    LessThan = 4,
    LessThanEquals = 8,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum StringCmp {
    Equals = 0,
    EqualsIgnoreCase = 4,
    Like = 8,
}

/// A base condition operator, without any set qualifier.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ConditionOp {
    /// Operators for ARNs.
    Arn(ArnCmp, Variant),

    /// Operators for binary values.
    Binary(ExistsVariant),

    /// Operators on boolean values.
    Bool(ExistsVariant),

    /// Operators for date/time values.
    Date(DateCmp, Variant),

    /// Operators on IP addresses and networks.
    IpAddress(Variant),

    /// Operator on the presence/absence of a value.
    Null,

    /// Operators on numeric values.
    Numeric(NumericCmp, Variant),

    /// Operators on string values.
    String(StringCmp, Variant),
}

impl ConditionOp {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Arn(cmp, variant) => ARN_DISPLAY_NAMES[*cmp as usize | variant.as_usize()],
            Self::Binary(variant) => BINARY_DISPLAY_NAMES[variant.as_usize()],
            Self::Bool(variant) => BOOL_DISPLAY_NAMES[variant.as_usize()],
            Self::Date(cmp, variant) => DATE_DISPLAY_NAMES[*cmp as usize | variant.as_usize()],
            Self::IpAddress(variant) => IP_ADDRESS_DISPLAY_NAMES[variant.as_usize()],
            Self::Null => "Null",
            Self::Numeric(cmp, variant) => NUMERIC_DISPLAY_NAMES[*cmp as usize | variant.as_usize()],
            Self::String(cmp, variant) => STRING_DISPLAY_NAMES[*cmp as usize | variant.as_usize()],
        }
    }

    fn from_name(s: &str) -> Option<Self> {
        fn position(table: &[&str], s: &str) -> Option<usize> {
            table.iter().position(|name| *name == s)
        }

        fn variant(index: usize) -> Variant {
            match index & 3 {
                0 => Variant::None,
                1 => Variant::IfExists,
                2 => Variant::Negated,
                _ => Variant::IfExistsNegated,
            }
        }

        fn exists_variant(index: usize) -> ExistsVariant {
            if index & 1 == 0 {
                ExistsVariant::None
            } else {
                ExistsVariant::IfExists
            }
        }

        if s == "Null" {
            return Some(Self::Null);
        }

        if let Some(i) = position(&ARN_DISPLAY_NAMES, s) {
            let cmp = if i < 4 {
                ArnCmp::Equals
            } else {
                ArnCmp::Like
            };
            return Some(Self::Arn(cmp, variant(i)));
        }

        if let Some(i) = position(&BINARY_DISPLAY_NAMES, s) {
            return Some(Self::Binary(exists_variant(i)));
        }

        if let Some(i) = position(&BOOL_DISPLAY_NAMES, s) {
            return Some(Self::Bool(exists_variant(i)));
        }

        if let Some(i) = position(&DATE_DISPLAY_NAMES, s) {
            let cmp = match i / 4 {
                0 => DateCmp::Equals,
                1 => DateCmp::LessThan,
                _ => DateCmp::LessThanEquals,
            };
            return Some(Self::Date(cmp, variant(i)));
        }

        if let Some(i) = position(&IP_ADDRESS_DISPLAY_NAMES, s) {
            return Some(Self::IpAddress(variant(i)));
        }

        if let Some(i) = position(&NUMERIC_DISPLAY_NAMES, s) {
            let cmp = match i / 4 {
                0 => NumericCmp::Equals,
                1 => NumericCmp::LessThan,
                _ => NumericCmp::LessThanEquals,
            };
            return Some(Self::Numeric(cmp, variant(i)));
        }

        if let Some(i) = position(&STRING_DISPLAY_NAMES, s) {
            let cmp = match i / 4 {
                0 => StringCmp::Equals,
                1 => StringCmp::EqualsIgnoreCase,
                _ => StringCmp::Like,
            };
            return Some(Self::String(cmp, variant(i)));
        }

        None
    }
}

impl Display for ConditionOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

/// Set operators for multivalued condition keys.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum SetQualifier {
    ForAllValues,
    ForAnyValue,
}

impl Display for SetQualifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::ForAllValues => f.write_str("ForAllValues"),
            Self::ForAnyValue => f.write_str("ForAnyValue"),
        }
    }
}

/// A complete condition operator as it appears in the `Condition` block of a statement.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Operator {
    qualifier: Option<SetQualifier>,
    op: ConditionOp,
}

impl Operator {
    pub const fn new(op: ConditionOp) -> Self {
        Self {
            qualifier: None,
            op,
        }
    }

    /// Apply the `ForAnyValue:` set qualifier.
    pub const fn for_any_value(self) -> Self {
        Self {
            qualifier: Some(SetQualifier::ForAnyValue),
            op: self.op,
        }
    }

    /// Apply the `ForAllValues:` set qualifier.
    pub const fn for_all_values(self) -> Self {
        Self {
            qualifier: Some(SetQualifier::ForAllValues),
            op: self.op,
        }
    }

    #[inline]
    pub fn qualifier(&self) -> Option<SetQualifier> {
        self.qualifier
    }

    #[inline]
    pub fn op(&self) -> ConditionOp {
        self.op
    }
}

impl From<ConditionOp> for Operator {
    fn from(op: ConditionOp) -> Self {
        Self::new(op)
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.qualifier {
            Some(qualifier) => write!(f, "{}:{}", qualifier, self.op),
            None => f.write_str(self.op.name()),
        }
    }
}

impl PartialEq<str> for Operator {
    fn eq(&self, other: &str) -> bool {
        self.to_string().as_str() == other
    }
}

impl FromStr for Operator {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (qualifier, base) = if let Some(base) = s.strip_prefix("ForAnyValue:") {
            (Some(SetQualifier::ForAnyValue), base)
        } else if let Some(base) = s.strip_prefix("ForAllValues:") {
            (Some(SetQualifier::ForAllValues), base)
        } else {
            (None, s)
        };

        match ConditionOp::from_name(base) {
            Some(op) => Ok(Self {
                qualifier,
                op,
            }),
            None => {
                debug!("Unknown condition operator: {:?}", s);
                Err(StatementError::InvalidConditionOperator(s.to_string()))
            }
        }
    }
}

impl<'de> Deserialize<'de> for Operator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Operator::from_str(&s).map_err(de::Error::custom)
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

macro_rules! operators {
    ($($(#[$meta:meta])* $name:ident = $op:expr;)*) => {
        $(
            $(#[$meta])*
            #[allow(non_upper_case_globals)]
            pub const $name: Operator = Operator::new($op);
        )*
    };
}

operators! {
    /// The `ArnEquals` operator.
    ArnEquals = ConditionOp::Arn(ArnCmp::Equals, Variant::None);
    /// The `ArnEqualsIfExists` operator.
    ArnEqualsIfExists = ConditionOp::Arn(ArnCmp::Equals, Variant::IfExists);
    /// The `ArnNotEquals` operator.
    ArnNotEquals = ConditionOp::Arn(ArnCmp::Equals, Variant::Negated);
    /// The `ArnNotEqualsIfExists` operator.
    ArnNotEqualsIfExists = ConditionOp::Arn(ArnCmp::Equals, Variant::IfExistsNegated);
    /// The `ArnLike` operator.
    ArnLike = ConditionOp::Arn(ArnCmp::Like, Variant::None);
    /// The `ArnLikeIfExists` operator.
    ArnLikeIfExists = ConditionOp::Arn(ArnCmp::Like, Variant::IfExists);
    /// The `ArnNotLike` operator.
    ArnNotLike = ConditionOp::Arn(ArnCmp::Like, Variant::Negated);
    /// The `ArnNotLikeIfExists` operator.
    ArnNotLikeIfExists = ConditionOp::Arn(ArnCmp::Like, Variant::IfExistsNegated);
    /// The `BinaryEquals` operator.
    BinaryEquals = ConditionOp::Binary(ExistsVariant::None);
    /// The `BinaryEqualsIfExists` operator.
    BinaryEqualsIfExists = ConditionOp::Binary(ExistsVariant::IfExists);
    /// The `Bool` operator.
    Bool = ConditionOp::Bool(ExistsVariant::None);
    /// The `BoolIfExists` operator.
    BoolIfExists = ConditionOp::Bool(ExistsVariant::IfExists);
    /// The `DateEquals` operator.
    DateEquals = ConditionOp::Date(DateCmp::Equals, Variant::None);
    /// The `DateEqualsIfExists` operator.
    DateEqualsIfExists = ConditionOp::Date(DateCmp::Equals, Variant::IfExists);
    /// The `DateNotEquals` operator.
    DateNotEquals = ConditionOp::Date(DateCmp::Equals, Variant::Negated);
    /// The `DateNotEqualsIfExists` operator.
    DateNotEqualsIfExists = ConditionOp::Date(DateCmp::Equals, Variant::IfExistsNegated);
    /// The `DateLessThan` operator.
    DateLessThan = ConditionOp::Date(DateCmp::LessThan, Variant::None);
    /// The `DateLessThanIfExists` operator.
    DateLessThanIfExists = ConditionOp::Date(DateCmp::LessThan, Variant::IfExists);
    /// The `DateGreaterThanEquals` operator.
    DateGreaterThanEquals = ConditionOp::Date(DateCmp::LessThan, Variant::Negated);
    /// The `DateGreaterThanEqualsIfExists` operator.
    DateGreaterThanEqualsIfExists = ConditionOp::Date(DateCmp::LessThan, Variant::IfExistsNegated);
    /// The `DateLessThanEquals` operator.
    DateLessThanEquals = ConditionOp::Date(DateCmp::LessThanEquals, Variant::None);
    /// The `DateLessThanEqualsIfExists` operator.
    DateLessThanEqualsIfExists = ConditionOp::Date(DateCmp::LessThanEquals, Variant::IfExists);
    /// The `DateGreaterThan` operator.
    DateGreaterThan = ConditionOp::Date(DateCmp::LessThanEquals, Variant::Negated);
    /// The `DateGreaterThanIfExists` operator.
    DateGreaterThanIfExists = ConditionOp::Date(DateCmp::LessThanEquals, Variant::IfExistsNegated);
    /// The `IpAddress` operator.
    IpAddress = ConditionOp::IpAddress(Variant::None);
    /// The `IpAddressIfExists` operator.
    IpAddressIfExists = ConditionOp::IpAddress(Variant::IfExists);
    /// The `NotIpAddress` operator.
    NotIpAddress = ConditionOp::IpAddress(Variant::Negated);
    /// The `NotIpAddressIfExists` operator.
    NotIpAddressIfExists = ConditionOp::IpAddress(Variant::IfExistsNegated);
    /// The `Null` operator.
    Null = ConditionOp::Null;
    /// The `NumericEquals` operator.
    NumericEquals = ConditionOp::Numeric(NumericCmp::Equals, Variant::None);
    /// The `NumericEqualsIfExists` operator.
    NumericEqualsIfExists = ConditionOp::Numeric(NumericCmp::Equals, Variant::IfExists);
    /// The `NumericNotEquals` operator.
    NumericNotEquals = ConditionOp::Numeric(NumericCmp::Equals, Variant::Negated);
    /// The `NumericNotEqualsIfExists` operator.
    NumericNotEqualsIfExists = ConditionOp::Numeric(NumericCmp::Equals, Variant::IfExistsNegated);
    /// The `NumericLessThan` operator.
    NumericLessThan = ConditionOp::Numeric(NumericCmp::LessThan, Variant::None);
    /// The `NumericLessThanIfExists` operator.
    NumericLessThanIfExists = ConditionOp::Numeric(NumericCmp::LessThan, Variant::IfExists);
    /// The `NumericGreaterThanEquals` operator.
    NumericGreaterThanEquals = ConditionOp::Numeric(NumericCmp::LessThan, Variant::Negated);
    /// The `NumericGreaterThanEqualsIfExists` operator.
    NumericGreaterThanEqualsIfExists = ConditionOp::Numeric(NumericCmp::LessThan, Variant::IfExistsNegated);
    /// The `NumericLessThanEquals` operator.
    NumericLessThanEquals = ConditionOp::Numeric(NumericCmp::LessThanEquals, Variant::None);
    /// The `NumericLessThanEqualsIfExists` operator.
    NumericLessThanEqualsIfExists = ConditionOp::Numeric(NumericCmp::LessThanEquals, Variant::IfExists);
    /// The `NumericGreaterThan` operator.
    NumericGreaterThan = ConditionOp::Numeric(NumericCmp::LessThanEquals, Variant::Negated);
    /// The `NumericGreaterThanIfExists` operator.
    NumericGreaterThanIfExists = ConditionOp::Numeric(NumericCmp::LessThanEquals, Variant::IfExistsNegated);
    /// The `StringEquals` operator.
    StringEquals = ConditionOp::String(StringCmp::Equals, Variant::None);
    /// The `StringEqualsIfExists` operator.
    StringEqualsIfExists = ConditionOp::String(StringCmp::Equals, Variant::IfExists);
    /// The `StringNotEquals` operator.
    StringNotEquals = ConditionOp::String(StringCmp::Equals, Variant::Negated);
    /// The `StringNotEqualsIfExists` operator.
    StringNotEqualsIfExists = ConditionOp::String(StringCmp::Equals, Variant::IfExistsNegated);
    /// The `StringEqualsIgnoreCase` operator.
    StringEqualsIgnoreCase = ConditionOp::String(StringCmp::EqualsIgnoreCase, Variant::None);
    /// The `StringEqualsIgnoreCaseIfExists` operator.
    StringEqualsIgnoreCaseIfExists = ConditionOp::String(StringCmp::EqualsIgnoreCase, Variant::IfExists);
    /// The `StringNotEqualsIgnoreCase` operator.
    StringNotEqualsIgnoreCase = ConditionOp::String(StringCmp::EqualsIgnoreCase, Variant::Negated);
    /// The `StringNotEqualsIgnoreCaseIfExists` operator.
    StringNotEqualsIgnoreCaseIfExists = ConditionOp::String(StringCmp::EqualsIgnoreCase, Variant::IfExistsNegated);
    /// The `StringLike` operator.
    StringLike = ConditionOp::String(StringCmp::Like, Variant::None);
    /// The `StringLikeIfExists` operator.
    StringLikeIfExists = ConditionOp::String(StringCmp::Like, Variant::IfExists);
    /// The `StringNotLike` operator.
    StringNotLike = ConditionOp::String(StringCmp::Like, Variant::Negated);
    /// The `StringNotLikeIfExists` operator.
    StringNotLikeIfExists = ConditionOp::String(StringCmp::Like, Variant::IfExistsNegated);
}
