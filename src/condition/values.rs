use {
    chrono::{DateTime, SecondsFormat, Utc},
    ipnet::IpNet,
    std::net::IpAddr,
};

/// One or more condition values, normalised to strings.
///
/// Booleans and numbers are stored in their string form, matching how the IAM console writes them. Dates are
/// written as ISO 8601 with millisecond precision and a `Z` suffix.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConditionValues(Vec<String>);

impl ConditionValues {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Encode raw bytes as base64, the form expected by the `BinaryEquals` operator.
    pub fn binary<B: AsRef<[u8]>>(bytes: B) -> Self {
        Self(vec![base64::encode(bytes)])
    }
}

impl IntoIterator for ConditionValues {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<&str> for ConditionValues {
    fn from(v: &str) -> Self {
        Self(vec![v.to_string()])
    }
}

impl From<String> for ConditionValues {
    fn from(v: String) -> Self {
        Self(vec![v])
    }
}

impl From<&String> for ConditionValues {
    fn from(v: &String) -> Self {
        Self(vec![v.clone()])
    }
}

impl<T: Into<String>> From<Vec<T>> for ConditionValues {
    fn from(v: Vec<T>) -> Self {
        Self(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<String>, const N: usize> From<[T; N]> for ConditionValues {
    fn from(v: [T; N]) -> Self {
        Self(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<String> + Clone> From<&[T]> for ConditionValues {
    fn from(v: &[T]) -> Self {
        Self(v.iter().cloned().map(Into::into).collect())
    }
}

impl From<bool> for ConditionValues {
    fn from(v: bool) -> Self {
        Self(vec![v.to_string()])
    }
}

macro_rules! numeric_values {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ConditionValues {
                fn from(v: $t) -> Self {
                    Self(vec![v.to_string()])
                }
            }
        )*
    };
}

numeric_values!(i32, i64, u32, u64, usize, f64);

impl From<DateTime<Utc>> for ConditionValues {
    fn from(v: DateTime<Utc>) -> Self {
        Self(vec![v.to_rfc3339_opts(SecondsFormat::Millis, true)])
    }
}

impl From<IpNet> for ConditionValues {
    fn from(v: IpNet) -> Self {
        Self(vec![v.to_string()])
    }
}

impl From<IpAddr> for ConditionValues {
    fn from(v: IpAddr) -> Self {
        Self(vec![v.to_string()])
    }
}
