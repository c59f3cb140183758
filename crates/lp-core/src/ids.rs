use core::borrow::Borrow;
use core::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// See [`is_file_safe`].
            pub fn is_file_safe(&self) -> bool {
                is_file_safe(&self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

/// Whether `id` can name a file or directory under a store root without
/// escaping it: ASCII alphanumerics, `-`, `_` and `.`, not starting with `.`.
pub fn is_file_safe(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('.')
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

string_id!(
    /// Stable identifier of an element, unique within its network.
    ElementId
);

string_id!(
    /// Identifier of a stored network.
    NetworkId
);

string_id!(
    /// Identifier of a directed connection between two elements.
    ConnectionId
);

string_id!(
    /// Identifier of a provisioned service.
    ServiceId
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(ElementId::new("edfa-1"), 7);
        assert_eq!(map.get("edfa-1"), Some(&7));
        assert_eq!(map.get("edfa-2"), None);
    }

    #[test]
    fn file_safety() {
        assert!(is_file_safe("net-a"));
        assert!(is_file_safe("3f2a9c1e-77b0-4c1d-9a51-0c7b6a3e2d10"));
        assert!(is_file_safe("v1.2_run"));
        assert!(NetworkId::new("metro").is_file_safe());
        for bad in ["", ".", "..", "../x", "a/b", "a\\b", ".hidden", "c:x"] {
            assert!(!is_file_safe(bad), "{bad:?} accepted");
        }
    }

    #[test]
    fn display_is_raw_id() {
        let id = NetworkId::from("net-a");
        assert_eq!(id.to_string(), "net-a");
        assert_eq!(format!("{id:?}"), "NetworkId(net-a)");
        assert!(id == "net-a");
    }
}
