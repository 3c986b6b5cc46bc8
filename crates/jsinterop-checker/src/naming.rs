//! JavaScript name derivation.
//!
//! Accessor names follow the Java Bean convention: a `get`, `is` or `set`
//! prefix followed by an upper-case letter. The property name is the rest,
//! decapitalized the way `java.beans.Introspector` does it.

/// A recognised accessor prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorPrefix {
    Get,
    Is,
    Set,
}

impl AccessorPrefix {
    const ALL: [(AccessorPrefix, &'static str); 3] = [
        (AccessorPrefix::Get, "get"),
        (AccessorPrefix::Is, "is"),
        (AccessorPrefix::Set, "set"),
    ];
}

/// Split `name` into its accessor prefix and the remainder, if it has one.
///
/// `getX` and `isX` qualify; `get`, `is` and `getter` do not.
pub fn split_accessor(name: &str) -> Option<(AccessorPrefix, &str)> {
    AccessorPrefix::ALL.iter().find_map(|(prefix, text)| {
        let rest = name.strip_prefix(text)?;
        rest.chars()
            .next()
            .filter(|c| c.is_uppercase())
            .map(|_| (*prefix, rest))
    })
}

/// Lower-case the first character unless the first two are both upper case.
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if chars.next().is_some_and(char::is_uppercase) && first.is_uppercase() {
        return name.to_string();
    }
    first.to_lowercase().chain(name.chars().skip(1)).collect()
}

/// The property name an accessor method contributes. Names without an
/// accessor prefix are returned unchanged.
pub fn property_name(method_name: &str) -> String {
    match split_accessor(method_name) {
        Some((_, rest)) => decapitalize(rest),
        None => method_name.to_string(),
    }
}
