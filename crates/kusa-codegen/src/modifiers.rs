use std::borrow::Cow;

use kusa_ast::{AccessorKind, Modifier};

/// Placeholder emitted wherever a construct has no C# rendering.
pub const NOT_IMPLEMENTED: &str = "/* not implement */";

/// Map a Kusa modifier onto its C# keyword.
pub fn translate_modifier(modifier: &Modifier) -> &'static str {
    match modifier {
        Modifier::Pub => "public",
        Modifier::Protect => "protected",
        Modifier::Virtual => "virtual",
        Modifier::Noinst => "static",
        Modifier::Other(_) => NOT_IMPLEMENTED,
    }
}

/// C# accessor keyword for a property accessor key.
///
/// Non-standard keys fall back to their first three characters.
// FIXME: the fallback only yields valid C# for get/set-prefixed keys; `init` becomes `ini`.
pub fn accessor_keyword(kind: &AccessorKind) -> Cow<'_, str> {
    match kind {
        AccessorKind::Get => Cow::Borrowed("get"),
        AccessorKind::Set => Cow::Borrowed("set"),
        AccessorKind::Other(key) => Cow::Owned(key.chars().take(3).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_modifiers() {
        assert_eq!(translate_modifier(&Modifier::from("pub")), "public");
        assert_eq!(translate_modifier(&Modifier::from("protect")), "protected");
        assert_eq!(translate_modifier(&Modifier::from("virtual")), "virtual");
        assert_eq!(translate_modifier(&Modifier::from("noinst")), "static");
    }

    #[test]
    fn test_unknown_modifier_is_placeholder() {
        assert_eq!(translate_modifier(&Modifier::from("sealed")), NOT_IMPLEMENTED);
        assert_eq!(translate_modifier(&Modifier::from("")), NOT_IMPLEMENTED);
    }

    #[test]
    fn test_accessor_keywords() {
        assert_eq!(accessor_keyword(&AccessorKind::Get), "get");
        assert_eq!(accessor_keyword(&AccessorKind::Set), "set");
        assert_eq!(accessor_keyword(&AccessorKind::from("getter")), "get");
        assert_eq!(accessor_keyword(&AccessorKind::from("init")), "ini");
        assert_eq!(accessor_keyword(&AccessorKind::from("go")), "go");
    }
}
