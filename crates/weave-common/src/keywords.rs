//! Identifier-spelling → keyword lookup.
//!
//! Mirrors the source compiler's own technique: hash the candidate spelling
//! with FNV-1a (64-bit), binary search a table sorted by hash, then compare
//! spellings directly to resolve any hash collisions. The table is built
//! once per process and cached in a `OnceLock`, rather than re-sorted on
//! every lookup.

use std::sync::OnceLock;

use crate::syntax_kind::SyntaxKind;

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// FNV-1a 64-bit hash, matching the reference compiler's `Fnv1a64`.
pub fn fnv1a64(value: &str) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in value.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

struct KeywordEntry {
    spelling: &'static str,
    hash: u64,
    kind: SyntaxKind,
}

const RAW_KEYWORDS: &[(&str, SyntaxKind)] = {
    use SyntaxKind::*;
    &[
        ("using", UsingKeyword),
        ("function", FunctionKeyword),
        ("delegate", DelegateKeyword),
        ("struct", StructKeyword),
        ("concept", ConceptKeyword),
        ("extend", ExtendKeyword),
        ("namespace", NamespaceKeyword),
        ("type", TypeKeyword),
        ("enum", EnumKeyword),
        ("var", VarKeyword),
        ("let", LetKeyword),
        ("const", ConstKeyword),
        ("return", ReturnKeyword),
        ("while", WhileKeyword),
        ("break", BreakKeyword),
        ("continue", ContinueKeyword),
        ("goto", GotoKeyword),
        ("yield", YieldKeyword),
        ("loop", LoopKeyword),
        ("for", ForKeyword),
        ("foreach", ForeachKeyword),
        ("checked", CheckedKeyword),
        ("unchecked", UncheckedKeyword),
        ("unsafe", UnsafeKeyword),
        ("lazy", LazyKeyword),
        ("if", IfKeyword),
        ("else", ElseKeyword),
        ("match", MatchKeyword),
        ("assert", AssertKeyword),
        ("eval", EvalKeyword),
        ("unreachable", UnreachableKeyword),
        ("typeof", TypeOfKeyword),
        ("sizeof", SizeOfKeyword),
        ("alignof", AlignOfKeyword),
        ("nameof", NameOfKeyword),
        ("addressof", AddressOfKeyword),
        ("false", FalseKeyword),
        ("true", TrueKeyword),
        ("self", SelfKeyword),
        ("as", AsKeyword),
        ("public", PublicKeyword),
        ("private", PrivateKeyword),
        ("internal", InternalKeyword),
        ("async", AsyncKeyword),
        ("discardable", DiscardableKeyword),
        ("dynamic", DynamicKeyword),
        ("explicit", ExplicitKeyword),
        ("export", ExportKeyword),
        ("extern", ExternKeyword),
        ("final", FinalKeyword),
        ("fixed", FixedKeyword),
        ("implicit", ImplicitKeyword),
        ("inline", InlineKeyword),
        ("native", NativeKeyword),
        ("override", OverrideKeyword),
        ("partial", PartialKeyword),
        ("precise", PreciseKeyword),
        ("pure", PureKeyword),
        ("readonly", ReadonlyKeyword),
        ("recursive", RecursiveKeyword),
        ("ref", RefKeyword),
        ("synchronized", SynchronizedKeyword),
        ("tailcall", TailCallKeyword),
        ("threadlocal", ThreadLocalKeyword),
        ("transient", TransientKeyword),
        ("trusted", TrustedKeyword),
        ("unaligned", UnalignedKeyword),
        ("uniform", UniformKeyword),
        ("params", ParamsKeyword),
        ("out", OutKeyword),
        ("in", InKeyword),
        ("move", MoveKeyword),
        ("mutable", MutableKeyword),
        ("restrict", RestrictKeyword),
        ("atomic", AtomicKeyword),
    ]
};

const RAW_CONTEXTUAL_KEYWORDS: &[(&str, SyntaxKind)] = {
    use SyntaxKind::*;
    &[
        ("where", WhereContextualKeyword),
        ("requires", RequiresContextualKeyword),
        ("ensures", EnsuresContextualKeyword),
        ("invariant", InvariantContextualKeyword),
    ]
};

fn build_table(raw: &[(&'static str, SyntaxKind)]) -> Vec<KeywordEntry> {
    let mut entries: Vec<KeywordEntry> = raw
        .iter()
        .map(|&(spelling, kind)| KeywordEntry {
            spelling,
            hash: fnv1a64(spelling),
            kind,
        })
        .collect();
    entries.sort_by(|a, b| a.hash.cmp(&b.hash).then_with(|| a.spelling.cmp(b.spelling)));
    entries
}

fn lookup(table: &[KeywordEntry], value: &str) -> Option<SyntaxKind> {
    let hash = fnv1a64(value);
    let start = table.partition_point(|e| e.hash < hash);
    table[start..]
        .iter()
        .take_while(|e| e.hash == hash)
        .find(|e| e.spelling == value)
        .map(|e| e.kind)
}

/// Map an identifier spelling to its reserved keyword kind, if any.
pub fn try_map_identifier_to_keyword(value: &str) -> Option<SyntaxKind> {
    static TABLE: OnceLock<Vec<KeywordEntry>> = OnceLock::new();
    let table = TABLE.get_or_init(|| build_table(RAW_KEYWORDS));
    lookup(table, value)
}

/// Map an identifier spelling to the contextual keyword it would be in a
/// recognizing position, if any. The lexer tags the identifier with this
/// kind but does not reclassify the token.
pub fn try_map_identifier_to_contextual_keyword(value: &str) -> Option<SyntaxKind> {
    static TABLE: OnceLock<Vec<KeywordEntry>> = OnceLock::new();
    let table = TABLE.get_or_init(|| build_table(RAW_CONTEXTUAL_KEYWORDS));
    lookup(table, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_keyword() {
        assert_eq!(
            try_map_identifier_to_keyword("function"),
            Some(SyntaxKind::FunctionKeyword)
        );
        assert_eq!(
            try_map_identifier_to_keyword("return"),
            Some(SyntaxKind::ReturnKeyword)
        );
    }

    #[test]
    fn rejects_non_keyword_identifier() {
        assert_eq!(try_map_identifier_to_keyword("frobnicate"), None);
    }

    #[test]
    fn contextual_keywords_are_a_separate_table() {
        assert_eq!(try_map_identifier_to_keyword("where"), None);
        assert_eq!(
            try_map_identifier_to_contextual_keyword("where"),
            Some(SyntaxKind::WhereContextualKeyword)
        );
    }

    #[test]
    fn every_raw_keyword_round_trips() {
        for &(spelling, kind) in RAW_KEYWORDS {
            assert_eq!(try_map_identifier_to_keyword(spelling), Some(kind));
        }
    }

    #[test]
    fn hash_is_stable_and_deterministic() {
        assert_eq!(fnv1a64("function"), fnv1a64("function"));
        assert_ne!(fnv1a64("function"), fnv1a64("struct"));
    }
}
