// Champion name canonicalization.
//
// Stat tables, the roster CSV and user input spell champion names in
// different ways ("Kai'Sa", "kaisa", "KaiSa", "monkeyking", "miss-fortune").
// `NameIndex` folds every known variant onto one display name, and
// `lookup_key` derives the key used to join independently-authored tables.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

// ---------------------------------------------------------------------------
// Known aliases
// ---------------------------------------------------------------------------

/// Spellings that cannot be derived from the display name. Keys are in
/// collapsed form (lowercase alphanumerics only).
const KNOWN_ALIASES: &[(&str, &str)] = &[
    ("nunu", "Nunu & Willump"),
    ("monkeyking", "Wukong"),
    ("renata", "Renata Glasc"),
    ("jarvan", "Jarvan IV"),
    ("mundo", "Dr. Mundo"),
    ("drmundo", "Dr. Mundo"),
    ("leblanc", "LeBlanc"),
    ("kaisa", "Kai'Sa"),
    ("ksante", "K'Sante"),
    ("belveth", "Bel'Veth"),
    ("chogath", "Cho'Gath"),
    ("velkoz", "Vel'Koz"),
    ("khazix", "Kha'Zix"),
    ("kogmaw", "Kog'Maw"),
    ("reksai", "Rek'Sai"),
    ("mf", "Miss Fortune"),
    ("tf", "Twisted Fate"),
    ("asol", "Aurelion Sol"),
];

// ---------------------------------------------------------------------------
// Resolution order
// ---------------------------------------------------------------------------

/// One strategy for mapping a raw spelling to a canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResolveStep {
    /// The input is exactly a known slug ("miss-fortune").
    ExactSlug,
    /// The collapsed input is in the alias table ("monkeyking").
    Alias,
    /// Case-insensitive match against a known name.
    Lowercase,
    /// Case- and diacritic-insensitive match.
    DiacriticFolded,
    /// Match on lowercase alphanumerics only ("kaisa" for "Kai'Sa").
    Collapsed,
    /// An unmatched identifier such as "BigNewChamp" is shown as
    /// "Big New Champ".
    CamelCase,
}

/// Order in which `NameIndex::resolve` tries its strategies. Anything that
/// falls through every step is echoed back with its first letter capitalized.
pub const RESOLVE_ORDER: [ResolveStep; 6] = [
    ResolveStep::ExactSlug,
    ResolveStep::Alias,
    ResolveStep::Lowercase,
    ResolveStep::DiacriticFolded,
    ResolveStep::Collapsed,
    ResolveStep::CamelCase,
];

/// Key derivations tried, in order, when looking a champion up inside a
/// stat table keyed by independently-authored identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKey {
    Raw,
    Resolved,
    LookupKey,
}

pub const CANDIDATE_KEYS: [CandidateKey; 3] = [
    CandidateKey::Raw,
    CandidateKey::Resolved,
    CandidateKey::LookupKey,
];

/// Outcome of a resolution, with the step that produced it (`None` for the
/// capitalized fallback or empty input).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub name: String,
    pub step: Option<ResolveStep>,
}

// ---------------------------------------------------------------------------
// Normalization helpers
// ---------------------------------------------------------------------------

/// Remove diacritics by decomposing (NFD) and dropping combining marks.
pub fn strip_diacritics(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Lowercase, diacritic-free alphanumerics only: "Kai'Sa" -> "kaisa".
pub fn collapse(s: &str) -> String {
    strip_diacritics(s)
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// URL-style slug: "Nunu & Willump" -> "nunu-willump".
pub fn slug(s: &str) -> String {
    let folded = strip_diacritics(s).to_lowercase();
    let mut out = String::with_capacity(folded.len());
    let mut pending_dash = false;
    for c in folded.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Join key for stat tables: diacritics stripped, non-alphanumerics removed,
/// first letter capitalized. "Dr. Mundo" -> "DrMundo".
pub fn lookup_key(raw: &str) -> String {
    let stripped: String = strip_diacritics(raw)
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect();
    capitalize_first(&stripped)
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Insert a space at every lowercase-to-uppercase boundary.
fn split_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;
    for c in s.chars() {
        if c.is_uppercase() && prev_lower {
            out.push(' ');
        }
        prev_lower = c.is_lowercase();
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// NameIndex
// ---------------------------------------------------------------------------

/// Reverse index from every observed spelling to one canonical display name.
///
/// Built once from the roster; immutable afterwards.
#[derive(Debug, Clone)]
pub struct NameIndex {
    by_slug: HashMap<String, String>,
    by_alias: HashMap<String, String>,
    by_lowercase: HashMap<String, String>,
    by_folded: HashMap<String, String>,
    by_collapsed: HashMap<String, String>,
    len: usize,
}

impl NameIndex {
    /// Build the index from roster display names. The first spelling seen for
    /// a variant wins.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = NameIndex {
            by_slug: HashMap::new(),
            by_alias: HashMap::new(),
            by_lowercase: HashMap::new(),
            by_folded: HashMap::new(),
            by_collapsed: HashMap::new(),
            len: 0,
        };

        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            let canonical = name.to_string();
            index
                .by_slug
                .entry(slug(name))
                .or_insert_with(|| canonical.clone());
            index
                .by_lowercase
                .entry(name.to_lowercase())
                .or_insert_with(|| canonical.clone());
            index
                .by_folded
                .entry(strip_diacritics(name).to_lowercase())
                .or_insert_with(|| canonical.clone());
            let collapsed = collapse(name);
            if !index.by_collapsed.contains_key(&collapsed) {
                index.by_collapsed.insert(collapsed, canonical);
                index.len += 1;
            }
        }

        for (alias, target) in KNOWN_ALIASES {
            // A roster champion literally spelled like the alias keeps its name.
            if index.by_collapsed.contains_key(*alias) {
                continue;
            }
            let canonical = index
                .by_collapsed
                .get(&collapse(target))
                .cloned()
                .unwrap_or_else(|| target.to_string());
            index
                .by_alias
                .entry(collapse(target))
                .or_insert_with(|| canonical.clone());
            index.by_alias.insert(alias.to_string(), canonical);
        }

        index
    }

    /// Number of distinct roster champions indexed.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Canonical display name for `raw`. Never fails: unknown names come back
    /// with their first letter capitalized; empty input yields "".
    pub fn resolve(&self, raw: &str) -> String {
        self.resolve_detailed(raw).name
    }

    /// Like [`resolve`](Self::resolve), also reporting which step matched.
    pub fn resolve_detailed(&self, raw: &str) -> Resolution {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Resolution {
                name: String::new(),
                step: None,
            };
        }

        for step in RESOLVE_ORDER {
            if let Some(name) = self.try_step(step, trimmed) {
                return Resolution {
                    name,
                    step: Some(step),
                };
            }
        }

        debug!("unresolved champion name '{}'", trimmed);
        Resolution {
            name: capitalize_first(trimmed),
            step: None,
        }
    }

    fn try_step(&self, step: ResolveStep, raw: &str) -> Option<String> {
        match step {
            ResolveStep::ExactSlug => self.by_slug.get(raw).cloned(),
            ResolveStep::Alias => self.by_alias.get(&collapse(raw)).cloned(),
            ResolveStep::Lowercase => self.by_lowercase.get(&raw.to_lowercase()).cloned(),
            ResolveStep::DiacriticFolded => self
                .by_folded
                .get(&strip_diacritics(raw).to_lowercase())
                .cloned(),
            ResolveStep::Collapsed => self.by_collapsed.get(&collapse(raw)).cloned(),
            ResolveStep::CamelCase => {
                // Only single-token identifiers; anything with spaces is
                // already as readable as it gets.
                if raw.contains(char::is_whitespace) {
                    return None;
                }
                let spaced = split_camel_case(raw);
                (spaced != raw).then(|| capitalize_first(&spaced))
            }
        }
    }

    /// Lowercased lookup candidates for `raw`, in [`CANDIDATE_KEYS`] order,
    /// without duplicates.
    pub fn candidate_keys(&self, raw: &str) -> Vec<String> {
        let mut keys: Vec<String> = Vec::with_capacity(CANDIDATE_KEYS.len());
        for kind in CANDIDATE_KEYS {
            let key = match kind {
                CandidateKey::Raw => raw.trim().to_lowercase(),
                CandidateKey::Resolved => self.resolve(raw).to_lowercase(),
                CandidateKey::LookupKey => lookup_key(raw).to_lowercase(),
            };
            if !key.is_empty() && !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }
}

impl Default for NameIndex {
    /// An index with no roster, still carrying the alias table.
    fn default() -> Self {
        NameIndex::new(std::iter::empty::<&str>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> NameIndex {
        NameIndex::new([
            "Aatrox",
            "Kai'Sa",
            "Dr. Mundo",
            "Miss Fortune",
            "Nunu & Willump",
            "Wukong",
            "LeBlanc",
            "Renata Glasc",
            "Jarvan IV",
        ])
    }

    #[test]
    fn lookup_key_strips_punctuation_and_diacritics() {
        assert_eq!(lookup_key("Kai'Sa"), "KaiSa");
        assert_eq!(lookup_key("Dr. Mundo"), "DrMundo");
        assert_eq!(lookup_key("Nunu & Willump"), "NunuWillump");
        assert_eq!(lookup_key("kogmaw"), "Kogmaw");
        assert_eq!(lookup_key("Séjuani"), "Sejuani");
        assert_eq!(lookup_key(""), "");
    }

    #[test]
    fn slug_and_collapse() {
        assert_eq!(slug("Nunu & Willump"), "nunu-willump");
        assert_eq!(slug("  Dr. Mundo "), "dr-mundo");
        assert_eq!(slug("Kai'Sa"), "kai-sa");
        assert_eq!(collapse("Kai'Sa"), "kaisa");
        assert_eq!(collapse("Ñunu"), "nunu");
    }

    #[test]
    fn resolve_each_step() {
        let idx = roster();
        let cases = [
            ("miss-fortune", "Miss Fortune", ResolveStep::ExactSlug),
            ("monkeyking", "Wukong", ResolveStep::Alias),
            ("nunu", "Nunu & Willump", ResolveStep::Alias),
            ("aatrox", "Aatrox", ResolveStep::ExactSlug),
            ("AATROX", "Aatrox", ResolveStep::Lowercase),
            ("kai'sá", "Kai'Sa", ResolveStep::DiacriticFolded),
            ("Aa'trox!", "Aatrox", ResolveStep::Collapsed),
            ("Miss_Fortune!", "Miss Fortune", ResolveStep::Alias),
        ];
        for (raw, expected, step) in cases {
            let res = idx.resolve_detailed(raw);
            assert_eq!(res.name, expected, "resolving {raw}");
            assert_eq!(res.step, Some(step), "step for {raw}");
        }
    }

    #[test]
    fn camel_case_identifier_is_spaced() {
        let idx = roster();
        let res = idx.resolve_detailed("BigNewChamp");
        assert_eq!(res.name, "Big New Champ");
        assert_eq!(res.step, Some(ResolveStep::CamelCase));
        assert_eq!(idx.resolve("sunnyGlade"), "Sunny Glade");
        // Known champions never reach this step.
        assert_eq!(idx.resolve("MissFortune"), "Miss Fortune");
    }

    #[test]
    fn alias_prefers_roster_spelling() {
        let idx = NameIndex::new(["Kai'sa"]);
        assert_eq!(idx.resolve("kaisa"), "Kai'sa");
        assert_eq!(idx.resolve("KaiSa"), "Kai'sa");
    }

    #[test]
    fn alias_works_without_roster() {
        let idx = NameIndex::default();
        assert!(idx.is_empty());
        assert_eq!(idx.resolve("MonkeyKing"), "Wukong");
        assert_eq!(idx.resolve("Wukong"), "Wukong");
    }

    #[test]
    fn unknown_name_is_capitalized_echo() {
        let idx = roster();
        let res = idx.resolve_detailed("newchamp");
        assert_eq!(res.name, "Newchamp");
        assert_eq!(res.step, None);
        assert_eq!(idx.resolve("  zeri the spark "), "Zeri the spark");
    }

    #[test]
    fn empty_input_resolves_to_empty() {
        let idx = roster();
        assert_eq!(idx.resolve(""), "");
        assert_eq!(idx.resolve("   "), "");
    }

    #[test]
    fn resolve_is_idempotent() {
        let idx = roster();
        let inputs = [
            "Aatrox", "aatrox", "kaisa", "Kai'Sa", "KAI SA", "dr-mundo", "DrMundo", "mundo",
            "nunu", "monkeyking", "MissFortune", "miss fortune", "mf", "jarvan", "unknown guy",
            "zZz", "ÉLISE", "x", "'", "123",
        ];
        for raw in inputs {
            let once = idx.resolve(raw);
            assert_eq!(idx.resolve(&once), once, "not idempotent for {raw:?}");
            if !raw.trim().is_empty() {
                assert!(!once.is_empty(), "empty resolution for {raw:?}");
            }
        }
    }

    #[test]
    fn roster_names_resolve_to_themselves() {
        let names = ["Aatrox", "Kai'Sa", "Dr. Mundo", "Miss Fortune", "Nunu & Willump", "Wukong"];
        let idx = NameIndex::new(names);
        for name in names {
            assert_eq!(idx.resolve(name), name);
        }
        assert_eq!(idx.len(), names.len());
    }

    #[test]
    fn candidate_keys_are_ordered_and_unique() {
        let idx = roster();
        assert_eq!(
            idx.candidate_keys("drmundo"),
            vec!["drmundo".to_string(), "dr. mundo".to_string()]
        );
        assert_eq!(
            idx.candidate_keys("Miss Fortune"),
            vec!["miss fortune".to_string(), "missfortune".to_string()]
        );
        assert!(idx.candidate_keys("").is_empty());
    }
}
