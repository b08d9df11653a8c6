//! Character identity normalization.
//!
//! Source tables spell the same character several ways (`tft15_kaisa`,
//! `TFT15_Kai_Sa`, `TFT15_KaiSa`). [`IdentityNormalizer`] folds them onto one
//! canonical id through an ordered rule table. The first rule that recognizes
//! an id wins; ids no rule recognizes pass through untouched.
//!
//! Normalization is idempotent: feeding a canonical id back in returns it
//! unchanged. Matching is case-insensitive, but the structural rule keeps the
//! existing casing of the name so `TFT15_MissFortune` survives a second pass.

use std::sync::LazyLock;

use regex::Regex;

/// Set prefix assumed for bare names such as `Ashe`.
pub const DEFAULT_SET_PREFIX: &str = "TFT15_";

static SET_PREFIXED_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[Tt][Ff][Tt]_?([0-9]+)_?([A-Za-z0-9_]+)$").expect("valid set-prefixed id regex")
});

/// Fragment overrides for names whose internal capitals cannot be recovered
/// from a lowercase spelling. Each canonical id contains its own fragment.
const DEFAULT_FRAGMENTS: &[(&str, &str)] = &[
    ("lulu", "TFT15_Lulu"),
    ("kogmaw", "TFT15_KogMaw"),
    ("rammus", "TFT15_Rammus"),
    ("leesin", "TFT15_LeeSin"),
    ("drmundo", "TFT15_DrMundo"),
    ("jarvaniv", "TFT15_JarvanIV"),
    ("twistedfate", "TFT15_TwistedFate"),
    ("xinzhao", "TFT15_XinZhao"),
    ("ksante", "TFT15_KSante"),
    ("kaisa", "TFT15_KaiSa"),
];

/// A single normalization rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityRule {
    /// Any id whose lowercase, underscore-free spelling contains `fragment`
    /// maps to `canonical`.
    Fragment { fragment: String, canonical: String },
    /// `tft<set>[_]<name>` becomes `TFT<set>_<Name>`, with the first letter
    /// of every underscore-separated name segment upper-cased and the
    /// separators dropped.
    SetPrefixed,
}

impl IdentityRule {
    pub fn fragment(fragment: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self::Fragment {
            fragment: fragment.into().to_lowercase(),
            canonical: canonical.into(),
        }
    }

    fn apply(&self, trimmed: &str, compact: &str) -> Option<String> {
        match self {
            Self::Fragment {
                fragment,
                canonical,
            } => compact.contains(fragment.as_str()).then(|| canonical.clone()),
            Self::SetPrefixed => {
                let captures = SET_PREFIXED_ID.captures(trimmed)?;
                let set = captures.get(1)?.as_str();
                let name = captures.get(2)?.as_str();
                Some(format!("TFT{set}_{}", canonical_name(name)))
            }
        }
    }
}

/// Name part of a set-prefixed id.
///
/// A name without lower-case letters is shouting, so it is folded to lower
/// case first. The fold is skipped when it would come out all upper-case
/// again, which keeps the rewrite idempotent.
fn canonical_name(name: &str) -> String {
    if name.chars().any(|ch| ch.is_ascii_lowercase()) {
        return pascal_segments(name);
    }
    let folded = pascal_segments(&name.to_ascii_lowercase());
    if folded.chars().any(|ch| ch.is_ascii_lowercase()) {
        folded
    } else {
        pascal_segments(name)
    }
}

/// Upper-cases a leading letter and every letter that follows an underscore,
/// dropping those underscores. Other characters keep their case.
fn pascal_segments(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    let mut at_start = true;
    while let Some(ch) = chars.next() {
        if at_start && ch.is_ascii_lowercase() {
            out.push(ch.to_ascii_uppercase());
        } else if ch == '_' && chars.peek().is_some_and(char::is_ascii_lowercase) {
            if let Some(next) = chars.next() {
                out.push(next.to_ascii_uppercase());
            }
        } else {
            out.push(ch);
        }
        at_start = false;
    }
    out
}

/// Ordered rule table mapping raw character ids onto canonical ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityNormalizer {
    rules: Vec<IdentityRule>,
}

impl Default for IdentityNormalizer {
    fn default() -> Self {
        let mut rules: Vec<IdentityRule> = DEFAULT_FRAGMENTS
            .iter()
            .map(|(fragment, canonical)| IdentityRule::fragment(*fragment, *canonical))
            .collect();
        rules.push(IdentityRule::SetPrefixed);
        Self { rules }
    }
}

impl IdentityNormalizer {
    pub fn new(rules: Vec<IdentityRule>) -> Self {
        Self { rules }
    }

    /// Inserts a rule ahead of the existing ones.
    pub fn with_rule(mut self, rule: IdentityRule) -> Self {
        self.rules.insert(0, rule);
        self
    }

    pub fn rules(&self) -> &[IdentityRule] {
        &self.rules
    }

    /// Canonical id for `raw`, or `raw` itself when no rule applies.
    pub fn normalize(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return raw.to_string();
        }
        let compact: String = trimmed
            .to_lowercase()
            .chars()
            .filter(|ch| *ch != '_')
            .collect();
        self.rules
            .iter()
            .find_map(|rule| rule.apply(trimmed, &compact))
            .unwrap_or_else(|| raw.to_string())
    }
}

/// The part of an id after its last underscore, e.g. `KaiSa` for
/// `TFT15_KaiSa`. Ids without a usable suffix are returned whole.
pub fn display_name(id: &str) -> &str {
    id.rsplit('_')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(id)
}
