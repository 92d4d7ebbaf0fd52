//! Static color and pattern pairing rules.

/// Colors that pair with anything
pub const NEUTRAL_COLORS: &[&str] = &["black", "white", "gray", "beige", "tan", "cream", "navy"];

/// Color groups that complement each other across the pair
const COMPLEMENTARY_COLORS: &[(&[&str], &[&str])] = &[
    (&["blue"], &["orange", "brown"]),
    (&["red"], &["green"]),
    (&["yellow"], &["purple"]),
    (&["pink"], &["olive", "green"]),
];

/// Base color followed by its variants
const COLOR_FAMILIES: &[&[&str]] = &[
    &["blue", "lightblue", "navy", "skyblue", "teal", "cyan"],
    &["red", "maroon", "crimson", "burgundy", "pink"],
    &["green", "olive", "lime", "forest", "mint", "emerald"],
    &["purple", "lavender", "violet", "plum", "mauve"],
    &["yellow", "gold", "mustard", "amber"],
    &["orange", "peach", "coral", "salmon"],
    &["brown", "tan", "beige", "khaki", "camel"],
    &["gray", "silver", "charcoal"],
];

/// Patterns that should not be worn together
const PATTERN_CLASHES: &[(&str, &[&str])] = &[
    ("stripes", &["plaid", "polka", "busy", "geometric"]),
    ("plaid", &["stripes", "polka", "floral", "busy", "geometric"]),
    ("polka", &["stripes", "plaid", "busy", "geometric"]),
    ("floral", &["plaid", "busy", "geometric", "animal"]),
    ("animal", &["floral", "busy", "geometric", "tropical"]),
    ("camo", &["animal", "plaid", "tropical"]),
    ("tropical", &["plaid", "animal", "camo", "busy"]),
    ("geometric", &["stripes", "plaid", "polka", "floral", "busy"]),
    (
        "busy",
        &["stripes", "plaid", "polka", "floral", "geometric", "tropical", "animal"],
    ),
];

/// Patterns that pair well with the listed ones
const PATTERN_COMPLEMENTS: &[(&str, &[&str])] = &[
    (
        "solid",
        &["stripes", "plaid", "polka", "floral", "animal", "camo", "tropical", "geometric"],
    ),
    ("minimal", &["stripes", "plaid", "polka", "floral", "animal", "geometric"]),
    ("striped", &["solid", "minimal"]),
    ("textured", &["solid", "minimal"]),
];

/// Patterns that are too loud to repeat within one outfit
const BUSY_PATTERNS: &[&str] = &["busy", "geometric", "plaid"];

const SOLID: &str = "solid";

fn normalize<S: AsRef<str>>(colors: &[S]) -> Vec<String> {
    colors.iter().map(|c| c.as_ref().trim().to_lowercase()).collect()
}

fn any_in(colors: &[String], group: &[&str]) -> bool {
    colors.iter().any(|c| group.contains(&c.as_str()))
}

/// Whether two sets of colors can be worn together
///
/// Compatible when either side has a neutral, the sides straddle a complementary
/// pair, or both sides share a color family.
pub fn colors_compatible<A: AsRef<str>, B: AsRef<str>>(first: &[A], second: &[B]) -> bool {
    let first = normalize(first);
    let second = normalize(second);

    if any_in(&first, NEUTRAL_COLORS) || any_in(&second, NEUTRAL_COLORS) {
        return true;
    }

    let complementary = COMPLEMENTARY_COLORS.iter().any(|(left, right)| {
        (any_in(&first, left) && any_in(&second, right))
            || (any_in(&first, right) && any_in(&second, left))
    });
    if complementary {
        return true;
    }

    COLOR_FAMILIES
        .iter()
        .any(|family| any_in(&first, family) && any_in(&second, family))
}

fn listed(table: &[(&str, &[&str])], key: &str, value: &str) -> bool {
    table
        .iter()
        .any(|(base, others)| *base == key && others.contains(&value))
}

/// Whether two patterns can be worn together, with a pairing score in `[0, 1]`
///
/// A missing pattern counts as solid. Scores: 1.0 solid with anything, 0.9
/// complementary, 0.7 same pattern, 0.5 neutral, 0.2 repeated busy pattern, 0.0 clash.
pub fn patterns_compatible(first: Option<&str>, second: Option<&str>) -> (bool, f64) {
    let resolve = |p: Option<&str>| {
        p.map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| SOLID.to_string())
    };
    let first = resolve(first);
    let second = resolve(second);

    if first == second {
        if BUSY_PATTERNS.contains(&first.as_str()) {
            return (false, 0.2);
        }
        return (true, 0.7);
    }

    if first == SOLID || second == SOLID {
        return (true, 1.0);
    }

    if listed(PATTERN_COMPLEMENTS, &first, &second) || listed(PATTERN_COMPLEMENTS, &second, &first) {
        return (true, 0.9);
    }

    if listed(PATTERN_CLASHES, &first, &second) || listed(PATTERN_CLASHES, &second, &first) {
        return (false, 0.0);
    }

    (true, 0.5)
}

/// Whether the pattern appears in the pairing tables
pub fn is_known_pattern(pattern: &str) -> bool {
    let pattern = pattern.trim().to_lowercase();
    PATTERN_CLASHES
        .iter()
        .chain(PATTERN_COMPLEMENTS)
        .any(|(base, others)| *base == pattern || others.contains(&pattern.as_str()))
}
