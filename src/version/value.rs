//! Comparable version values
//!
//! Versions are split into segments (numbers, pre-release markers, words,
//! patch and post-release markers) and compared segment by segment.
//! Zero components that are not followed by another number carry no weight,
//! so `1.0`, `1.0.0` and `1` are equal and `1.0rc1` equals `1rc1`.

use std::cmp::Ordering;
use std::fmt;

/// Pre-release stage, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Dev,
    Alpha,
    Beta,
    Pre,
    Rc,
}

impl Stage {
    fn as_str(&self) -> &'static str {
        match self {
            Stage::Dev => "dev",
            Stage::Alpha => "alpha",
            Stage::Beta => "beta",
            Stage::Pre => "pre",
            Stage::Rc => "rc",
        }
    }
}

/// One comparable component of a version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Number(u64),
    PreRelease(Stage, u64),
    Text(String),
    Patch(u64),
    Post(u64),
}

impl Segment {
    /// Position in the segment alphabet. The end of a version sits between
    /// pre-releases and everything else.
    fn rank(&self) -> u8 {
        match self {
            Segment::PreRelease(..) => 0,
            Segment::Text(_) => 2,
            Segment::Patch(_) => 3,
            Segment::Post(_) => 4,
            Segment::Number(_) => 5,
        }
    }
}

const END_RANK: u8 = 1;

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Segment::Number(a), Segment::Number(b)) => a.cmp(b),
            (Segment::PreRelease(sa, na), Segment::PreRelease(sb, nb)) => {
                sa.cmp(sb).then(na.cmp(nb))
            }
            (Segment::Text(a), Segment::Text(b)) => a.cmp(b),
            (Segment::Patch(a), Segment::Patch(b)) => a.cmp(b),
            (Segment::Post(a), Segment::Post(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Number(n) => write!(f, "{}", n),
            Segment::PreRelease(stage, n) => write!(f, "{}{}", stage.as_str(), n),
            Segment::Text(s) => f.write_str(s),
            Segment::Patch(n) => write!(f, "p{}", n),
            Segment::Post(n) => write!(f, "post{}", n),
        }
    }
}

/// A parsed version string
///
/// Keeps the raw string for display. Equality and ordering only look at the
/// canonical segments.
#[derive(Debug, Clone)]
pub struct VersionValue {
    raw: String,
    segments: Vec<Segment>,
}

impl VersionValue {
    pub fn parse(raw: &str) -> Self {
        let segments = canonicalize(tokenize(raw));
        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    /// The string this value was parsed from
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Canonical rendering of the segments, joined by `.`
    pub fn normalized(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl PartialEq for VersionValue {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl Eq for VersionValue {}

impl Ord for VersionValue {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        for i in 0..len {
            let ord = match (self.segments.get(i), other.segments.get(i)) {
                (Some(a), Some(b)) => a.cmp(b),
                (Some(a), None) => a.rank().cmp(&END_RANK),
                (None, Some(b)) => END_RANK.cmp(&b.rank()),
                (None, None) => Ordering::Equal,
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for VersionValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VersionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for VersionValue {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

fn tokenize(raw: &str) -> Vec<Segment> {
    let lower = raw.trim().to_ascii_lowercase();
    let mut rest = lower.as_str();
    if let Some(stripped) = rest.strip_prefix('v')
        && stripped.starts_with(|c: char| c.is_ascii_digit())
    {
        rest = stripped;
    }

    let chars: Vec<char> = rest.chars().collect();
    let mut segments = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let digits: String = chars[start..i].iter().collect();
            segments.push(Segment::Number(parse_number(&digits)));
        } else if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let digit_start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let digits: String = chars[digit_start..i].iter().collect();

            match classify_word(&word, &digits) {
                Some(segment) => segments.push(segment),
                None => {
                    segments.push(Segment::Text(word));
                    if !digits.is_empty() {
                        segments.push(Segment::Number(parse_number(&digits)));
                    }
                }
            }
        } else {
            i += 1;
        }
    }

    segments
}

/// Recognize release markers. Single letters only count as markers when a
/// number follows (`a1` is an alpha, a bare `a` is a letter suffix).
fn classify_word(word: &str, digits: &str) -> Option<Segment> {
    let n = parse_number(digits);
    let has_digits = !digits.is_empty();
    match word {
        "dev" => Some(Segment::PreRelease(Stage::Dev, n)),
        "alpha" => Some(Segment::PreRelease(Stage::Alpha, n)),
        "a" if has_digits => Some(Segment::PreRelease(Stage::Alpha, n)),
        "beta" => Some(Segment::PreRelease(Stage::Beta, n)),
        "b" if has_digits => Some(Segment::PreRelease(Stage::Beta, n)),
        "pre" | "preview" => Some(Segment::PreRelease(Stage::Pre, n)),
        "rc" => Some(Segment::PreRelease(Stage::Rc, n)),
        "p" | "patch" | "pl" => Some(Segment::Patch(n)),
        "post" => Some(Segment::Post(n)),
        _ => None,
    }
}

fn parse_number(digits: &str) -> u64 {
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

fn canonicalize(segments: Vec<Segment>) -> Vec<Segment> {
    let mut out = Vec::with_capacity(segments.len());
    for (i, segment) in segments.iter().enumerate() {
        if *segment == Segment::Number(0) {
            // A run of zeros is only significant when a number follows it.
            let after_run = segments[i..].iter().find(|s| **s != Segment::Number(0));
            if !matches!(after_run, Some(Segment::Number(_))) {
                continue;
            }
        }
        out.push(segment.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn v(s: &str) -> VersionValue {
        VersionValue::parse(s)
    }

    #[rstest]
    #[case("1.9", "1.10")]
    #[case("1.2.3", "1.2.4")]
    #[case("1.2", "1.2.1")]
    #[case("1", "1.0.1")]
    #[case("1.0rc1", "1.0")]
    #[case("1.0rc1", "1.0rc2")]
    #[case("1.0alpha", "1.0beta")]
    #[case("1.0beta2", "1.0-rc.1")]
    #[case("2.0-beta", "2.0.1")]
    #[case("1.0.2", "1.0.2a")]
    #[case("1.0.2a", "1.0.2b")]
    #[case("1.0.2z", "1.0.3")]
    #[case("1.2", "1.2-release")]
    #[case("1.2", "1.2p1")]
    #[case("1.2p1", "1.2.post1")]
    #[case("1.5.0", "1.5.0-1")]
    #[case("0.9.9", "v1.0")]
    fn orders_lower_before_higher(#[case] lower: &str, #[case] higher: &str) {
        assert!(v(lower) < v(higher), "{} < {}", lower, higher);
        assert!(v(higher) > v(lower), "{} > {}", higher, lower);
    }

    #[rstest]
    #[case("1.0", "1.0.0")]
    #[case("1", "1.0")]
    #[case("v2.3", "2.3")]
    #[case("1.0RC1", "1.0rc1")]
    #[case("1.0rc1", "1rc1")]
    #[case("1_2_3", "1.2.3")]
    fn treats_equivalent_spellings_as_equal(#[case] a: &str, #[case] b: &str) {
        assert_eq!(v(a), v(b));
        assert_eq!(v(a).cmp(&v(b)), Ordering::Equal);
    }

    #[test]
    fn keeps_raw_string_for_display() {
        assert_eq!(v("v1.2.0").to_string(), "v1.2.0");
        assert_eq!(v("v1.2.0").raw(), "v1.2.0");
    }

    #[rstest]
    #[case("1.2.3", "1.2.3")]
    #[case("v1.0", "1")]
    #[case("1.0rc1", "1.rc1")]
    #[case("1.0.2a", "1.0.2.a")]
    #[case("2.4b3", "2.4.beta3")]
    #[case("3.1-p2", "3.1.p2")]
    fn normalized_renders_canonical_segments(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(v(input).normalized(), expected);
    }

    #[rstest]
    #[case("1.2.3")]
    #[case("1.0.0-rc.1")]
    #[case("2.4b3")]
    #[case("abc3.1")]
    #[case("1.0.2a")]
    #[case("5.0.post2")]
    #[case("10.0-dev")]
    fn normalized_form_reparses_to_equal_value(#[case] input: &str) {
        let value = v(input);
        let reparsed = v(&value.normalized());
        assert_eq!(value, reparsed);
        assert_eq!(reparsed.normalized(), value.normalized());
    }

    #[test]
    fn ordering_is_transitive_across_mixed_forms() {
        let mut values: Vec<VersionValue> = [
            "1.0.0.1", "1.0a", "1.0", "1.0rc1", "1.0.1", "1.0-beta", "1.0p1", "0.99",
        ]
        .iter()
        .map(|s| v(s))
        .collect();
        values.sort();

        let sorted: Vec<&str> = values.iter().map(|v| v.raw()).collect();
        assert_eq!(
            sorted,
            vec![
                "0.99", "1.0-beta", "1.0rc1", "1.0", "1.0a", "1.0p1", "1.0.0.1", "1.0.1"
            ]
        );

        for a in &values {
            for b in &values {
                for c in &values {
                    if a <= b && b <= c {
                        assert!(a <= c, "{} <= {} <= {}", a, b, c);
                    }
                }
            }
        }
    }

    #[test]
    fn empty_input_parses_to_empty_value() {
        assert!(v("").is_empty());
        assert!(v("").cmp(&v("0.1")) == Ordering::Less);
    }

    #[test]
    fn huge_numbers_saturate_instead_of_failing() {
        assert!(v("99999999999999999999999") > v("20201018"));
    }
}
