//! Wildmat pattern matching (RFC 3977 Section 4.2) for `LIST ACTIVE`,
//! `NEWGROUPS`, and similar group-name filtering.
//!
//! A wildmat is a comma-separated list of patterns, each built from `*`
//! (any run of characters), `?` (any single character), and literals;
//! patterns prefixed with `!` negate. Ported from `wildmat.go`: each `!`
//! pattern starts a new "negative" rule set that applies to every positive
//! pattern preceding it, so `compile` turns each rule set into one anchored
//! positive regex and one anchored negative regex, the way the origin does.

use regex::Regex;

use crate::error::{NntpError, Result};

/// One `(positive OR positive OR ...) AND NOT (negative OR negative OR ...)`
/// clause within a wildmat.
struct RuleSet {
    positive: Regex,
    negative: Regex,
}

impl RuleSet {
    fn matches(&self, s: &str) -> bool {
        self.positive.is_match(s) && !self.negative.is_match(s)
    }
}

/// A compiled wildmat: matches if any of its rule sets match.
pub struct WildMat {
    rule_sets: Vec<RuleSet>,
}

impl WildMat {
    /// Parses and compiles a wildmat pattern string in one step.
    pub fn compile(pattern: &str) -> Result<Self> {
        let groups = group_patterns(pattern);
        let mut rule_sets = Vec::with_capacity(groups.len());
        for group in groups {
            let positive = compile_alternation(&group.positive)?;
            let negative = compile_alternation(&group.negative)?;
            rule_sets.push(RuleSet { positive, negative });
        }
        Ok(WildMat { rule_sets })
    }

    /// Whether `s` matches any rule set in this wildmat.
    pub fn matches(&self, s: &str) -> bool {
        self.rule_sets.iter().any(|rs| rs.matches(s))
    }
}

struct PatternGroup {
    positive: Vec<String>,
    negative: Vec<String>,
}

/// Splits a wildmat on commas and groups the patterns into rule sets: a
/// negative (`!`-prefixed) pattern attaches to the rule set built from the
/// positive patterns seen since the last negative-to-positive transition.
/// A positive pattern seen right after a negative one starts a *new* rule
/// set, matching `ParseWildMat`'s behavior.
fn group_patterns(wm: &str) -> Vec<PatternGroup> {
    let mut groups = vec![PatternGroup {
        positive: Vec::new(),
        negative: Vec::new(),
    }];
    let mut positive_phase = true;
    for elem in wm.split(',') {
        if elem.is_empty() {
            continue;
        }
        if let Some(rest) = elem.strip_prefix('!') {
            positive_phase = false;
            groups.last_mut().unwrap().negative.push(rest.to_string());
        } else {
            if !positive_phase {
                groups.push(PatternGroup {
                    positive: Vec::new(),
                    negative: Vec::new(),
                });
                positive_phase = true;
            }
            groups.last_mut().unwrap().positive.push(elem.to_string());
        }
    }
    groups
}

/// Translates a set of wildmat patterns into one anchored alternation
/// regex: `^(part1|part2|...)$`. An empty pattern list compiles to `^()$`,
/// which (correctly) matches only the empty string.
fn compile_alternation(patterns: &[String]) -> Result<Regex> {
    let mut buf = String::from("^(");
    for (i, pat) in patterns.iter().enumerate() {
        if i > 0 {
            buf.push('|');
        }
        compile_pattern(&mut buf, pat);
    }
    buf.push_str(")$");
    Regex::new(&buf).map_err(|e| NntpError::Framing(format!("invalid wildmat pattern: {e}")))
}

/// Translates a single wildmat pattern's `*`/`?`/literal runs into a regex
/// fragment, escaping literal runs so embedded regex metacharacters (`.`,
/// `+`, etc, all valid in newsgroup names) aren't given special meaning.
fn compile_pattern(buf: &mut String, pattern: &str) {
    let mut chars = pattern.chars().peekable();
    let mut literal = String::new();
    let flush = |buf: &mut String, literal: &mut String| {
        if !literal.is_empty() {
            buf.push_str(&regex::escape(literal));
            literal.clear();
        }
    };
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                flush(buf, &mut literal);
                buf.push_str(".*");
            }
            '?' => {
                flush(buf, &mut literal);
                buf.push('.');
            }
            _ => literal.push(c),
        }
    }
    flush(buf, &mut literal);
}
