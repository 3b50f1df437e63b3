use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::tree::node::Node;

/// Default debounce between raw search input and the applied term, in
/// milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;
/// Terms shorter than this do not filter at all.
pub const DEFAULT_MIN_LENGTH: usize = 1;

/// Score head-start given to names that contain the term verbatim, so exact
/// substring hits always outrank weaker fuzzy matches.
const SUBSTRING_BONUS: i64 = 1_000;

/// Matching behavior for the filter engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Subsequence matching with ranked results instead of strict substring.
    pub fuzzy: bool,
    pub case_sensitive: bool,
    /// Minimum term length before filtering kicks in.
    pub min_length: usize,
    /// Delay between raw keystrokes and the applied term.
    pub debounce_ms: u64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            fuzzy: false,
            case_sensitive: false,
            min_length: DEFAULT_MIN_LENGTH,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// Return a pruned copy of `root` containing only nodes whose own name
/// matches `term`, or that have at least one retained descendant.
///
/// A directory whose own name matches keeps its entire subtree; one retained
/// only as an ancestor of deeper matches is pruned down to the matching
/// branches and carries no match score of its own. The input tree is never
/// mutated, so clearing the term restores the original structure exactly.
///
/// In fuzzy mode siblings are reordered: directly-matching entries first,
/// by descending score, then ancestor-only directories in insertion order.
/// Strict substring mode keeps storage order untouched.
pub fn filter_tree(root: &Node, term: &str, options: &SearchOptions) -> Node {
    let matcher = Matcher::new(term, options);
    match root.children() {
        Some(children) => Node::Dir(retain_level(children, &matcher)),
        None => Node::dir(),
    }
}

fn retain_level(children: &IndexMap<String, Node>, matcher: &Matcher) -> IndexMap<String, Node> {
    let mut kept: Vec<(String, Node, Option<i64>)> = Vec::new();
    for (name, node) in children {
        let score = matcher.score(name);
        match node {
            Node::Leaf => {
                if score.is_some() {
                    kept.push((name.clone(), Node::Leaf, score));
                }
            }
            Node::Dir(grandchildren) => {
                if score.is_some() {
                    kept.push((name.clone(), node.clone(), score));
                } else {
                    let retained = retain_level(grandchildren, matcher);
                    if !retained.is_empty() {
                        kept.push((name.clone(), Node::Dir(retained), None));
                    }
                }
            }
        }
    }
    if matcher.ranked() {
        // Stable: equal scores and all ancestor-only entries keep order.
        kept.sort_by_key(|(_, _, score)| std::cmp::Reverse(score.unwrap_or(i64::MIN)));
    }
    kept.into_iter().map(|(name, node, _)| (name, node)).collect()
}

/// Precompiled matching state for one filter pass.
struct Matcher {
    term: String,
    needle: String,
    case_sensitive: bool,
    skim: Option<SkimMatcherV2>,
}

impl Matcher {
    fn new(term: &str, options: &SearchOptions) -> Self {
        let skim = options.fuzzy.then(|| {
            let matcher = SkimMatcherV2::default();
            if options.case_sensitive {
                matcher.respect_case()
            } else {
                matcher.ignore_case()
            }
        });
        Self {
            term: term.to_string(),
            needle: if options.case_sensitive {
                term.to_string()
            } else {
                term.to_lowercase()
            },
            case_sensitive: options.case_sensitive,
            skim,
        }
    }

    fn ranked(&self) -> bool {
        self.skim.is_some()
    }

    /// `Some(score)` if `name` itself matches the term.
    fn score(&self, name: &str) -> Option<i64> {
        let contains = if self.case_sensitive {
            name.contains(&self.needle)
        } else {
            name.to_lowercase().contains(&self.needle)
        };
        match &self.skim {
            None => contains.then_some(0),
            Some(skim) => {
                let fuzzy = skim.fuzzy_match(name, &self.term);
                match (contains, fuzzy) {
                    (true, score) => Some(SUBSTRING_BONUS + score.unwrap_or(0)),
                    (false, score) => score,
                }
            }
        }
    }
}
