//! Topic derivation from a free-form business idea.

use std::collections::HashSet;

/// Topics derived per report.
pub const MAX_TOPICS: usize = 5;

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "for", "with", "without", "to", "of", "in", "on", "at",
    "by", "from", "into", "onto", "via", "per", "as", "is", "are", "be", "that", "this", "these",
    "those", "it", "its", "my", "our", "your", "their", "who", "which", "what", "where", "when",
    "how", "app", "apps", "platform", "service", "services", "tool", "tools", "business",
    "startup", "company", "online", "based", "new", "like", "using", "help", "helps", "people",
    "users", "customers", "small", "local",
];

fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Topics for community search: the whole idea, then compound phrases,
/// then remaining meaningful words.
///
/// A bigram is kept when neither end is a stop word, so "car wash" stays
/// together instead of splitting into "car" and "wash". Words already
/// covered by a kept bigram are not repeated.
pub fn derive_topics(idea: &str) -> Vec<String> {
    let idea = idea.trim();
    let words: Vec<String> = idea
        .split(|c: char| !c.is_alphanumeric() && c != '-' && c != '\'')
        .map(|w| w.trim_matches(|c: char| c == '-' || c == '\'').to_lowercase())
        .filter(|w| !w.is_empty())
        .collect();

    let mut bigrams: Vec<String> = Vec::new();
    let mut covered: HashSet<&str> = HashSet::new();
    for pair in words.windows(2) {
        let (first, second) = (pair[0].as_str(), pair[1].as_str());
        if is_stop_word(first) || is_stop_word(second) {
            continue;
        }
        bigrams.push(format!("{} {}", first, second));
        covered.insert(first);
        covered.insert(second);
    }

    let singles = words
        .iter()
        .filter(|w| !is_stop_word(w) && w.chars().count() > 2 && !covered.contains(w.as_str()))
        .cloned();

    if bigrams.is_empty() && words.iter().all(|w| is_stop_word(w)) {
        return vec![idea.to_string()];
    }

    let mut seen: HashSet<String> = HashSet::new();
    std::iter::once(idea.to_string())
        .chain(bigrams)
        .chain(singles)
        .filter(|topic| seen.insert(topic.to_lowercase()))
        .take(MAX_TOPICS)
        .collect()
}
