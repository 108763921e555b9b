//! Brand-name extraction for the conversational endpoint.
//!
//! The grammar is local policy, not a wire contract: the word `bounty` or
//! `bounties` followed by `for` takes the run of capitalized words after it
//! (or the single next word if none are capitalized); without a `for`, a
//! message that mentions bounties yields the first capitalized token that is
//! neither the leading token nor a trigger word.

const MAX_BRAND_WORDS: usize = 4;

pub fn extract_brand_name(text: &str) -> Option<String> {
    let words: Vec<&str> = text.split_whitespace().collect();

    for (i, word) in words.iter().enumerate() {
        if !is_trigger(word) {
            continue;
        }
        if words.get(i + 1).map(|w| clean(w).eq_ignore_ascii_case("for")) == Some(true) {
            if let Some(brand) = brand_after(&words[i + 2..]) {
                return Some(brand);
            }
        }
    }

    // No "bounties for X" phrasing; fall back to the first capitalized
    // token that is not the sentence opener and not a trigger word.
    if words.iter().any(|w| is_trigger(w)) {
        return words
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, w)| !is_trigger(w))
            .map(|(_, w)| clean(w))
            .find(|w| is_capitalized(w));
    }

    None
}

fn brand_after(words: &[&str]) -> Option<String> {
    let capitalized: Vec<String> = words
        .iter()
        .map(|w| clean(w))
        .take_while(|w| is_capitalized(w))
        .take(MAX_BRAND_WORDS)
        .collect();

    if !capitalized.is_empty() {
        return Some(capitalized.join(" "));
    }

    words
        .first()
        .map(|w| clean(w))
        .filter(|w| !w.is_empty())
}

fn is_trigger(word: &str) -> bool {
    let word = clean(word).to_ascii_lowercase();
    word == "bounty" || word == "bounties"
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_uppercase())
}

fn clean(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_brand_after_for() {
        assert_eq!(
            extract_brand_name("generate bounties for Apple"),
            Some("Apple".to_string())
        );
        assert_eq!(
            extract_brand_name("can you suggest a bounty for Tesla?"),
            Some("Tesla".to_string())
        );
    }

    #[test]
    fn extracts_multi_word_capitalized_brands() {
        assert_eq!(
            extract_brand_name("bounties for New Balance please"),
            Some("New Balance".to_string())
        );
    }

    #[test]
    fn lowercase_brand_after_for_takes_one_word() {
        assert_eq!(
            extract_brand_name("bounties for acme please"),
            Some("acme".to_string())
        );
    }

    #[test]
    fn falls_back_to_capitalized_token_near_trigger() {
        assert_eq!(
            extract_brand_name("bounties Nike please"),
            Some("Nike".to_string())
        );
        assert_eq!(
            extract_brand_name("I want Nike bounties"),
            Some("Nike".to_string())
        );
    }

    #[test]
    fn no_trigger_phrase_yields_nothing() {
        assert_eq!(extract_brand_name("hello"), None);
        assert_eq!(extract_brand_name("tell me about Apple"), None);
    }

    #[test]
    fn trigger_without_brand_yields_nothing() {
        assert_eq!(extract_brand_name("bounties"), None);
        assert_eq!(extract_brand_name("give me some bounties please"), None);
    }
}
