use regex::Regex;

/// Companies whose stock coverage frequently drags other tickers into a
/// headline. A headline centered on one of these is rejected unless it
/// is the requested symbol itself.
const CROWDED_NAMES: &[&str] = &[
    "rivian", "nvidia", "apple", "amazon", "meta", "microsoft", "alphabet", "google",
];

const COMPANY_SUFFIXES: &[&str] = &[" inc", " corporation", " corp", " ltd", " llc"];

/// Decides whether a headline is actually about the requested symbol:
/// word-boundary ticker mentions, the `(TICKER)` form, `<ticker> stock`,
/// or the company name with common suffixes stripped.
pub struct RelevanceMatcher {
    ticker_lower: String,
    ticker_word: Option<Regex>,
    ticker_parens: Option<Regex>,
    ticker_stock: Option<Regex>,
    company_names: Vec<Regex>,
}

impl RelevanceMatcher {
    pub fn new(ticker: &str, company_name: Option<&str>) -> Self {
        let escaped = regex::escape(&ticker.to_lowercase());
        let company_names = company_name
            .map(|name| {
                let base = name.to_lowercase();
                let mut variants = vec![base.clone()];
                for suffix in COMPANY_SUFFIXES {
                    if let Some(stripped) = base.strip_suffix(suffix) {
                        variants.push(stripped.to_string());
                    }
                }
                variants
                    .iter()
                    .filter_map(|v| Regex::new(&format!(r"\b{}\b", regex::escape(v))).ok())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            ticker_lower: ticker.to_lowercase(),
            ticker_word: Regex::new(&format!(r"\b{}\b", escaped)).ok(),
            ticker_parens: Regex::new(&format!(r"\({}\)", regex::escape(&ticker.to_uppercase())))
                .ok(),
            ticker_stock: Regex::new(&format!(r"\b{} stock\b", escaped)).ok(),
            company_names,
        }
    }

    pub fn is_relevant(&self, headline: &str) -> bool {
        let lower = headline.to_lowercase();

        let matches = |re: &Option<Regex>, text: &str| {
            re.as_ref().map(|r| r.is_match(text)).unwrap_or(false)
        };

        if matches(&self.ticker_stock, &lower) {
            return true;
        }

        if matches(&self.ticker_word, &lower) || matches(&self.ticker_parens, headline) {
            return !self.rival_is_subject(&lower);
        }

        if self.company_names.iter().any(|re| re.is_match(&lower)) {
            return !self.rival_is_subject(&lower);
        }

        false
    }

    /// True when another company's stock is the headline's main subject.
    fn rival_is_subject(&self, lower: &str) -> bool {
        CROWDED_NAMES
            .iter()
            .filter(|name| **name != self.ticker_lower)
            .any(|name| lower.contains(&format!("{} stock", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_word_boundary_matches() {
        let matcher = RelevanceMatcher::new("UPS", None);
        assert!(matcher.is_relevant("UPS beats delivery estimates"));
        assert!(matcher.is_relevant("Shares of United Parcel (UPS) climb"));
        // "ups" inside a word is not a mention.
        assert!(!matcher.is_relevant("Startups raise record funding"));
    }

    #[test]
    fn ticker_stock_form_matches() {
        let matcher = RelevanceMatcher::new("F", None);
        assert!(matcher.is_relevant("Why F stock moved today"));
        assert!(!matcher.is_relevant("Failing grades for new sedans"));
    }

    #[test]
    fn company_name_with_suffix_stripped() {
        let matcher = RelevanceMatcher::new("UPS", Some("United Parcel Service Inc"));
        assert!(matcher.is_relevant("United Parcel Service announces buyback"));
    }

    #[test]
    fn rival_stock_as_subject_rejected() {
        let matcher = RelevanceMatcher::new("UPS", None);
        assert!(!matcher.is_relevant("Nvidia stock soars; UPS also traded higher"));
    }
}
