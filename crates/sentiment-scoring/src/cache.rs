use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use statement_core::HeadlineScore;

/// Bounded memo of per-headline scores, keyed by headline text.
///
/// Fixed capacity with least-recently-used eviction; capacity and policy
/// are part of the observable contract, so this is an explicit component
/// rather than a transparent cache.
pub struct ScoreCache {
    capacity: usize,
    inner: Mutex<Inner>,
}

struct Inner {
    scores: HashMap<String, HeadlineScore>,
    // Keys ordered least- to most-recently used.
    order: VecDeque<String>,
}

impl ScoreCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(Inner {
                scores: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    pub fn get(&self, headline: &str) -> Option<HeadlineScore> {
        let mut inner = self.inner.lock().ok()?;
        let score = inner.scores.get(headline).cloned()?;
        touch(&mut inner.order, headline);
        Some(score)
    }

    pub fn insert(&self, headline: &str, score: HeadlineScore) {
        if self.capacity == 0 {
            return;
        }
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        if inner.scores.contains_key(headline) {
            inner.scores.insert(headline.to_string(), score);
            touch(&mut inner.order, headline);
            return;
        }
        if inner.scores.len() >= self.capacity {
            if let Some(evicted) = inner.order.pop_front() {
                inner.scores.remove(&evicted);
            }
        }
        inner.scores.insert(headline.to_string(), score);
        inner.order.push_back(headline.to_string());
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|inner| inner.scores.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn touch(order: &mut VecDeque<String>, headline: &str) {
    if let Some(pos) = order.iter().position(|k| k == headline) {
        if let Some(key) = order.remove(pos) {
            order.push_back(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(value: f64) -> HeadlineScore {
        HeadlineScore {
            sentiment: value,
            contributions: Vec::new(),
        }
    }

    #[test]
    fn stores_and_returns_scores() {
        let cache = ScoreCache::new(4);
        assert!(cache.get("a").is_none());
        cache.insert("a", score(0.5));
        assert_eq!(cache.get("a").unwrap().sentiment, 0.5);
    }

    #[test]
    fn evicts_least_recently_used_at_capacity() {
        let cache = ScoreCache::new(2);
        cache.insert("a", score(0.1));
        cache.insert("b", score(0.2));

        // Touch "a" so "b" becomes the eviction candidate.
        cache.get("a");
        cache.insert("c", score(0.3));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn reinsert_updates_without_growing() {
        let cache = ScoreCache::new(2);
        cache.insert("a", score(0.1));
        cache.insert("a", score(0.9));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a").unwrap().sentiment, 0.9);
    }

    #[test]
    fn zero_capacity_disables_caching() {
        let cache = ScoreCache::new(0);
        cache.insert("a", score(0.1));
        assert!(cache.is_empty());
    }
}
