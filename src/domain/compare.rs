//! Universities picked for side-by-side comparison.

use serde::{Deserialize, Serialize};

use super::session::PERSIST_VERSION;

pub const MAX_COMPARE_ITEMS: usize = 4;

pub const COMPARE_COOKIE: &str = "university-compare-storage";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareList {
    #[serde(default)]
    compare_ids: Vec<i64>,
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    state: CompareList,
    #[serde(default)]
    version: u32,
}

impl CompareList {
    pub fn ids(&self) -> &[i64] {
        &self.compare_ids
    }

    pub fn len(&self) -> usize {
        self.compare_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compare_ids.is_empty()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.compare_ids.contains(&id)
    }

    pub fn can_add_more(&self) -> bool {
        self.compare_ids.len() < MAX_COMPARE_ITEMS
    }

    /// `false` when already present or the list is full.
    pub fn add(&mut self, id: i64) -> bool {
        if self.contains(id) || !self.can_add_more() {
            return false;
        }
        self.compare_ids.push(id);
        true
    }

    pub fn remove(&mut self, id: i64) {
        self.compare_ids.retain(|existing| *existing != id);
    }

    /// Returns whether `id` is in the list afterwards.
    pub fn toggle(&mut self, id: i64) -> bool {
        if self.contains(id) {
            self.remove(id);
            false
        } else {
            self.add(id)
        }
    }

    pub fn clear(&mut self) {
        self.compare_ids.clear();
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&Envelope {
            state: self.clone(),
            version: PERSIST_VERSION,
        })
    }

    /// Unreadable values give an empty list; ids past the limit are dropped.
    /// Percent-encoded cookie values are accepted.
    pub fn decode(raw: Option<&str>) -> Self {
        let mut stored = raw
            .and_then(|r| {
                serde_json::from_str::<Envelope>(r).ok().or_else(|| {
                    let decoded = urlencoding::decode(r).ok()?;
                    serde_json::from_str::<Envelope>(&decoded).ok()
                })
            })
            .map(|e| e.state)
            .unwrap_or_default();
        let mut unique = CompareList::default();
        for id in stored.compare_ids.drain(..) {
            unique.add(id);
        }
        unique
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caps_at_four_and_rejects_duplicates() {
        let mut list = CompareList::default();
        for id in 1..=4 {
            assert!(list.add(id));
        }
        assert!(!list.add(5));
        assert!(!list.add(2));
        assert_eq!(list.ids(), &[1, 2, 3, 4]);
        assert!(!list.can_add_more());
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut list = CompareList::default();
        assert!(list.toggle(9));
        assert!(!list.toggle(9));
        assert!(list.is_empty());
    }

    #[test]
    fn survives_a_cookie_round_trip() {
        let mut list = CompareList::default();
        list.add(10);
        list.add(20);
        let restored = CompareList::decode(Some(&list.encode().unwrap()));
        assert_eq!(restored, list);
        assert!(CompareList::decode(Some("nope")).is_empty());

        let encoded = "%7B%22state%22%3A%7B%22compareIds%22%3A%5B3%2C3%2C7%5D%7D%7D";
        assert_eq!(CompareList::decode(Some(encoded)).ids(), &[3, 7]);
    }
}
