use crate::models::{Category, RankRow};

/// Rows collected during one run, kept in fetch order.
///
/// A category appears at most once; inserting it again replaces its rows
/// without moving it.
#[derive(Debug, Default)]
pub struct RankStore {
    entries: Vec<(&'static Category, Vec<RankRow>)>,
}

impl RankStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: &'static Category, rows: Vec<RankRow>) {
        match self.entries.iter_mut().find(|(c, _)| c.key == category.key) {
            Some(entry) => entry.1 = rows,
            None => self.entries.push((category, rows)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[RankRow]> {
        self.entries
            .iter()
            .find(|(c, _)| c.key == key)
            .map(|(_, rows)| rows.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static Category, &[RankRow])> {
        self.entries.iter().map(|(c, rows)| (*c, rows.as_slice()))
    }

    /// Number of categories recorded, including empty ones
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_rows(&self) -> usize {
        self.entries.iter().map(|(_, rows)| rows.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{find_category, FilmRow};

    fn film(rank: &str) -> RankRow {
        RankRow::Film(FilmRow {
            rank: Some(rank.to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn keeps_insertion_order() {
        let mut store = RankStore::new();
        store.insert(find_category("tv").unwrap(), vec![film("1")]);
        store.insert(find_category("anime").unwrap(), vec![]);

        let keys: Vec<_> = store.iter().map(|(c, _)| c.key).collect();
        assert_eq!(keys, vec!["tv", "anime"]);
        assert_eq!(store.total_rows(), 1);
    }

    #[test]
    fn reinsert_replaces_in_place() {
        let mut store = RankStore::new();
        store.insert(find_category("tv").unwrap(), vec![film("1")]);
        store.insert(find_category("movie").unwrap(), vec![film("1")]);
        store.insert(find_category("tv").unwrap(), vec![film("1"), film("2")]);

        assert_eq!(store.len(), 2);
        assert_eq!(store.iter().next().map(|(c, _)| c.key), Some("tv"));
        assert_eq!(store.get("tv").map(|r| r.len()), Some(2));
    }
}
