//! Fixed-size chained hash table keyed by username.
//!
//! Bucket count is set once at construction and never changes. Records
//! are appended to their bucket's chain and never removed, which keeps
//! every [`AccountId`] valid for the lifetime of the directory.
//!
//! No uniqueness check happens on insert. A username registered twice
//! occupies two slots in the same chain and lookups return the earlier
//! one whenever both match.

use std::num::NonZeroUsize;

use crate::stores::Credentials;

/// Position of a record inside one directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId {
    pub bucket: usize,
    pub slot: usize,
}

#[derive(Debug)]
pub struct AccountDirectory<T> {
    buckets: Vec<Vec<T>>,
    bucket_count: NonZeroUsize,
    len: usize,
}

/// Sum of the username's character codes, reduced modulo `bucket_count`.
/// Names with equal sums always collide.
pub fn bucket_index(username: &str, bucket_count: NonZeroUsize) -> usize {
    let sum = username
        .chars()
        .fold(0u64, |acc, ch| acc.wrapping_add(u64::from(ch)));
    (sum % bucket_count.get() as u64) as usize
}

impl<T: Credentials> AccountDirectory<T> {
    pub fn new(bucket_count: NonZeroUsize) -> Self {
        Self {
            buckets: (0..bucket_count.get()).map(|_| Vec::new()).collect(),
            bucket_count,
            len: 0,
        }
    }

    pub fn bucket_count(&self) -> NonZeroUsize {
        self.bucket_count
    }

    pub fn bucket_index(&self, username: &str) -> usize {
        bucket_index(username, self.bucket_count)
    }

    /// Appends the record to the chain selected by its username.
    pub fn insert(&mut self, record: T) -> AccountId {
        let bucket = self.bucket_index(record.username());
        let chain = &mut self.buckets[bucket];
        chain.push(record);
        self.len += 1;
        AccountId {
            bucket,
            slot: chain.len() - 1,
        }
    }

    /// Scans the username's chain in insertion order for the first record
    /// matching both username and password.
    pub fn find(&self, username: &str, password: &str) -> Option<AccountId> {
        let bucket = self.bucket_index(username);
        self.buckets[bucket]
            .iter()
            .position(|record| record.matches(username, password))
            .map(|slot| AccountId { bucket, slot })
    }

    pub fn lookup(&self, username: &str, password: &str) -> Option<&T> {
        self.find(username, password).and_then(|id| self.get(id))
    }

    pub fn lookup_mut(&mut self, username: &str, password: &str) -> Option<&mut T> {
        let id = self.find(username, password)?;
        self.get_mut(id)
    }

    pub fn get(&self, id: AccountId) -> Option<&T> {
        self.buckets.get(id.bucket)?.get(id.slot)
    }

    pub fn get_mut(&mut self, id: AccountId) -> Option<&mut T> {
        self.buckets.get_mut(id.bucket)?.get_mut(id.slot)
    }

    /// One chain, in insertion order. Empty for an out of range index.
    pub fn bucket(&self, index: usize) -> &[T] {
        self.buckets.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Every record, bucket by bucket, each chain in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buckets.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::Driver;

    fn directory(buckets: usize) -> AccountDirectory<Driver> {
        AccountDirectory::new(NonZeroUsize::new(buckets).unwrap())
    }

    #[test]
    fn test_new_directory_is_empty() {
        let dir = directory(10);
        assert!(dir.is_empty());
        assert_eq!(dir.bucket_count().get(), 10);
        assert!(dir.lookup("alice", "pw").is_none());
        assert_eq!(dir.iter().count(), 0);
    }

    #[test]
    fn test_bucket_index_is_character_sum() {
        let ten = NonZeroUsize::new(10).unwrap();
        // 'a' = 97, 'b' = 98
        assert_eq!(bucket_index("a", ten), 7);
        assert_eq!(bucket_index("ab", ten), 5);
        assert_eq!(bucket_index("", ten), 0);
        assert_eq!(bucket_index("ab", NonZeroUsize::MIN), 0);
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut dir = directory(10);
        let id = dir.insert(Driver::new("alice", "pw"));

        assert_eq!(dir.len(), 1);
        assert_eq!(id.bucket, dir.bucket_index("alice"));
        assert_eq!(dir.find("alice", "pw"), Some(id));
        assert_eq!(dir.lookup("alice", "pw").unwrap().username, "alice");
    }

    #[test]
    fn test_wrong_password_is_not_found() {
        let mut dir = directory(10);
        dir.insert(Driver::new("alice", "pw"));

        assert!(dir.lookup("alice", "PW").is_none());
        assert!(dir.lookup("alice", "").is_none());
        assert!(dir.lookup("Alice", "pw").is_none());
        assert!(dir.find("bob", "pw").is_none());
    }

    #[test]
    fn test_colliding_names_share_bucket() {
        let mut dir = directory(10);
        let ab = dir.insert(Driver::new("ab", "one"));
        let ba = dir.insert(Driver::new("ba", "two"));

        assert_eq!(ab.bucket, ba.bucket);
        assert_eq!(dir.bucket(ab.bucket).len(), 2);

        assert_eq!(dir.lookup("ab", "one").unwrap().username, "ab");
        assert_eq!(dir.lookup("ba", "two").unwrap().username, "ba");
        assert!(dir.lookup("ab", "two").is_none());
        assert!(dir.lookup("ba", "one").is_none());
    }

    #[test]
    fn test_single_bucket_keeps_everyone_retrievable() {
        let mut dir = directory(1);
        for i in 0..20 {
            dir.insert(Driver::new(format!("user{i}"), format!("pw{i}")));
        }
        assert_eq!(dir.bucket(0).len(), 20);
        for i in 0..20 {
            let found = dir.lookup(&format!("user{i}"), &format!("pw{i}")).unwrap();
            assert_eq!(found.username, format!("user{i}"));
        }
    }

    #[test]
    fn test_duplicate_username_first_registration_wins() {
        let mut dir = directory(10);
        let first = dir.insert(Driver::new("alice", "pw"));
        let second = dir.insert(Driver::new("alice", "pw"));
        assert_ne!(first, second);
        assert_eq!(dir.len(), 2);

        dir.get_mut(second).unwrap().is_available = false;
        assert!(dir.lookup("alice", "pw").unwrap().is_available);

        dir.lookup_mut("alice", "pw").unwrap().is_available = false;
        assert!(!dir.get(first).unwrap().is_available);
    }

    #[test]
    fn test_duplicate_username_different_passwords() {
        let mut dir = directory(10);
        let first = dir.insert(Driver::new("alice", "old"));
        let second = dir.insert(Driver::new("alice", "new"));

        assert_eq!(dir.find("alice", "old"), Some(first));
        assert_eq!(dir.find("alice", "new"), Some(second));
    }

    #[test]
    fn test_handles_stay_valid_after_more_inserts() {
        let mut dir = directory(2);
        let id = dir.insert(Driver::new("alice", "pw"));
        for i in 0..100 {
            dir.insert(Driver::new(format!("d{i}"), "x"));
        }
        assert_eq!(dir.get(id).unwrap().username, "alice");
    }

    #[test]
    fn test_out_of_range_handles() {
        let dir = directory(3);
        assert!(dir.get(AccountId { bucket: 7, slot: 0 }).is_none());
        assert!(dir.get(AccountId { bucket: 0, slot: 0 }).is_none());
        assert!(dir.bucket(99).is_empty());
    }

    #[test]
    fn test_non_ascii_usernames() {
        let mut dir = directory(10);
        dir.insert(Driver::new("zoë", "pw"));
        dir.insert(Driver::new("名前", "pw"));

        assert!(dir.lookup("zoë", "pw").is_some());
        assert!(dir.lookup("名前", "pw").is_some());
        assert!(dir.lookup("zoe", "pw").is_none());
    }
}
