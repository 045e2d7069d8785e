//! Who each clue points to: a chained hash table from clue text to suspect
//!
//! Buckets are singly linked chains. New associations go to the head of
//! their chain, so a key inserted twice answers with the latest suspect.

use super::owned_text;
use crate::Result;
use std::fmt;

/// Number of buckets (prime)
pub const BUCKET_COUNT: usize = 13;

/// Bucket for `key`: `h = h * 31 + byte` over every byte, then mod the table
pub fn bucket_of(key: &str) -> usize {
    let hash = key
        .bytes()
        .fold(0u32, |h, byte| h.wrapping_mul(31).wrapping_add(u32::from(byte)));
    hash as usize % BUCKET_COUNT
}

/// One clue → suspect link in a bucket chain
pub struct SuspectAssociation {
    clue_key: String,
    suspect_name: String,
    next: Option<Box<SuspectAssociation>>,
}

impl SuspectAssociation {
    pub fn clue_key(&self) -> &str {
        &self.clue_key
    }

    pub fn suspect_name(&self) -> &str {
        &self.suspect_name
    }
}

impl fmt::Debug for SuspectAssociation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuspectAssociation")
            .field("clue_key", &self.clue_key)
            .field("suspect_name", &self.suspect_name)
            .finish()
    }
}

/// Chains are unlinked and copied in loops, however long they grow.
pub struct SuspectDirectory {
    buckets: Vec<Option<Box<SuspectAssociation>>>,
}

impl Default for SuspectDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl SuspectDirectory {
    pub fn new() -> Self {
        Self {
            buckets: (0..BUCKET_COUNT).map(|_| None).collect(),
        }
    }

    /// Build a directory from `(clue, suspect)` pairs, inserted in order
    pub fn from_associations<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut directory = Self::new();
        for (clue, suspect) in pairs {
            directory.insert(clue, suspect)?;
        }
        Ok(directory)
    }

    /// Link `clue_key` to `suspect_name`, shadowing any earlier link
    pub fn insert(&mut self, clue_key: &str, suspect_name: &str) -> Result<()> {
        let slot = &mut self.buckets[bucket_of(clue_key)];
        let association = SuspectAssociation {
            clue_key: owned_text(clue_key, "suspect directory")?,
            suspect_name: owned_text(suspect_name, "suspect directory")?,
            next: slot.take(),
        };
        *slot = Some(Box::new(association));
        Ok(())
    }

    /// Suspect the clue points to, if any
    pub fn lookup(&self, clue_key: &str) -> Option<&str> {
        self.chain(bucket_of(clue_key))
            .find(|association| association.clue_key == clue_key)
            .map(SuspectAssociation::suspect_name)
    }

    /// Walk one bucket, newest association first
    pub fn chain(&self, bucket: usize) -> Chain<'_> {
        Chain {
            next: self.buckets.get(bucket).and_then(|head| head.as_deref()),
        }
    }

    /// Total associations, shadowed ones included
    pub fn len(&self) -> usize {
        (0..self.buckets.len()).map(|b| self.chain(b).count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Option::is_none)
    }
}

impl Drop for SuspectDirectory {
    fn drop(&mut self) {
        for bucket in &mut self.buckets {
            let mut next = bucket.take();
            while let Some(mut association) = next {
                next = association.next.take();
            }
        }
    }
}

impl Clone for SuspectDirectory {
    fn clone(&self) -> Self {
        let buckets = (0..self.buckets.len())
            .map(|bucket| {
                let links: Vec<&SuspectAssociation> = self.chain(bucket).collect();
                links.into_iter().rev().fold(None, |next, link| {
                    Some(Box::new(SuspectAssociation {
                        clue_key: link.clue_key.clone(),
                        suspect_name: link.suspect_name.clone(),
                        next,
                    }))
                })
            })
            .collect();
        Self { buckets }
    }
}

impl PartialEq for SuspectDirectory {
    fn eq(&self, other: &Self) -> bool {
        self.buckets.len() == other.buckets.len()
            && (0..self.buckets.len()).all(|bucket| {
                self.chain(bucket)
                    .map(|a| (a.clue_key(), a.suspect_name()))
                    .eq(other.chain(bucket).map(|a| (a.clue_key(), a.suspect_name())))
            })
    }
}

impl Eq for SuspectDirectory {}

impl fmt::Debug for SuspectDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries((0..self.buckets.len()).flat_map(|bucket| self.chain(bucket)))
            .finish()
    }
}

pub struct Chain<'a> {
    next: Option<&'a SuspectAssociation>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a SuspectAssociation;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.next.as_deref();
        Some(current)
    }
}
