//! Per-rider ride history as a doubly linked list.
//!
//! Nodes live in an arena and point at each other by index, so appending
//! never moves or invalidates an existing entry and both directions of
//! traversal are plain index walks.

use std::iter::FusedIterator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ride {
    pub ride_id: String,
    pub pickup: String,
    pub dropoff: String,
}

impl Ride {
    pub fn new(
        ride_id: impl Into<String>,
        pickup: impl Into<String>,
        dropoff: impl Into<String>,
    ) -> Self {
        Self {
            ride_id: ride_id.into(),
            pickup: pickup.into(),
            dropoff: dropoff.into(),
        }
    }
}

#[derive(Debug)]
struct Node {
    ride: Ride,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug, Default)]
pub struct RideLog {
    nodes: Vec<Node>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl RideLog {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            head: None,
            tail: None,
        }
    }

    /// Links a new entry after the current last one.
    /// Ride IDs are not checked for uniqueness.
    pub fn append(&mut self, ride: Ride) {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            ride,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The oldest entry.
    pub fn first(&self) -> Option<&Ride> {
        self.head.map(|idx| &self.nodes[idx].ride)
    }

    /// The most recently appended entry.
    pub fn last(&self) -> Option<&Ride> {
        self.tail.map(|idx| &self.nodes[idx].ride)
    }

    /// Walks the log oldest first.
    pub fn iter_forward(&self) -> Forward<'_> {
        Forward {
            log: self,
            cursor: self.head,
            remaining: self.len(),
        }
    }

    /// Walks the log most recent first. Each call starts again from the tail.
    pub fn iter_backward(&self) -> Backward<'_> {
        Backward {
            log: self,
            cursor: self.tail,
            remaining: self.len(),
        }
    }
}

pub struct Forward<'a> {
    log: &'a RideLog,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Forward<'a> {
    type Item = &'a Ride;

    fn next(&mut self) -> Option<Self::Item> {
        let log = self.log;
        let node = &log.nodes[self.cursor?];
        self.cursor = node.next;
        self.remaining -= 1;
        Some(&node.ride)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Forward<'_> {}
impl FusedIterator for Forward<'_> {}

pub struct Backward<'a> {
    log: &'a RideLog,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Backward<'a> {
    type Item = &'a Ride;

    fn next(&mut self) -> Option<Self::Item> {
        let log = self.log;
        let node = &log.nodes[self.cursor?];
        self.cursor = node.prev;
        self.remaining -= 1;
        Some(&node.ride)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Backward<'_> {}
impl FusedIterator for Backward<'_> {}
