//! The queue operations for callers that may not hold a queue at all.
//!
//! Each function takes the queue as an `Option`. An absent queue is answered with
//! [`QueueError::InvalidContainer`] (or `0` for [`size`]) and has no other effect. The record
//! itself is heap allocated and accounted through the allocator as a [`Block::Queue`] of its real
//! size, so a tracking allocator sees the full lifetime from [`create_in`] to [`destroy`].

use std::mem;

use crate::calloc::{Allocator, Block, Global};
use crate::error::{QueueError, Result};
use crate::queue::Queue;

/// the block describing a `Queue<A>` record
fn record<A: Allocator>() -> Block {
    Block::Queue {
        size: mem::size_of::<Queue<A>>(),
    }
}

pub fn create() -> Result<Box<Queue>> {
    create_in(Global)
}

/// A new empty queue whose record and elements are accounted through `alloc`.
pub fn create_in<A: Allocator>(alloc: A) -> Result<Box<Queue<A>>> {
    alloc.allocate(record::<A>())?;
    Ok(Box::new(Queue::new_in(alloc)))
}

/// Releases every element (value, then node) and then the record.
pub fn destroy<A: Allocator>(queue: Option<Box<Queue<A>>>) {
    if let Some(mut queue) = queue {
        queue.clear();
        queue.allocator().deallocate(record::<A>());
    }
}

pub fn insert_front<A: Allocator>(queue: Option<&mut Queue<A>>, text: &str) -> Result<()> {
    queue.ok_or(QueueError::InvalidContainer)?.insert_front(text)
}

pub fn insert_back<A: Allocator>(queue: Option<&mut Queue<A>>, text: &str) -> Result<()> {
    queue.ok_or(QueueError::InvalidContainer)?.insert_back(text)
}

/// See [`Queue::remove_front`].
pub fn remove_front<A: Allocator>(
    queue: Option<&mut Queue<A>>,
    buffer: Option<&mut [u8]>,
) -> Result<()> {
    queue.ok_or(QueueError::InvalidContainer)?.remove_front(buffer)
}

pub fn size<A: Allocator>(queue: Option<&Queue<A>>) -> usize {
    queue.map_or(0, |queue| queue.size())
}

pub fn reverse<A: Allocator>(queue: Option<&mut Queue<A>>) {
    if let Some(queue) = queue {
        queue.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::bounded_copy;
    use crate::tracking::Tracking;

    #[test]
    fn absent_queue_is_rejected() {
        let mut buf = [0xffu8; 4];
        assert_eq!(
            insert_front::<Global>(None, "a"),
            Err(QueueError::InvalidContainer)
        );
        assert_eq!(
            insert_back::<Global>(None, "a"),
            Err(QueueError::InvalidContainer)
        );
        assert_eq!(
            remove_front::<Global>(None, Some(&mut buf[..])),
            Err(QueueError::InvalidContainer)
        );
        assert_eq!(buf, [0xff; 4]);
        assert_eq!(size::<Global>(None), 0);
        reverse::<Global>(None);
        destroy::<Global>(None);
    }

    #[test]
    fn absent_queue_makes_no_allocator_traffic() {
        let tracking = Tracking::new();
        assert!(insert_back::<&Tracking>(None, "a").is_err());
        assert_eq!(tracking.stats().allocations, 0);
        assert_eq!(tracking.stats().failures, 0);
    }

    #[test]
    fn full_lifetime_is_balanced() {
        let tracking = Tracking::new();
        let mut queue = create_in(&tracking).unwrap();
        assert_eq!(tracking.stats().live_blocks, 1);
        assert_eq!(
            tracking.stats().live_bytes,
            mem::size_of::<Queue<&Tracking>>()
        );

        insert_back(Some(&mut *queue), "a").unwrap();
        insert_back(Some(&mut *queue), "b").unwrap();
        insert_front(Some(&mut *queue), "c").unwrap();
        assert_eq!(size(Some(&*queue)), 3);

        reverse(Some(&mut *queue));
        let mut buf = [0u8; 10];
        remove_front(Some(&mut *queue), Some(&mut buf[..])).unwrap();
        assert_eq!(bounded_copy::terminated(&buf), b"b");
        assert_eq!(size(Some(&*queue)), 2);

        destroy(Some(queue));
        assert!(tracking.is_balanced());
        assert_eq!(tracking.stats().releases, 1 + 3 * 2);
    }

    #[test]
    fn refused_record() {
        let tracking = Tracking::new();
        tracking.fail_next();
        assert_eq!(
            create_in(&tracking).err(),
            Some(QueueError::AllocationFailure(record::<&Tracking>()))
        );
        assert!(tracking.is_balanced());
    }

    #[test]
    fn remove_from_fresh_queue_fails() {
        let mut queue = create().unwrap();
        assert_eq!(
            remove_front(Some(&mut *queue), None),
            Err(QueueError::EmptyContainer)
        );
        assert_eq!(size(Some(&*queue)), 0);
        destroy(Some(queue));
    }
}
