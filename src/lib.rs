//! A queue of owned strings with strict ownership of every byte it stores.
//!
//! [`Queue`] copies each inserted value, releases exactly that storage again on removal, and
//! leaves itself untouched when an allocation is refused part way through an insert. Storage is
//! announced to an [`Allocator`]; [`tracking::Tracking`] is one that counts and can refuse, for
//! checking those guarantees.

pub mod api;
pub mod calloc;
pub mod data_structures;
pub mod error;
pub mod queue;
pub mod tracking;
#[cfg(feature = "wasm")]
pub mod wasm;
#[cfg(any(feature = "wasm", feature = "nowasm"))]
mod wasm_safe;

pub use calloc::{AllocError, Allocator, Block, Global};
pub use error::QueueError;
pub use queue::Queue;

#[cfg(test)]
mod tests {
    use crate::data_structures::bounded_copy;
    use crate::tracking::Tracking;
    use crate::{api, Queue, QueueError};

    #[test]
    fn insert_insert_prepend_reverse_remove() {
        let tracking = Tracking::new();
        let mut queue = api::create_in(&tracking).unwrap();
        api::insert_back(Some(&mut *queue), "a").unwrap();
        api::insert_back(Some(&mut *queue), "b").unwrap();
        api::insert_front(Some(&mut *queue), "c").unwrap();
        assert_eq!(queue.contents(), vec!["c", "a", "b"]);
        assert_eq!(api::size(Some(&*queue)), 3);

        api::reverse(Some(&mut *queue));
        assert_eq!(queue.contents(), vec!["b", "a", "c"]);

        let mut buf = [0u8; 10];
        api::remove_front(Some(&mut *queue), Some(&mut buf[..])).unwrap();
        assert_eq!(bounded_copy::terminated(&buf), b"b");
        println!("{:?}", queue);
        assert_eq!(queue.contents(), vec!["a", "c"]);
        assert_eq!(api::size(Some(&*queue)), 2);

        api::destroy(Some(queue));
        assert!(tracking.is_balanced());
    }

    #[test]
    fn remove_head_on_fresh_queue() {
        let mut queue = Queue::new();
        let mut buf = [0u8; 10];
        assert_eq!(
            queue.remove_front(Some(&mut buf[..])),
            Err(QueueError::EmptyContainer)
        );
        assert_eq!(queue.size(), 0);
    }

    #[test]
    fn size_tracks_successful_inserts_minus_removes() {
        let tracking = Tracking::new();
        let mut queue = Queue::new_in(&tracking);
        let mut expected = 0usize;
        for i in 0..300 {
            if i % 11 == 0 {
                tracking.fail_on(i % 2);
            }
            let inserted = if i % 3 == 0 {
                queue.insert_front("front")
            } else {
                queue.insert_back("back")
            };
            if inserted.is_ok() {
                expected += 1;
            }
            if i % 4 == 0 && queue.remove_front(None).is_ok() {
                expected -= 1;
            }
            assert_eq!(queue.size(), expected);
        }
        assert!(queue.is_consistent());
        queue.destroy();
        assert!(tracking.is_balanced());
    }
}
