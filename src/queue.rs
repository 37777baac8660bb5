use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use crate::calloc::{Allocator, Block, Global};
use crate::data_structures::bounded_copy;
use crate::data_structures::linked_list::{self, Link, Node, Values};
use crate::error::{QueueError, Result};

/// A [`Queue`] is an ordered sequence of owned strings that can grow at both ends and shrink at the
/// front.
///
/// Each element is an independent copy of the text it was inserted with. Its storage (one node
/// and one value copy) is acquired through the queue's [`Allocator`] and handed back to it when the
/// element is removed or the queue is torn down.
///
/// # Examples
/// ```
/// use text_queue::Queue;
///
/// let mut queue = Queue::new();
/// queue.insert_back("a").unwrap();
/// queue.insert_back("b").unwrap();
/// queue.insert_front("c").unwrap();
/// queue.reverse();
///
/// let mut buf = [0u8; 10];
/// queue.remove_front(Some(&mut buf[..])).unwrap();
/// assert_eq!(&buf[..2], b"b\0");
/// assert_eq!(queue.size(), 2);
/// ```
///
/// Inserts run in constant time: the queue keeps a pointer to its last node, so appending never
/// walks the chain.
pub struct Queue<A: Allocator = Global> {
    /// first node; it and every node after it are owned by the queue
    head: Link,
    /// the last node of the chain starting at `head`; `None` exactly when `head` is
    tail: Link,
    size: usize,
    alloc: A,
    marker: PhantomData<Box<Node>>,
}

impl Queue<Global> {
    /// an empty queue using the process allocator
    pub fn new() -> Queue<Global> {
        Queue::new_in(Global)
    }
}

impl Default for Queue<Global> {
    fn default() -> Self {
        Queue::new()
    }
}

impl<A: Allocator> Queue<A> {
    /// an empty queue whose element storage is accounted through `alloc`
    pub fn new_in(alloc: A) -> Queue<A> {
        Queue {
            head: None,
            tail: None,
            size: 0,
            alloc,
            marker: PhantomData,
        }
    }

    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// number of elements, read from the stored counter
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Copies `text` into a new element at the front.
    ///
    /// On [`QueueError::AllocationFailure`] the queue is unchanged and nothing stays allocated.
    ///
    /// The text is kept byte for byte, including any `\0`. A buffer filled by
    /// [`Queue::remove_front`] ends at its first terminator, so such text reads back cut short
    /// through [`bounded_copy::terminated`].
    pub fn insert_front(&mut self, text: &str) -> Result<()> {
        let node = self.new_node(text)?;
        // SAFETY: `node` is fresh and not yet reachable from the chain.
        unsafe { (*node.as_ptr()).next = self.head };
        if self.tail.is_none() {
            self.tail = Some(node);
        }
        self.head = Some(node);
        self.size += 1;
        Ok(())
    }

    /// Copies `text` into a new element at the back.
    ///
    /// Same failure guarantees and handling of `\0` as [`Queue::insert_front`].
    pub fn insert_back(&mut self, text: &str) -> Result<()> {
        let node = self.new_node(text)?;
        match self.tail {
            None => self.head = Some(node),
            // SAFETY: `tail` is the live last node of the chain this queue owns, and no reference
            // into the chain outlives a `&self` borrow.
            Some(tail) => unsafe { (*tail.as_ptr()).next = Some(node) },
        }
        self.tail = Some(node);
        self.size += 1;
        Ok(())
    }

    /// Removes the front element.
    ///
    /// If `buffer` is given, the removed text is copied into it with [`bounded_copy::copy_terminated`]:
    /// at most `buffer.len() - 1` bytes, then a terminator. An empty buffer receives nothing. The
    /// element and its storage are released either way.
    pub fn remove_front(&mut self, buffer: Option<&mut [u8]>) -> Result<()> {
        let node = self.head.ok_or(QueueError::EmptyContainer)?;
        // SAFETY: `head` is live and owned by this queue.
        self.head = unsafe { (*node.as_ptr()).next.take() };
        self.size -= 1;
        if self.head.is_none() {
            self.tail = None;
        }
        if let Some(buffer) = buffer {
            // SAFETY: the node is detached but not yet released.
            let value = unsafe { &(*node.as_ptr()).value };
            bounded_copy::copy_terminated(value.as_bytes(), buffer);
        }
        // SAFETY: detached above; nothing points at it anymore.
        unsafe { self.release(node) };
        Ok(())
    }

    /// Reverses the order of the elements in place.
    ///
    /// Only links are rewritten: no storage is acquired or released, and the chain is walked once
    /// without recursion.
    pub fn reverse(&mut self) {
        if self.size < 2 {
            return;
        }
        let old_head = self.head;
        // SAFETY: the chain is owned by this queue and `&mut self` excludes other borrows.
        self.head = unsafe { linked_list::reverse(self.head) };
        self.tail = old_head;
    }

    /// Releases every element, value first and then node, leaving the queue empty.
    ///
    /// The chain is unlinked one node at a time, never recursively.
    pub fn clear(&mut self) {
        self.tail = None;
        self.size = 0;
        let mut link = self.head.take();
        while let Some(node) = link {
            // SAFETY: every node of the detached chain is live and visited once.
            unsafe {
                link = (*node.as_ptr()).next.take();
                self.release(node);
            }
        }
    }

    /// Tears the queue down, releasing all element storage.
    pub fn destroy(mut self) {
        self.clear();
    }

    /// A copy of every value, front to back.
    pub fn contents(&self) -> Vec<String> {
        self.values().map(str::to_owned).collect()
    }

    /// Checks the structural invariants by walking the chain:
    ///
    /// - the counter, head and tail agree on emptiness;
    /// - following `next` from the head reaches the tail after exactly `size - 1` steps and ends
    ///   there.
    pub fn is_consistent(&self) -> bool {
        let (Some(head), Some(tail)) = (self.head, self.tail) else {
            return self.head.is_none() && self.tail.is_none() && self.size == 0;
        };
        let mut steps = 1;
        let mut node = head;
        // SAFETY: nodes of the owned chain are live while `self` is borrowed.
        while let Some(next) = unsafe { node.as_ref() }.next {
            if steps == self.size {
                return false;
            }
            node = next;
            steps += 1;
        }
        steps == self.size && node == tail
    }

    fn values(&self) -> Values<'_> {
        // SAFETY: the chain cannot change while `self` is borrowed.
        unsafe { Values::new(self.head) }
    }

    /// Acquires a node and then a copy of `text`. If the copy is refused, the node is handed back
    /// before returning.
    fn new_node(&self, text: &str) -> Result<NonNull<Node>> {
        self.alloc.allocate(Block::Node)?;
        let Some(slot) = Node::allocate() else {
            self.alloc.deallocate(Block::Node);
            return Err(QueueError::AllocationFailure(Block::Node));
        };
        match self.copy_value(text) {
            // SAFETY: `slot` was just allocated and is empty.
            Ok(value) => Ok(unsafe { Node::init(slot, value) }),
            Err(err) => {
                // SAFETY: `slot` was never initialised.
                unsafe { Node::deallocate(slot) };
                self.alloc.deallocate(Block::Node);
                Err(err)
            }
        }
    }

    fn copy_value(&self, text: &str) -> Result<Box<str>> {
        let block = Block::Value { len: text.len() };
        self.alloc.allocate(block)?;
        let mut copy = String::new();
        if copy.try_reserve_exact(text.len()).is_err() {
            self.alloc.deallocate(block);
            return Err(QueueError::AllocationFailure(block));
        }
        copy.push_str(text);
        Ok(copy.into_boxed_str())
    }

    /// # Safety
    /// `node` is live, detached from the chain and not used afterwards.
    unsafe fn release(&self, node: NonNull<Node>) {
        debug_assert!((*node.as_ptr()).next.is_none());
        let value = mem::take(&mut (*node.as_ptr()).value);
        let block = Block::Value { len: value.len() };
        drop(value);
        self.alloc.deallocate(block);
        Node::free(node);
        self.alloc.deallocate(Block::Node);
    }
}

impl<A: Allocator> Drop for Queue<A> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<A: Allocator> fmt::Debug for Queue<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values()).finish()
    }
}
