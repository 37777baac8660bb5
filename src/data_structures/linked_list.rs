use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::ptr::{self, NonNull};

/// One element of the chain. Owns its text and, through `next`, every element after it.
///
/// Nodes live in storage obtained from [`Node::allocate`] and are only ever reached through raw
/// pointers, so the queue's tail pointer is never invalidated by moving an owning handle.
pub(crate) struct Node {
    pub value: Box<str>,
    pub next: Link,
}

pub(crate) type Link = Option<NonNull<Node>>;

impl Node {
    fn layout() -> Layout {
        Layout::new::<Node>()
    }

    /// Uninitialised storage for one node, or `None` if the process allocator refuses.
    pub fn allocate() -> Option<NonNull<Node>> {
        // SAFETY: `Node` is not zero-sized.
        NonNull::new(unsafe { alloc::alloc(Node::layout()) }.cast::<Node>())
    }

    /// Moves `value` into freshly allocated `slot` as a node without successor.
    ///
    /// # Safety
    /// `slot` comes from [`Node::allocate`] and holds no node yet.
    pub unsafe fn init(slot: NonNull<Node>, value: Box<str>) -> NonNull<Node> {
        slot.as_ptr().write(Node { value, next: None });
        slot
    }

    /// Returns storage that never held a node.
    ///
    /// # Safety
    /// `slot` comes from [`Node::allocate`] and was not initialised.
    pub unsafe fn deallocate(slot: NonNull<Node>) {
        alloc::dealloc(slot.as_ptr().cast(), Node::layout());
    }

    /// Drops what is left of the node and returns its storage. `next` is not followed.
    ///
    /// # Safety
    /// `node` was initialised with [`Node::init`], is not reachable from any chain anymore and is
    /// not used afterwards.
    pub unsafe fn free(node: NonNull<Node>) {
        ptr::drop_in_place(node.as_ptr());
        Node::deallocate(node);
    }
}

/// Relinks the chain starting at `head` back to front and returns the new head.
///
/// Nodes stay where they are, so pointers into the chain remain valid. Nothing is allocated or
/// released.
///
/// # Safety
/// Every node reachable from `head` is live and not borrowed elsewhere.
pub(crate) unsafe fn reverse(head: Link) -> Link {
    let mut previous: Link = None;
    let mut current = head;
    while let Some(node) = current {
        let node = node.as_ptr();
        current = (*node).next;
        (*node).next = previous;
        previous = NonNull::new(node);
    }
    previous
}

/// Borrowing walk over the values of a chain, front to back.
pub(crate) struct Values<'c> {
    current: Link,
    marker: PhantomData<&'c Node>,
}

impl<'c> Values<'c> {
    /// # Safety
    /// Every node reachable from `head` stays live and unmodified for `'c`.
    pub unsafe fn new(head: Link) -> Values<'c> {
        Values {
            current: head,
            marker: PhantomData,
        }
    }
}

impl<'c> Iterator for Values<'c> {
    type Item = &'c str;

    fn next(&mut self) -> Option<Self::Item> {
        // SAFETY: guaranteed by the caller of `Values::new`.
        let node: &'c Node = unsafe { self.current?.as_ref() };
        self.current = node.next;
        Some(&node.value)
    }
}
