//! The allocator seam of the queue.
//!
//! Every piece of storage the queue acquires (its own record when created through [`crate::api`], one
//! node per element, and one value copy per element) is announced to an [`Allocator`] first and
//! handed back to it on release. [`Global`] grants everything and leaves real exhaustion to the
//! fallible reservation of the value copy. [`crate::tracking::Tracking`] counts and can refuse.

use std::fmt;

use thiserror::Error;

use crate::data_structures::linked_list::Node;

/// One unit of storage the queue acquires or releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Block {
    /// the queue record itself, `size` bytes for the queue type actually allocated
    Queue { size: usize },
    /// a chain node, without its value
    Node,
    /// the owned copy of an element's text, `len` bytes long
    Value { len: usize },
}

impl Block {
    /// Bytes accounted for this block.
    pub fn bytes(&self) -> usize {
        match self {
            Block::Queue { size } => *size,
            Block::Node => std::mem::size_of::<Node>(),
            Block::Value { len } => *len,
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Block::Queue { size } => write!(f, "queue record of {size} bytes"),
            Block::Node => write!(f, "node"),
            Block::Value { len } => write!(f, "value copy of {len} bytes"),
        }
    }
}

/// The allocator refused `0`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("allocation of {0} refused")]
pub struct AllocError(pub Block);

pub trait Allocator {
    /// Grants or refuses `block`. A granted block must later be passed to [`Allocator::deallocate`]
    /// exactly once.
    fn allocate(&self, block: Block) -> Result<(), AllocError>;

    fn deallocate(&self, block: Block);
}

impl<A: Allocator + ?Sized> Allocator for &A {
    fn allocate(&self, block: Block) -> Result<(), AllocError> {
        (**self).allocate(block)
    }

    fn deallocate(&self, block: Block) {
        (**self).deallocate(block)
    }
}

/// The process allocator.
#[derive(Debug, Default, Clone, Copy)]
pub struct Global;

impl Allocator for Global {
    fn allocate(&self, _block: Block) -> Result<(), AllocError> {
        Ok(())
    }

    fn deallocate(&self, _block: Block) {}
}
