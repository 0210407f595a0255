//! Chunked slot allocator used to store nodes that refer to each other by handle.

use std::mem;
use std::ops::{Index, IndexMut};

/// Number of slots allocated per chunk when no chunk size is given.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// A copyable reference to a slot in a `TypedArena<T>`.
///
/// A handle carries no ownership. It stays valid until the slot is freed, after which the slot may
/// be handed out again.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    chunk_index: usize,
    block_index: usize,
}

#[derive(Clone)]
enum Block<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// An allocator that only stores a single type of object.
///
/// Storage grows one chunk at a time so existing objects never move. Freed slots are threaded
/// onto a free list and reused before a new chunk is allocated. Every object is dropped when the
/// arena is cleared or dropped.
#[derive(Clone)]
pub struct TypedArena<T> {
    head: Option<Handle>,
    chunks: Vec<Vec<Block<T>>>,
    chunk_size: usize,
    len: usize,
    capacity: usize,
}

impl<T> TypedArena<T> {
    fn is_valid_handle(&self, handle: Handle) -> bool {
        handle.chunk_index < self.chunks.len()
            && handle.block_index < self.chunks[handle.chunk_index].len()
    }

    /// Constructs a new, empty `TypedArena<T>` holding `chunk_size` objects per chunk. A chunk
    /// size of zero is treated as one.
    pub fn new(chunk_size: usize) -> Self {
        TypedArena {
            head: None,
            chunks: Vec::new(),
            chunk_size: chunk_size.max(1),
            len: 0,
            capacity: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Stores `value` and returns the handle of its slot.
    pub fn allocate(&mut self, value: T) -> Handle {
        if self.len == self.capacity {
            self.chunks.push(Vec::with_capacity(self.chunk_size));
            self.capacity += self.chunk_size;
        }
        self.len += 1;

        match self.head.take() {
            None => {
                let chunk_index = self.chunks.len() - 1;
                let last_chunk = &mut self.chunks[chunk_index];
                last_chunk.push(Block::Occupied(value));
                Handle {
                    chunk_index,
                    block_index: last_chunk.len() - 1,
                }
            },
            Some(handle) => {
                let vacant_block = mem::replace(
                    &mut self.chunks[handle.chunk_index][handle.block_index],
                    Block::Occupied(value),
                );
                match vacant_block {
                    Block::Vacant(next) => self.head = next,
                    Block::Occupied(_) => panic!("Expected a vacant block on the free list."),
                }
                handle
            },
        }
    }

    /// Removes the object at `handle` from the arena and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `handle` refers to an invalid or vacant slot.
    pub fn free(&mut self, handle: Handle) -> T {
        if !self.is_valid_handle(handle) {
            panic!("Error: attempting to free invalid block.");
        }
        let old_block = mem::replace(
            &mut self.chunks[handle.chunk_index][handle.block_index],
            Block::Vacant(self.head),
        );
        match old_block {
            Block::Vacant(next) => {
                self.chunks[handle.chunk_index][handle.block_index] = Block::Vacant(next);
                panic!("Error: attempting to free vacant block.");
            },
            Block::Occupied(value) => {
                self.len -= 1;
                self.head = Some(handle);
                value
            },
        }
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        if !self.is_valid_handle(handle) {
            return None;
        }
        match self.chunks[handle.chunk_index][handle.block_index] {
            Block::Occupied(ref value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        if !self.is_valid_handle(handle) {
            return None;
        }
        match self.chunks[handle.chunk_index][handle.block_index] {
            Block::Occupied(ref mut value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Drops every object and releases all chunks.
    pub fn clear(&mut self) {
        self.head = None;
        self.chunks.clear();
        self.len = 0;
        self.capacity = 0;
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle out of bounds.")
    }
}
