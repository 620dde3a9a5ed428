use serde::{Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// A dense, typed index into one of the topology's arenas.
///
/// The tag parameter keeps node and link indices apart at compile time.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Index<T> {
    pub index: usize,
    _marker: PhantomData<T>,
}

impl<T> Index<T> {
    pub const fn new(index: usize) -> Self {
        Index { index, _marker: PhantomData }
    }
}

impl<T> fmt::Display for Index<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index)
    }
}

impl<T> fmt::Debug for Index<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let full_name = std::any::type_name::<T>();
        let clean_name = full_name.split("::").last().unwrap_or(full_name);
        let display_name = clean_name.replace("Tag", "Id");

        write!(f, "{}: {}", display_name, self.index)
    }
}

// Serialized as the bare index, the tag only exists for the type checker.
impl<T> Serialize for Index<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.index as u64)
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct NodeTag;
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct LinkTag;

pub type NodeId = Index<NodeTag>;
pub type LinkId = Index<LinkTag>;
