//! Where driver instances live.
//!
//! Instances are placed exactly once at creation. The storage decides whether there is room; the
//! driver only reports [`Error::NoMemory`](crate::Error::NoMemory) when there is not.

use static_cell::StaticCell;

/// Memory that can hold one more instance of `T`.
pub trait InstanceStorage<'s, T> {
    /// Move `instance` into the storage, or hand it back as `None` if there is no room left.
    fn acquire(self, instance: T) -> Option<&'s mut T>;
}

impl<T> InstanceStorage<'static, T> for &'static StaticCell<T> {
    fn acquire(self, instance: T) -> Option<&'static mut T> {
        self.try_init(instance)
    }
}

/// A fixed pool of cells, the first free one is used.
impl<T, const N: usize> InstanceStorage<'static, T> for &'static [StaticCell<T>; N] {
    fn acquire(self, instance: T) -> Option<&'static mut T> {
        self.iter()
            .find_map(|cell| cell.try_uninit())
            .map(|slot| slot.write(instance))
    }
}

/// A caller-provided slot. An occupied slot is never overwritten.
impl<'s, T> InstanceStorage<'s, T> for &'s mut Option<T> {
    fn acquire(self, instance: T) -> Option<&'s mut T> {
        if self.is_some() {
            return None;
        }
        Some(self.insert(instance))
    }
}
