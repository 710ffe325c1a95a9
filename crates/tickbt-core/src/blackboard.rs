use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

/// Typed handle to a named blackboard slot.
///
/// Two keys with the same name address the same slot; the type parameter only
/// fixes how the slot is read back.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BbKey<T: 'static> {
    name: &'static str,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: 'static> Copy for BbKey<T> {}

impl<T: 'static> Clone for BbKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> fmt::Debug for BbKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BbKey").field(&self.name).finish()
    }
}

impl<T: 'static> BbKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _phantom: PhantomData,
        }
    }

    pub fn name(self) -> &'static str {
        self.name
    }
}

/// String-keyed store of arbitrary values shared by every task of a tree.
#[derive(Default)]
pub struct Blackboard {
    values: BTreeMap<&'static str, Box<dyn Any>>,
}

impl fmt::Debug for Blackboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values.keys()).finish()
    }
}

fn mismatch(name: &str) -> ! {
    panic!("blackboard type mismatch for key `{name}` (stored type differs from requested)")
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Slot names currently present, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.keys().copied()
    }

    pub fn contains<T: 'static>(&self, key: BbKey<T>) -> bool {
        self.values.contains_key(key.name)
    }

    pub fn set<T: 'static>(&mut self, key: BbKey<T>, value: T) {
        self.values.insert(key.name, Box::new(value));
    }

    pub fn get<T: 'static>(&self, key: BbKey<T>) -> Option<&T> {
        let value = self.values.get(key.name)?;
        match value.downcast_ref::<T>() {
            Some(v) => Some(v),
            None => mismatch(key.name),
        }
    }

    pub fn get_mut<T: 'static>(&mut self, key: BbKey<T>) -> Option<&mut T> {
        let value = self.values.get_mut(key.name)?;
        match value.downcast_mut::<T>() {
            Some(v) => Some(v),
            None => mismatch(key.name),
        }
    }

    /// Return the slot, initialising it with `init` first when absent.
    pub fn get_or_insert_with<T: 'static>(
        &mut self,
        key: BbKey<T>,
        init: impl FnOnce() -> T,
    ) -> &mut T {
        let value = self
            .values
            .entry(key.name)
            .or_insert_with(|| Box::new(init()));
        match value.downcast_mut::<T>() {
            Some(v) => v,
            None => mismatch(key.name),
        }
    }

    pub fn remove<T: 'static>(&mut self, key: BbKey<T>) -> Option<T> {
        let value = self.values.remove(key.name)?;
        match value.downcast::<T>() {
            Ok(v) => Some(*v),
            Err(_) => mismatch(key.name),
        }
    }
}
