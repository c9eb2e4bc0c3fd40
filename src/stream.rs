use std::cell::RefCell;
use std::fmt::{self, Debug, Formatter};

use slab::Slab;
use tracing::trace;

pub type Subscriber<T> = Box<dyn Fn(&T)>;

/// Read-only observation capability over a changing value.
pub trait Stream<T> {
    fn get(&self) -> T
    where
        T: Clone;

    fn subscribe(&self, subscriber: Subscriber<T>) -> SubscriberId;

    fn unsubscribe(&self, id: SubscriberId);
}

/// Mutation capability. Handed out separately from [`Stream`] so holders of
/// the read view are structurally unable to write.
pub trait MutableStream<T>: Stream<T> {
    fn set(&self, value: T);
}

/// The one concrete stream. Wrap in `Rc` and coerce the same instance to
/// `Rc<dyn Stream<T>>` and `Rc<dyn MutableStream<T>>` to export both views.
///
/// Subscribers run synchronously, in subscription order, on every `set`.
/// A subscriber must not call back into its own stream; the interior
/// `RefCell` panics on re-entrant use.
pub struct ValueStream<T> {
    value: RefCell<T>,
    subscribers: RefCell<Slab<Subscriber<T>>>,
}

impl<T> ValueStream<T>
where
    T: 'static,
{
    pub fn new(initial: T) -> Self {
        Self {
            value: RefCell::new(initial),
            subscribers: RefCell::new(Slab::new()),
        }
    }
}

impl<T> Stream<T> for ValueStream<T>
where
    T: 'static,
{
    fn get(&self) -> T
    where
        T: Clone,
    {
        self.value.borrow().clone()
    }

    fn subscribe(&self, subscriber: Subscriber<T>) -> SubscriberId {
        let key = self.subscribers.borrow_mut().insert(subscriber);
        trace!(
            stream = std::any::type_name::<T>(),
            subscriber = key,
            "subscribe"
        );
        SubscriberId(key)
    }

    fn unsubscribe(&self, id: SubscriberId) {
        let removed = self.subscribers.borrow_mut().try_remove(id.0).is_some();
        trace!(
            stream = std::any::type_name::<T>(),
            subscriber = id.0,
            removed,
            "unsubscribe"
        );
    }
}

impl<T> MutableStream<T> for ValueStream<T>
where
    T: 'static,
{
    fn set(&self, value: T) {
        *self.value.borrow_mut() = value;
        let value = self.value.borrow();
        let subscribers = self.subscribers.borrow();
        trace!(
            stream = std::any::type_name::<T>(),
            subscribers = subscribers.len(),
            "set"
        );
        for (_, subscriber) in subscribers.iter() {
            subscriber(&value);
        }
    }
}

impl<T> Debug for ValueStream<T>
where
    T: Debug + 'static,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueStream")
            .field("value", &self.value.borrow())
            .field("subscribers", &self.subscribers.borrow().len())
            .finish()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(usize);

impl Debug for SubscriberId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "SubscriberId({})", self.0)
    }
}
