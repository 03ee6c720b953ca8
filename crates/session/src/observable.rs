use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// A single-threaded observable cell.
///
/// `set` stores the new value and then invokes every subscriber that was
/// registered when the notification began. Callbacks may subscribe and
/// unsubscribe freely (the list is snapshotted first), but must not set the
/// same cell reentrantly.
pub struct Observable<T> {
    inner: Rc<Inner<T>>,
}

type Callback<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<(u64, Callback<T>)>>,
    next_id: Cell<u64>,
}

impl<T> Observable<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(initial),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        *self.inner.value.borrow_mut() = value;

        // Snapshot so a callback can drop its peers' subscriptions without
        // invalidating the iteration.
        let snapshot: Vec<Callback<T>> = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();

        let current = self.inner.value.borrow();
        for callback in snapshot {
            callback(&current);
        }
    }

    /// Read the value through a closure without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Register a change callback; dropping the handle unsubscribes.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription<T> {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .subscribers
            .borrow_mut()
            .push((id, Rc::new(callback)));
        Subscription {
            inner: Rc::clone(&self.inner),
            id,
        }
    }

    fn unsubscribe(inner: &Inner<T>, id: u64) {
        inner
            .subscribers
            .borrow_mut()
            .retain(|(sub_id, _)| *sub_id != id);
    }
}

impl<T: Clone> Observable<T> {
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.inner.value.borrow())
            .field("subscribers", &self.inner.subscribers.borrow().len())
            .finish()
    }
}

/// Keeps a subscription alive; dropping it removes the callback.
pub struct Subscription<T> {
    inner: Rc<Inner<T>>,
    id: u64,
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        Observable::unsubscribe(&self.inner, self.id);
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Observable, Subscription};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn set_notifies_every_subscriber() {
        let cell = Observable::new(0u32);
        let log = Rc::new(RefCell::new(Vec::new()));

        let log_a = Rc::clone(&log);
        let _a = cell.subscribe(move |v| log_a.borrow_mut().push(("a", *v)));
        let log_b = Rc::clone(&log);
        let _b = cell.subscribe(move |v| log_b.borrow_mut().push(("b", *v)));

        cell.set(7);
        assert_eq!(log.borrow().as_slice(), &[("a", 7), ("b", 7)]);
    }

    #[test]
    fn dropped_subscriptions_stop_firing() {
        let cell = Observable::new(0u32);
        let log = Rc::new(RefCell::new(Vec::new()));

        let log_cb = Rc::clone(&log);
        let sub = cell.subscribe(move |v| log_cb.borrow_mut().push(*v));
        cell.set(1);
        drop(sub);
        cell.set(2);

        assert_eq!(log.borrow().as_slice(), &[1]);
    }

    #[test]
    fn a_callback_may_unsubscribe_a_peer() {
        let cell = Observable::new(0u32);
        let parked: Rc<RefCell<Option<Subscription<u32>>>> = Rc::new(RefCell::new(None));

        let fired = Rc::new(RefCell::new(0u32));
        let fired_cb = Rc::clone(&fired);
        let peer = cell.subscribe(move |_| *fired_cb.borrow_mut() += 1);
        *parked.borrow_mut() = Some(peer);

        // The first subscriber tears the peer down mid-notification.
        let parked_cb = Rc::clone(&parked);
        let _killer = cell.subscribe(move |_| {
            parked_cb.borrow_mut().take();
        });

        cell.set(1);
        let after_first = *fired.borrow();
        cell.set(2);

        // The peer saw at most the snapshot round it was dropped in.
        assert_eq!(*fired.borrow(), after_first);
    }

    #[test]
    fn clones_share_one_value() {
        let a = Observable::new(String::from("x"));
        let b = a.clone();
        b.set("y".into());
        assert_eq!(a.get(), "y");
    }

    #[test]
    fn with_reads_in_place() {
        let cell = Observable::new(vec![1, 2, 3]);
        assert_eq!(cell.with(Vec::len), 3);
    }
}
