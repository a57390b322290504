use crate::subscription::{HandlerKey, SubscriptionId};
use arc_swap::{ArcSwap, Guard};
use std::{
    any::Any,
    fmt,
    sync::{Arc, Weak},
};
use tessera_core::profiling::profile_function;

/// Shared subscriber callback.
pub type Handler<S, A> = Arc<dyn Fn(&S, &A) + Send + Sync>;

struct Subscriber<S: ?Sized, A: ?Sized> {
    id: SubscriptionId,
    key: HandlerKey,
    handler: Handler<S, A>,
    /// Instance of a bound method; the subscriber is dead once it is dropped.
    instance: Option<Weak<dyn Any + Send + Sync>>,
}

impl<S: ?Sized, A: ?Sized> Subscriber<S, A> {
    fn is_live(&self) -> bool {
        self.instance
            .as_ref()
            .is_none_or(|instance| instance.strong_count() > 0)
    }
}

impl<S: ?Sized, A: ?Sized> Clone for Subscriber<S, A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            key: self.key,
            handler: self.handler.clone(),
            instance: self.instance.clone(),
        }
    }
}

type Snapshot<S, A> = Vec<Subscriber<S, A>>;

/// Multicast event raised by a sender of type `S` with an argument of type `A`.
///
/// Subscribers run in subscription order. An invocation iterates the snapshot
/// that was current when it started: subscribers added meanwhile are not
/// called, subscribers removed meanwhile may still be called once.
pub struct Event<S: ?Sized, A: ?Sized = ()> {
    subscribers: ArcSwap<Snapshot<S, A>>,
}

impl<S: ?Sized + 'static, A: ?Sized + 'static> Event<S, A> {
    /// An event with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: ArcSwap::from_pointee(Vec::new()),
        }
    }

    /// Publish a new subscriber list derived from the current one.
    ///
    /// `derive` returns `None` when there is nothing to change. On CAS failure
    /// the latest list is re-read and `derive` runs again. Derived lists leave
    /// out method subscribers whose instance has been dropped.
    fn publish(&self, mut derive: impl FnMut(&Snapshot<S, A>) -> Option<Snapshot<S, A>>) -> bool {
        let mut current = self.subscribers.load_full();
        loop {
            let Some(next) = derive(&current) else {
                return false;
            };
            let previous = self.subscribers.compare_and_swap(&current, Arc::new(next));
            if Arc::ptr_eq(&*previous, &current) {
                return true;
            }
            current = Guard::into_inner(previous);
        }
    }

    fn push(
        &self,
        key: HandlerKey,
        handler: Handler<S, A>,
        instance: Option<Weak<dyn Any + Send + Sync>>,
    ) -> SubscriptionId {
        let id = SubscriptionId::next();
        self.publish(|current| {
            let mut next = Vec::with_capacity(current.len() + 1);
            next.extend(current.iter().filter(|sub| sub.is_live()).cloned());
            next.push(Subscriber {
                id,
                key,
                handler: handler.clone(),
                instance: instance.clone(),
            });
            Some(next)
        });
        id
    }

    fn remove_first(&self, matches: impl Fn(&Subscriber<S, A>) -> bool) -> bool {
        self.publish(|current| {
            let position = current.iter().position(&matches)?;
            let next = current
                .iter()
                .enumerate()
                .filter(|&(index, sub)| index != position && sub.is_live())
                .map(|(_, sub)| sub.clone())
                .collect();
            Some(next)
        })
    }

    /// Subscribe a closure. The returned handle is the only way to remove it.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&S, &A) + Send + Sync + 'static,
    {
        self.push(HandlerKey::Closure, Arc::new(handler), None)
    }

    /// Remove the subscriber `id`. `false` if it is not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.remove_first(|sub| sub.id == id)
    }

    /// Subscribe a free function, removable later by [`unbind`](Self::unbind).
    pub fn bind(&self, function: fn(&S, &A)) -> SubscriptionId {
        self.push(
            HandlerKey::Function(function as usize),
            Arc::new(move |sender: &S, args: &A| function(sender, args)),
            None,
        )
    }

    /// Remove the earliest binding of `function`.
    pub fn unbind(&self, function: fn(&S, &A)) -> bool {
        let key = HandlerKey::Function(function as usize);
        self.remove_first(|sub| sub.key == key)
    }

    /// Subscribe `method` on `instance`.
    ///
    /// The instance is held weakly. Once it is dropped the subscriber does
    /// nothing and is left out of the next list this event publishes.
    pub fn bind_method<R>(&self, instance: &Arc<R>, method: fn(&R, &S, &A)) -> SubscriptionId
    where
        R: Send + Sync + 'static,
    {
        let weak: Weak<R> = Arc::downgrade(instance);
        let liveness: Weak<dyn Any + Send + Sync> = weak.clone();
        self.push(
            Self::method_key(instance, method),
            Arc::new(move |sender: &S, args: &A| {
                if let Some(instance) = weak.upgrade() {
                    method(&instance, sender, args);
                }
            }),
            Some(liveness),
        )
    }

    /// Remove the earliest binding of `method` on `instance`.
    pub fn unbind_method<R>(&self, instance: &Arc<R>, method: fn(&R, &S, &A)) -> bool
    where
        R: Send + Sync + 'static,
    {
        let key = Self::method_key(instance, method);
        self.remove_first(|sub| sub.key == key)
    }

    fn method_key<R>(instance: &Arc<R>, method: fn(&R, &S, &A)) -> HandlerKey {
        HandlerKey::Method {
            instance: Arc::as_ptr(instance) as *const () as usize,
            method: method as usize,
        }
    }

    /// Whether `id` is in the current subscriber list.
    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.subscribers.load().iter().any(|sub| sub.id == id)
    }

    /// Call every subscriber with `sender` and `args`.
    pub fn invoke(&self, sender: &S, args: &A) {
        profile_function!();
        let snapshot = self.subscribers.load_full();
        for sub in snapshot.iter() {
            (sub.handler)(sender, args);
        }
    }

    /// Drop every subscriber.
    pub fn clear(&self) {
        self.subscribers.store(Arc::new(Vec::new()));
    }

    /// Subscribers in the current list, including dead method bindings that
    /// have not been pruned yet.
    pub fn len(&self) -> usize {
        self.subscribers.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: ?Sized + 'static, A: ?Sized + 'static> Default for Event<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

/// The clone starts out with the same subscribers; later changes to either
/// event are not seen by the other.
impl<S: ?Sized, A: ?Sized> Clone for Event<S, A> {
    fn clone(&self) -> Self {
        Self {
            subscribers: ArcSwap::new(self.subscribers.load_full()),
        }
    }
}

impl<S: ?Sized, A: ?Sized> fmt::Debug for Event<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("subscribers", &self.subscribers.load().len())
            .finish()
    }
}
