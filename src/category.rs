//! Named, ordered collections of callables sharing one signature.
//!
//! Registering a callable appends it and hands it back unchanged, so a
//! collection can be filled from the callables' own definitions without
//! altering them. Once filled, a collection either broadcasts an input to every
//! member ([`CategoryCollection::call_all`]) or, for predicate collections,
//! reports which members rejected it ([`CategoryCollection::violates`]).
//!
//! Members receive the input by reference. The collection is append-only;
//! registration takes `&mut self`, so it cannot race with a broadcast. After
//! set-up the collection can be shared read-only, e.g. behind an `Arc`.
//!
//! # Examples
//!
//! ```rust
//! use call_decorators::CategoryCollection;
//!
//! fn multiple_of_5(i: &i64) -> bool {
//!     i % 5 == 0
//! }
//!
//! fn even(i: &i64) -> bool {
//!     i % 2 == 0
//! }
//!
//! let mut number_rules = CategoryCollection::new("number_rules");
//! number_rules.register(multiple_of_5);
//! number_rules.register(even);
//!
//! assert_eq!(number_rules.violates(&2), vec!["multiple_of_5"]);
//! assert_eq!(number_rules.violates(&5), vec!["even"]);
//! assert!(number_rules.violates(&10).is_empty());
//! ```

use std::fmt;
use std::iter::FusedIterator;
use std::slice;
use std::sync::Arc;

use crate::decorator_event::DecoratorEvent;
use crate::tracer::{callable_name, Tracer};

/// One registration: the callable plus the name reported for it.
pub struct Registered<A: ?Sized, R> {
    name: String,
    func: Arc<dyn Fn(&A) -> R + Send + Sync>,
}

impl<A: ?Sized, R> Registered<A, R> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: &A) -> R {
        (self.func)(args)
    }
}

impl<A: ?Sized, R> Clone for Registered<A, R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            func: Arc::clone(&self.func),
        }
    }
}

impl<A: ?Sized, R> fmt::Debug for Registered<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registered").field("name", &self.name).finish()
    }
}

pub struct CategoryCollection<A: ?Sized, R> {
    category: String,
    members: Vec<Registered<A, R>>,
    tracer: Tracer,
}

impl<A: ?Sized, R> CategoryCollection<A, R> {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            members: Vec::new(),
            tracer: Tracer::new(),
        }
    }

    pub fn with_tracer(mut self, tracer: Tracer) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.members.iter().map(Registered::name).collect()
    }

    pub fn iter(&self) -> slice::Iter<'_, Registered<A, R>> {
        self.members.iter()
    }

    /// Append `func` under its own name and return it unchanged.
    ///
    /// The name is the function's name for `fn` items; closures should go
    /// through [`register_named`](Self::register_named) instead. Registering the
    /// same callable twice adds it twice.
    pub fn register<F>(&mut self, func: F) -> F
    where
        F: Fn(&A) -> R + Clone + Send + Sync + 'static,
    {
        self.register_named(callable_name::<F>(), func)
    }

    /// Append `func` under `name` and return it unchanged.
    pub fn register_named<F>(&mut self, name: impl Into<String>, func: F) -> F
    where
        F: Fn(&A) -> R + Clone + Send + Sync + 'static,
    {
        let name = name.into();
        self.tracer.emit(DecoratorEvent::Registered {
            category: self.category.clone(),
            name: name.clone(),
        });

        self.members.push(Registered {
            name,
            func: Arc::new(func.clone()),
        });
        func
    }

    /// Lazily call every member with `args`, in registration order.
    pub fn call_all<'c>(&'c self, args: &'c A) -> CallAll<'c, A, R> {
        CallAll {
            members: self.members.iter(),
            args,
        }
    }
}

impl<A: ?Sized> CategoryCollection<A, bool> {
    /// Names of the predicates that return `false` for `args`, in registration order.
    pub fn violates(&self, args: &A) -> Vec<&str> {
        self.members
            .iter()
            .filter(|member| !member.call(args))
            .map(Registered::name)
            .collect()
    }
}

impl<A: ?Sized, R> fmt::Debug for CategoryCollection<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CategoryCollection")
            .field("category", &self.category)
            .field("members", &self.names())
            .finish()
    }
}

impl<'c, A: ?Sized, R> IntoIterator for &'c CategoryCollection<A, R> {
    type Item = &'c Registered<A, R>;
    type IntoIter = slice::Iter<'c, Registered<A, R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// Iterator returned by [`CategoryCollection::call_all`].
///
/// Each `next` calls one more member; members registered later are not
/// visible because the collection stays borrowed for the iterator's lifetime.
pub struct CallAll<'c, A: ?Sized, R> {
    members: slice::Iter<'c, Registered<A, R>>,
    args: &'c A,
}

impl<A: ?Sized, R> Iterator for CallAll<'_, A, R> {
    type Item = R;

    fn next(&mut self) -> Option<R> {
        self.members.next().map(|member| member.call(self.args))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.members.size_hint()
    }
}

impl<A: ?Sized, R> ExactSizeIterator for CallAll<'_, A, R> {}

impl<A: ?Sized, R> FusedIterator for CallAll<'_, A, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn double(i: &i64) -> i64 {
        i * 2
    }

    fn half(i: &i64) -> i64 {
        i.div_euclid(2)
    }

    fn add_three(i: &i64) -> i64 {
        i + 3
    }

    fn actions() -> CategoryCollection<i64, i64> {
        let mut actions = CategoryCollection::new("actions");
        actions.register(double);
        actions.register(half);
        actions.register(add_three);
        actions
    }

    #[test]
    fn test_call_all_in_registration_order() {
        let actions = actions();
        let results: Vec<i64> = actions.call_all(&3).collect();
        assert_eq!(results, vec![6, 1, 6]);
    }

    #[test]
    fn test_call_all_is_lazy() {
        let calls = Arc::new(Mutex::new(0));
        let mut counted = CategoryCollection::new("counted");
        for _ in 0..3 {
            let calls = calls.clone();
            counted.register_named("count", move |i: &i64| {
                *calls.lock().unwrap() += 1;
                *i
            });
        }

        let mut results = counted.call_all(&7);
        assert_eq!(*calls.lock().unwrap(), 0);
        assert_eq!(results.next(), Some(7));
        assert_eq!(*calls.lock().unwrap(), 1);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_call_all_is_exhausted_once() {
        let actions = actions();
        let mut results = actions.call_all(&21);
        assert_eq!(results.by_ref().count(), 3);
        assert_eq!(results.next(), None);

        // a fresh broadcast starts over
        assert_eq!(actions.call_all(&21).collect::<Vec<_>>(), vec![42, 10, 24]);
    }

    #[test]
    fn test_register_returns_callable_unchanged() {
        let mut actions: CategoryCollection<i64, i64> = CategoryCollection::new("actions");
        let registered = actions.register(double);
        assert_eq!(registered(&21), 42);
    }

    #[test]
    fn test_default_names_come_from_fn_items() {
        assert_eq!(actions().names(), vec!["double", "half", "add_three"]);
    }

    #[test]
    fn test_duplicate_registration_is_kept() {
        let mut actions = CategoryCollection::new("actions");
        actions.register(double);
        actions.register(double);
        assert_eq!(actions.len(), 2);
        assert_eq!(actions.call_all(&1).collect::<Vec<_>>(), vec![2, 2]);
    }

    #[test]
    fn test_empty_collection() {
        let actions: CategoryCollection<i64, i64> = CategoryCollection::new("actions");
        assert!(actions.is_empty());
        assert_eq!(actions.call_all(&3).count(), 0);

        let rules: CategoryCollection<str, bool> = CategoryCollection::new("rules");
        assert!(rules.violates("anything").is_empty());
    }

    #[test]
    fn test_register_emits_event() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();
        let mut actions = CategoryCollection::new("actions").with_tracer(Tracer::with_callback(
            move |e| events_clone.lock().unwrap().push(e.to_string()),
        ));

        actions.register(add_three);

        let captured = events.lock().unwrap();
        assert_eq!(*captured, vec!["registered add_three in actions"]);
    }

    #[test]
    fn test_shared_across_threads() {
        let actions = Arc::new(actions());
        let handles: Vec<_> = (0..4i64)
            .map(|i| {
                let actions = actions.clone();
                std::thread::spawn(move || actions.call_all(&i).sum::<i64>())
            })
            .collect();

        let sums: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(sums, vec![3, 6, 10, 13]);
    }
}
