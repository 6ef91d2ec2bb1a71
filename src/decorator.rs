//! The two traits every wrapper in this crate is built on.
//!
//! [`Call`] is a callable with a fixed argument type `A` (use a tuple for several
//! arguments). Plain closures and `fn` items implement it through a blanket impl,
//! and every wrapper implements it again, so wrappers nest freely.
//!
//! [`Decorator`] turns one callable into another. Configured factories such as
//! [`UsesLock`](crate::UsesLock) implement it, and [`stack`] applies several
//! of them in sequence.

use crate::tracer::callable_name;

/// A callable taking `A` and producing [`Call::Output`].
pub trait Call<A> {
    type Output;

    fn call(&self, args: A) -> Self::Output;

    /// Name used in log records. Wrappers report the name of what they wrap.
    fn name(&self) -> String {
        callable_name::<Self>()
    }

    /// Turn this callable back into a plain closure.
    fn into_fn(self) -> impl Fn(A) -> Self::Output
    where
        Self: Sized,
    {
        move |args| self.call(args)
    }
}

impl<F, A, O> Call<A> for F
where
    F: Fn(A) -> O,
{
    type Output = O;

    fn call(&self, args: A) -> O {
        self(args)
    }
}

/// Produces a wrapped callable from a raw one.
pub trait Decorator<In> {
    type Out;

    fn decorate(&self, raw: In) -> Self::Out;
}

/// Apply `inner` first, then `outer` to its result.
pub fn stack<D1, D2>(inner: D1, outer: D2) -> Composed<D1, D2> {
    Composed { inner, outer }
}

/// Two decorators applied in sequence.
#[derive(Debug, Clone)]
pub struct Composed<D1, D2> {
    inner: D1,
    outer: D2,
}

impl<In, D1, D2> Decorator<In> for Composed<D1, D2>
where
    D1: Decorator<In>,
    D2: Decorator<D1::Out>,
{
    type Out = D2::Out;

    fn decorate(&self, raw: In) -> Self::Out {
        self.outer.decorate(self.inner.decorate(raw))
    }
}

/// A wrapper that overrides the name its callable reports.
#[derive(Debug, Clone)]
pub struct Named<F> {
    name: String,
    func: F,
}

/// Attach an explicit name to a callable, e.g. to label a closure.
pub fn named<F>(name: impl Into<String>, func: F) -> Named<F> {
    Named {
        name: name.into(),
        func,
    }
}

impl<F, A> Call<A> for Named<F>
where
    F: Call<A>,
{
    type Output = F::Output;

    fn call(&self, args: A) -> Self::Output {
        self.func.call(args)
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}
