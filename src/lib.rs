//! Stateful iterator wrappers and an odometer-style cartesian product.
//!
//! [`Current`] remembers the last value an iterator produced, [`Reset`] logs
//! everything it produces so the sequence can be replayed from the start, and
//! [`Cycle`] turns that replay into an endless repetition. [`Odometer`]
//! composes several [`Reset`] "gears" into a cartesian-product generator with
//! pluggable pruning: [`fast_product`] enumerates the full grid, while
//! [`limit_product`] keeps only strictly increasing tuples, which amounts to
//! combinations without repetition.

use thiserror::Error;

///Signals that an iterator has no further element to produce.
///
///This is an ordinary end-of-sequence marker rather than a fault: the product
///engine uses it internally to drive carries between gears, and [`Cycle`]
///absorbs it by rewinding.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("iterator exhausted")]
pub struct Exhausted;

mod current;
mod product;
mod replay;

pub use current::Current;
pub use product::{
    Odometer, ProductPolicy, StrictlyIncreasing, Unconstrained, fast_product, limit_product,
};
pub use replay::{Cycle, Reset};

///Adapters wrapping any iterator in this crate's stateful wrappers.
pub trait ReplayIterator: Iterator + Sized {
    ///Keeps the most recently produced value readable between pulls.
    fn with_current(self) -> Current<Self> {
        Current::new(self)
    }

    ///Records produced values so they can be replayed after a
    ///[`reset`](Reset::reset).
    fn resettable(self) -> Reset<Self> {
        Reset::new(self)
    }

    ///Repeats the produced sequence endlessly by replaying it on exhaustion.
    fn cycling(self) -> Cycle<Self> {
        Cycle::new(self)
    }
}

impl<I: Iterator> ReplayIterator for I {}
