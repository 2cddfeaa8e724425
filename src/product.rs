use crate::{Exhausted, Reset};

///Pruning hooks consulted by [`Odometer`] every time a gear advances.
///
///`gear` is the index that just advanced; its slot in `current` is always
///populated at that point, as are all slots above it. The provided methods
///are permissive, which yields the plain cartesian product.
pub trait ProductPolicy<T> {
    ///Whether the values at `gear` and above can still lead to an emitted
    ///tuple. A failed check makes the engine re-pull the same gear.
    fn is_valid(&self, _gear: usize, _current: &[Option<T>]) -> bool {
        true
    }

    ///Whether every remaining value of `gear` is unusable. A hit makes the
    ///engine abandon the gear's remaining range and carry into the next one,
    ///rather than retry value by value.
    fn is_limit_reached(&self, _gear: usize, _current: &[Option<T>]) -> bool {
        false
    }
}

///Policy with no pruning, used by [`fast_product`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconstrained;

impl<T> ProductPolicy<T> for Unconstrained {}

///Policy that only lets through tuples whose values strictly increase from
///gear 0 upward, used by [`limit_product`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictlyIncreasing;

impl<T: PartialOrd> ProductPolicy<T> for StrictlyIncreasing {
    fn is_valid(&self, gear: usize, current: &[Option<T>]) -> bool {
        match adjacent(gear, current) {
            Some((cur, next)) => cur < next,
            None => true,
        }
    }

    fn is_limit_reached(&self, gear: usize, current: &[Option<T>]) -> bool {
        // Values only ever grow within one run of a gear, so once the gear
        // has caught up with its slower neighbour nothing further in its
        // range can pass `is_valid`.
        matches!(adjacent(gear, current), Some((cur, next)) if cur >= next)
    }
}

///The just-advanced slot and its slower neighbour, when both are populated.
fn adjacent<T>(gear: usize, current: &[Option<T>]) -> Option<(&T, &T)> {
    let cur = current.get(gear)?.as_ref()?;
    let next = current.get(gear + 1)?.as_ref()?;
    Some((cur, next))
}

///Odometer-style cartesian product engine.
///
///Each input sequence becomes a [`Reset`] "gear". Gear 0 spins fastest: it
///advances once per emitted tuple, and a gear's exhaustion carries into the
///next one, rewinding everything below it. A [`ProductPolicy`] prunes
///branches as the gears turn.
pub struct Odometer<I: Iterator, P> {
    gears: Vec<Reset<I>>,
    curs: Vec<Option<I::Item>>,
    policy: P,
    done: bool,
}

impl<I, P> Odometer<I, P>
where
    I: Iterator,
    I::Item: Clone,
    P: ProductPolicy<I::Item>,
{
    ///Builds an engine over `sources` with an injected pruning policy.
    ///
    ///Gears `1..` are advanced once up front so every slower slot holds a
    ///value before the first tuple is assembled; gear 0 is only ever pulled
    ///during iteration. An engine with no sources, or with an empty source
    ///among gears `1..`, is born exhausted: its product is empty.
    pub fn with_policy<S>(sources: impl IntoIterator<Item = S>, policy: P) -> Self
    where
        S: IntoIterator<IntoIter = I>,
    {
        let mut gears: Vec<Reset<I>> = sources
            .into_iter()
            .map(|source| Reset::new(source.into_iter()))
            .collect();
        let mut curs = vec![None; gears.len()];
        let mut done = gears.is_empty();
        for (cur, gear) in curs.iter_mut().zip(&mut gears).skip(1) {
            match gear.pull() {
                Ok(value) => *cur = Some(value),
                Err(Exhausted) => {
                    done = true;
                    break;
                }
            }
        }
        Odometer {
            gears,
            curs,
            policy,
            done,
        }
    }

    ///Produces the next tuple, one element per gear with gear 0 first.
    ///
    ///Once this returns `Err(Exhausted)` it keeps doing so.
    pub fn pull(&mut self) -> Result<Vec<I::Item>, Exhausted> {
        if self.done {
            return Err(Exhausted);
        }
        let mut i = 0;
        loop {
            match self.advance_gear(i) {
                Ok(()) => {
                    if !self.policy.is_valid(i, &self.curs) {
                        continue;
                    }
                    if i == 0 {
                        return Ok(self.curs.iter().flatten().cloned().collect());
                    }
                    i = 0;
                }
                Err(Exhausted) => {
                    if i + 1 == self.gears.len() {
                        self.done = true;
                        return Err(Exhausted);
                    }
                    i += 1;
                    if self.carry(i).is_err() {
                        self.done = true;
                        return Err(Exhausted);
                    }
                }
            }
        }
    }

    ///Pulls gear `i` into its slot. A policy limit counts as the gear
    ///exhausting, so the caller carries past its remaining range.
    fn advance_gear(&mut self, i: usize) -> Result<(), Exhausted> {
        let cur = self.gears[i].pull()?;
        self.curs[i] = Some(cur);
        if self.policy.is_limit_reached(i, &self.curs) {
            return Err(Exhausted);
        }
        Ok(())
    }

    ///The odometer rollover: rewinds gears below `upto` and re-advances
    ///gears `1..upto` so their slots hold the head of their sequence again.
    ///Gear 0 stays unpulled, ready for the next [`advance_gear`](Self::advance_gear).
    fn carry(&mut self, upto: usize) -> Result<(), Exhausted> {
        for gear in &mut self.gears[..upto] {
            gear.reset();
        }
        for i in 1..upto {
            let cur = self.gears[i].pull()?;
            self.curs[i] = Some(cur);
        }
        Ok(())
    }
}

impl<I, P> Iterator for Odometer<I, P>
where
    I: Iterator,
    I::Item: Clone,
    P: ProductPolicy<I::Item>,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        self.pull().ok()
    }
}

///Unconstrained cartesian product over `sources`, with the first source
///varying fastest. Emitted tuples hold one element per source, in source
///order.
pub fn fast_product<S>(sources: impl IntoIterator<Item = S>) -> Odometer<S::IntoIter, Unconstrained>
where
    S: IntoIterator,
    S::Item: Clone,
{
    Odometer::with_policy(sources, Unconstrained)
}

///Cartesian product pruned down to strictly increasing tuples. When every
///source is the same range this enumerates its combinations without
///repetition.
pub fn limit_product<S>(
    sources: impl IntoIterator<Item = S>,
) -> Odometer<S::IntoIter, StrictlyIncreasing>
where
    S: IntoIterator,
    S::Item: Clone + PartialOrd,
{
    Odometer::with_policy(sources, StrictlyIncreasing)
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;
    use std::ops::Range;

    use super::*;

    #[test]
    fn fast_product_covers_the_whole_grid() {
        let tuples: Vec<_> = fast_product([0..2, 0..3, 0..4]).collect();
        assert_eq!(tuples.len(), 24);
        assert_eq!(tuples[0], vec![0, 0, 0]);
        assert_eq!(tuples[1], vec![1, 0, 0]);
        assert_eq!(tuples[2], vec![0, 1, 0]);
        assert_eq!(tuples.last(), Some(&vec![1, 2, 3]));

        let distinct: HashSet<_> = tuples.iter().cloned().collect();
        assert_eq!(distinct.len(), 24);
    }

    #[test]
    fn gear_zero_spins_fastest() {
        let tuples: Vec<_> = fast_product([0..2, 0..2]).collect();
        assert_eq!(
            tuples,
            [[0, 0], [1, 0], [0, 1], [1, 1]].map(Vec::from).to_vec()
        );
    }

    #[test]
    fn single_gear_degenerates_to_the_source() {
        let tuples: Vec<_> = fast_product([0..4]).collect();
        assert_eq!(tuples, (0..4).map(|x| vec![x]).collect::<Vec<_>>());
    }

    #[test]
    fn no_sources_is_an_empty_product() {
        let mut p = fast_product(Vec::<Range<i32>>::new());
        assert_eq!(p.pull(), Err(Exhausted));
    }

    #[test]
    fn any_empty_source_empties_the_product() {
        assert_eq!(fast_product([0..3, 0..0]).count(), 0);
        assert_eq!(fast_product([0..0, 0..3]).count(), 0);
        assert_eq!(fast_product([0..0]).count(), 0);
    }

    #[test]
    fn exhaustion_is_idempotent() {
        let mut p = fast_product([0..2, 0..2]);
        assert_eq!(p.by_ref().count(), 4);
        assert_eq!(p.pull(), Err(Exhausted));
        assert_eq!(p.next(), None);
        assert_eq!(p.pull(), Err(Exhausted));
    }

    #[test]
    fn limit_product_emits_ascending_tuples_only() {
        let tuples: Vec<_> = limit_product([0..4, 0..4, 0..4]).collect();
        assert_eq!(
            tuples,
            [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]]
                .map(Vec::from)
                .to_vec()
        );
    }

    #[test]
    fn custom_policies_plug_in() {
        struct EvenOnly;

        impl ProductPolicy<i32> for EvenOnly {
            fn is_valid(&self, gear: usize, current: &[Option<i32>]) -> bool {
                current[gear].is_some_and(|cur| cur % 2 == 0)
            }
        }

        let tuples: Vec<_> = Odometer::with_policy([0..4, 0..4], EvenOnly).collect();
        assert_eq!(
            tuples,
            [[0, 0], [2, 0], [0, 2], [2, 2]].map(Vec::from).to_vec()
        );
    }
}
