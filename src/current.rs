use crate::Exhausted;

///Iterator wrapper that keeps the most recently produced value readable
///between pulls.
pub struct Current<I: Iterator> {
    iter: I,
    cur: Option<I::Item>,
}

impl<I: Iterator> Current<I> {
    pub fn new(iter: I) -> Self {
        Current { iter, cur: None }
    }

    ///Returns the last successfully pulled value, or `None` if nothing has
    ///been pulled yet.
    pub fn current(&self) -> Option<&I::Item> {
        self.cur.as_ref()
    }
}

impl<I> Current<I>
where
    I: Iterator,
    I::Item: Clone,
{
    ///Advances the underlying iterator and records the value it produced.
    ///
    ///The recorded value is left untouched when the underlying iterator is
    ///done.
    pub fn pull(&mut self) -> Result<I::Item, Exhausted> {
        let cur = self.iter.next().ok_or(Exhausted)?;
        self.cur = Some(cur.clone());
        Ok(cur)
    }

    ///A lazy view over at most one [`pull`](Current::pull), for APIs that
    ///consume iterators rather than single values. Nothing is pulled until
    ///the view itself is advanced.
    pub fn pull_once(&mut self) -> impl Iterator<Item = I::Item> + '_ {
        std::iter::once_with(|| self.pull().ok()).flatten()
    }
}

impl<I> Iterator for Current<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.pull().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

#[cfg(test)]
mod test {
    use std::cell::Cell;

    use super::*;
    use crate::ReplayIterator;

    #[test]
    fn current_tracks_the_last_pull() {
        let mut g = (10..).with_current();
        assert_eq!(g.current(), None);
        assert_eq!(g.pull(), Ok(10));
        assert_eq!(g.current(), Some(&10));
        assert_eq!(g.current(), Some(&10));
        assert_eq!(g.pull(), Ok(11));
        assert_eq!(g.current(), Some(&11));
    }

    #[test]
    fn exhaustion_leaves_current_untouched() {
        let mut g = (0..2).with_current();
        assert_eq!(g.pull(), Ok(0));
        assert_eq!(g.pull(), Ok(1));
        assert_eq!(g.pull(), Err(Exhausted));
        assert_eq!(g.current(), Some(&1));
        assert_eq!(g.pull(), Err(Exhausted));
    }

    #[test]
    fn pull_once_is_lazy_and_yields_at_most_one() {
        let pulled = Cell::new(0);
        let mut g = std::iter::from_fn(|| {
            pulled.set(pulled.get() + 1);
            Some(pulled.get())
        })
        .with_current();

        let view = g.pull_once();
        assert_eq!(pulled.get(), 0);
        assert_eq!(view.collect::<Vec<_>>(), vec![1]);
        assert_eq!(pulled.get(), 1);
    }

    #[test]
    fn composes_as_an_iterator() {
        let mut g = "abc".chars().with_current();
        assert_eq!(g.by_ref().collect::<String>(), "abc");
        assert_eq!(g.current(), Some(&'c'));
    }
}
