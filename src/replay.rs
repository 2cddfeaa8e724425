use crate::Exhausted;

///Iterator wrapper that logs every first-time value so the whole sequence
///seen so far can be replayed after a [`reset`](Reset::reset).
///
///The underlying iterator is never re-run for values it already produced:
///replays are served as clones out of the log, and the underlying iterator
///picks up where it left off once the replay is drained. The log only ever
///grows, so a reset after a deeper traversal replays the longer prefix.
pub struct Reset<I: Iterator> {
    iter: I,
    saved: Vec<I::Item>,
    ///How many pulls are still owed from the front of `saved`.
    replay: usize,
}

impl<I: Iterator> Reset<I> {
    pub fn new(iter: I) -> Self {
        Reset {
            iter,
            saved: Vec::new(),
            replay: 0,
        }
    }

    ///Rewinds to the start of the recorded sequence. The next
    ///`saved-so-far`-many pulls replay the log in order, after which the
    ///underlying iterator resumes.
    pub fn reset(&mut self) {
        self.replay = self.saved.len();
    }
}

impl<I> Reset<I>
where
    I: Iterator,
    I::Item: Clone,
{
    ///Produces the next value, either replayed from the log or pulled from
    ///the underlying iterator. First-time values are appended to the log;
    ///replayed ones are not.
    pub fn pull(&mut self) -> Result<I::Item, Exhausted> {
        if self.replay > 0 {
            // No values are appended mid-replay, so the log length is stable
            // and indexes the replay position.
            let cur = self.saved[self.saved.len() - self.replay].clone();
            self.replay -= 1;
            Ok(cur)
        } else {
            let cur = self.iter.next().ok_or(Exhausted)?;
            self.saved.push(cur.clone());
            Ok(cur)
        }
    }
}

impl<I> Iterator for Reset<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.pull().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.iter.size_hint();
        (lo + self.replay, hi.map(|hi| hi + self.replay))
    }
}

///[`Reset`] that rewinds itself instead of finishing, repeating the
///underlying sequence forever.
pub struct Cycle<I: Iterator> {
    inner: Reset<I>,
}

impl<I: Iterator> Cycle<I> {
    pub fn new(iter: I) -> Self {
        Cycle {
            inner: Reset::new(iter),
        }
    }
}

impl<I> Cycle<I>
where
    I: Iterator,
    I::Item: Clone,
{
    ///Like [`Reset::pull`], except exhaustion rewinds the log and retries
    ///exactly once. An underlying iterator that never produced anything
    ///still exhausts rather than spin.
    pub fn pull(&mut self) -> Result<I::Item, Exhausted> {
        self.inner.pull().or_else(|Exhausted| {
            self.inner.reset();
            self.inner.pull()
        })
    }
}

impl<I> Iterator for Cycle<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.pull().ok()
    }
}
