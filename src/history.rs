/// A fixed-capacity ring buffer that keeps the `N` most recently pushed entries.
///
/// Storage is an inline array with a write cursor, so pushing and evicting are O(1) and the
/// memory footprint is fixed at compile time. Entries are addressed by how far back they
/// lie from the most recent one.
#[derive(Clone)]
pub struct BoundedHistory<E, const N: usize> {
    entries: [E; N],
    /// Index of the slot the next entry is written to.
    head: usize,
    len: usize,
}

impl<E, const N: usize> BoundedHistory<E, N> {
    /// Creates an empty history.
    pub fn new() -> Self
    where
        E: Copy + Default,
    {
        Self {
            entries: [E::default(); N],
            head: 0,
            len: 0,
        }
    }

    /// The maximum number of entries retained.
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// The number of entries currently retained.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends an entry, overwriting the oldest one if the history is full.
    pub fn push(&mut self, entry: E) {
        if N == 0 {
            return;
        }

        self.entries[self.head] = entry;
        self.head = (self.head + 1) % N;
        if self.len < N {
            self.len += 1;
        }
    }

    /// Gets the entry `back` steps before the most recent one; `newest(0)` is the most
    /// recent entry.
    #[inline]
    pub fn newest(&self, back: usize) -> Option<&E> {
        self.slot(back).map(|index| &self.entries[index])
    }

    /// Gets a mutable reference to the entry `back` steps before the most recent one.
    #[inline]
    pub fn newest_mut(&mut self, back: usize) -> Option<&mut E> {
        self.slot(back).map(move |index| &mut self.entries[index])
    }

    /// Discards up to `count` of the most recent entries and returns how many were
    /// actually discarded.
    pub fn drop_newest(&mut self, count: usize) -> usize {
        let count = count.min(self.len);
        if count > 0 {
            self.head = (self.head + N - count) % N;
            self.len -= count;
        }
        count
    }

    /// Discards all entries.
    #[inline]
    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    /// Iterates the retained entries from the oldest to the most recent.
    pub fn iter(&self) -> impl Iterator<Item = &E> + '_ {
        (0..self.len)
            .rev()
            .filter_map(move |back| self.newest(back))
    }

    fn slot(&self, back: usize) -> Option<usize> {
        if back >= self.len {
            return None;
        }
        Some((self.head + N - 1 - back) % N)
    }
}

impl<E, const N: usize> Default for BoundedHistory<E, N>
where
    E: Copy + Default,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<E, const N: usize> core::fmt::Debug for BoundedHistory<E, N>
where
    E: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
