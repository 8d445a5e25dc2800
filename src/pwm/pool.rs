use super::channel::{PWMChannel, PinId, Slot};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum List {
    Free,
    Active,
}

/// Fixed array of channel records threaded by two intrusive doubly-linked lists.
///
/// Links are slot indices into `channels`, every record is on exactly one list.
pub(crate) struct ChannelPool<P, const N: usize> {
    channels: [PWMChannel<P>; N],
    free: Option<Slot>,
    active: Option<Slot>,
}

impl<P: Copy, const N: usize> ChannelPool<P, N> {
    pub fn new() -> Self {
        let mut pool = Self {
            channels: core::array::from_fn(|_| PWMChannel::vacant()),
            free: None,
            active: None,
        };
        pool.reset();
        pool
    }

    /// Returns every record to the free list with cleared fields.
    pub fn reset(&mut self) {
        self.free = None;
        self.active = None;
        for slot in 0..N {
            self.channels[slot].reset();
            self.push(List::Free, slot);
        }
    }

    fn head_mut(&mut self, list: List) -> &mut Option<Slot> {
        match list {
            List::Free => &mut self.free,
            List::Active => &mut self.active,
        }
    }

    pub fn head(&self, list: List) -> Option<Slot> {
        match list {
            List::Free => self.free,
            List::Active => self.active,
        }
    }

    pub fn get(&self, slot: Slot) -> &PWMChannel<P> {
        &self.channels[slot]
    }

    pub fn get_mut(&mut self, slot: Slot) -> &mut PWMChannel<P> {
        &mut self.channels[slot]
    }

    pub fn push(&mut self, list: List, slot: Slot) {
        let head = *self.head_mut(list);

        let item = &mut self.channels[slot];
        item.next = head;
        item.prev = None;

        if let Some(old) = head {
            self.channels[old].prev = Some(slot);
        }
        *self.head_mut(list) = Some(slot);
    }

    /// Unlinks `slot` from `list` whatever its position. The caller guarantees membership.
    pub fn remove(&mut self, list: List, slot: Slot) {
        let (prev, next) = {
            let item = &self.channels[slot];
            (item.prev, item.next)
        };

        match prev {
            Some(p) => self.channels[p].next = next,
            None => *self.head_mut(list) = next,
        }
        if let Some(n) = next {
            self.channels[n].prev = prev;
        }

        let item = &mut self.channels[slot];
        item.prev = None;
        item.next = None;
    }

    pub fn pop(&mut self, list: List) -> Option<Slot> {
        let slot = self.head(list)?;
        self.remove(list, slot);
        Some(slot)
    }

    /// Linear search of the active list, capped at `N` steps in case the links loop.
    pub fn find(&self, pin: PinId) -> Option<Slot> {
        let mut cursor = self.active;
        for _ in 0..N {
            let slot = cursor?;
            let ch = &self.channels[slot];
            if ch.pin == Some(pin) {
                return Some(slot);
            }
            cursor = ch.next;
        }
        None
    }

    /// Visits every record of `list` in order, at most `N` of them.
    pub fn for_each_mut(&mut self, list: List, mut f: impl FnMut(&mut PWMChannel<P>)) {
        let mut cursor = self.head(list);
        for _ in 0..N {
            let Some(slot) = cursor else {
                break;
            };
            let ch = &mut self.channels[slot];
            f(ch);
            cursor = ch.next;
        }
    }

    pub fn iter(&self, list: List) -> Iter<'_, P, N> {
        Iter {
            pool: self,
            cursor: self.head(list),
            left: N,
        }
    }

    pub fn len(&self, list: List) -> usize {
        self.iter(list).count()
    }
}

pub(crate) struct Iter<'a, P, const N: usize> {
    pool: &'a ChannelPool<P, N>,
    cursor: Option<Slot>,
    left: usize,
}

impl<'a, P: Copy, const N: usize> Iterator for Iter<'a, P, N> {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        if self.left == 0 {
            return None;
        }
        let slot = self.cursor?;
        self.left -= 1;
        self.cursor = self.pool.get(slot).next;
        Some(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Pool = ChannelPool<u8, 4>;

    fn slots(pool: &Pool, list: List) -> Vec<Slot> {
        pool.iter(list).collect()
    }

    fn assert_links(pool: &Pool, list: List) {
        let order = slots(pool, list);
        for (i, &slot) in order.iter().enumerate() {
            let ch = pool.get(slot);
            assert_eq!(ch.prev, if i == 0 { None } else { Some(order[i - 1]) });
            assert_eq!(ch.next, order.get(i + 1).copied());
        }
    }

    #[test]
    fn new_pool_is_all_free() {
        let pool = Pool::new();
        assert_eq!(pool.len(List::Free), 4);
        assert_eq!(pool.len(List::Active), 0);
        assert_links(&pool, List::Free);
    }

    #[test]
    fn push_inserts_at_head() {
        let mut pool = Pool::new();
        let a = pool.pop(List::Free).unwrap();
        let b = pool.pop(List::Free).unwrap();
        pool.push(List::Active, a);
        pool.push(List::Active, b);
        assert_eq!(slots(&pool, List::Active), vec![b, a]);
        assert_links(&pool, List::Active);
    }

    #[test]
    fn pop_empty_list() {
        let mut pool = Pool::new();
        assert_eq!(pool.pop(List::Active), None);
        for _ in 0..4 {
            assert!(pool.pop(List::Free).is_some());
        }
        assert_eq!(pool.pop(List::Free), None);
    }

    #[test]
    fn remove_head_middle_tail() {
        let mut pool = Pool::new();
        while let Some(slot) = pool.pop(List::Free) {
            pool.push(List::Active, slot);
        }
        let order = slots(&pool, List::Active);
        assert_eq!(order.len(), 4);

        // middle
        pool.remove(List::Active, order[1]);
        assert_eq!(slots(&pool, List::Active), vec![order[0], order[2], order[3]]);
        assert_links(&pool, List::Active);

        // tail
        pool.remove(List::Active, order[3]);
        assert_eq!(slots(&pool, List::Active), vec![order[0], order[2]]);
        assert_links(&pool, List::Active);

        // head
        pool.remove(List::Active, order[0]);
        assert_eq!(slots(&pool, List::Active), vec![order[2]]);
        assert_links(&pool, List::Active);

        pool.remove(List::Active, order[2]);
        assert_eq!(pool.head(List::Active), None);

        let removed = pool.get(order[2]);
        assert_eq!((removed.prev, removed.next), (None, None));
    }

    #[test]
    fn find_by_pin() {
        let mut pool = Pool::new();
        for pin in [3u8, 7, 9] {
            let slot = pool.pop(List::Free).unwrap();
            pool.get_mut(slot).pin = Some(pin);
            pool.push(List::Active, slot);
        }
        let slot = pool.find(7).unwrap();
        assert_eq!(pool.get(slot).pin, Some(7));
        assert_eq!(pool.find(4), None);
    }

    #[test]
    fn find_terminates_on_cycle() {
        let mut pool = Pool::new();
        let a = pool.pop(List::Free).unwrap();
        let b = pool.pop(List::Free).unwrap();
        pool.push(List::Active, a);
        pool.push(List::Active, b);
        // corrupt: a -> b -> a -> ...
        pool.get_mut(a).next = Some(b);

        assert_eq!(pool.find(42), None);
        assert_eq!(pool.iter(List::Active).count(), 4);
    }
}
