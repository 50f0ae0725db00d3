// Author: Dustin Pilgrim
// License: MIT

use std::cmp::Ordering;

use super::*;

impl Storage {
    /// Ordered three-way fold over the keys of `self` and `other`.
    ///
    /// Walks the union of both key sets in ascending order. A key only in
    /// `self` goes to `on_left`, a key in both to `on_both` (left value first),
    /// a key only in `other` to `on_right`. The accumulator starts at `init`
    /// and is threaded through the calls in key order.
    ///
    /// # Examples
    /// ```
    /// use cfg_storage::{Storage, Value};
    ///
    /// let a = Storage::from_list([("a", Value::int(1)), ("b", Value::int(2))]);
    /// let b = Storage::from_list([("b", Value::int(3)), ("c", Value::int(4))]);
    ///
    /// let trace = a.merge(
    ///     &b,
    ///     Vec::new(),
    ///     |k, _, mut acc| { acc.push(format!("left {k}")); acc },
    ///     |k, _, _, mut acc| { acc.push(format!("both {k}")); acc },
    ///     |k, _, mut acc| { acc.push(format!("right {k}")); acc },
    /// );
    /// assert_eq!(trace, ["left a", "both b", "right c"]);
    /// ```
    pub fn merge<A, L, B, R>(
        &self,
        other: &Storage,
        init: A,
        mut on_left: L,
        mut on_both: B,
        mut on_right: R,
    ) -> A
    where
        L: FnMut(&str, &Value, A) -> A,
        B: FnMut(&str, &Value, &Value, A) -> A,
        R: FnMut(&str, &Value, A) -> A,
    {
        let mut left = self.iter().peekable();
        let mut right = other.iter().peekable();
        let mut acc = init;

        loop {
            let order = match (left.peek(), right.peek()) {
                (Some((lk, _)), Some((rk, _))) => lk.cmp(rk),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => break,
            };

            acc = match order {
                Ordering::Less => match left.next() {
                    Some((k, v)) => on_left(k, v, acc),
                    None => break,
                },
                Ordering::Greater => match right.next() {
                    Some((k, v)) => on_right(k, v, acc),
                    None => break,
                },
                Ordering::Equal => match (left.next(), right.next()) {
                    (Some((k, lv)), Some((_, rv))) => on_both(k, lv, rv, acc),
                    _ => break,
                },
            };
        }

        acc
    }

    /// Every key of either side; `self` wins where both have the key.
    pub fn union(&self, other: &Storage) -> Storage {
        self.merge(
            other,
            Storage::empty(),
            |k, v, acc| acc.insert(k, v.clone()),
            |k, v, _, acc| acc.insert(k, v.clone()),
            |k, v, acc| acc.insert(k, v.clone()),
        )
    }

    /// Keys present on both sides, with the values from `self`.
    pub fn intersect(&self, other: &Storage) -> Storage {
        self.merge(
            other,
            Storage::empty(),
            |_, _, acc| acc,
            |k, v, _, acc| acc.insert(k, v.clone()),
            |_, _, acc| acc,
        )
    }

    /// Keys of `self` that `other` does not have.
    pub fn diff(&self, other: &Storage) -> Storage {
        self.merge(
            other,
            Storage::empty(),
            |k, v, acc| acc.insert(k, v.clone()),
            |_, _, _, acc| acc,
            |_, _, acc| acc,
        )
    }

    /// Left-biased union of many layers: for each key the first layer that
    /// has it wins. Pass layers highest priority first.
    ///
    /// # Examples
    /// ```
    /// use cfg_storage::{Storage, Value};
    ///
    /// let cli = Storage::singleton("log.level", Value::string("debug"));
    /// let env = Storage::singleton("log.level", Value::string("info"));
    /// let defaults = Storage::from_list([
    ///     ("log.level", Value::string("warn")),
    ///     ("log.color", Value::bool(true)),
    /// ]);
    ///
    /// let settings = Storage::unions([cli, env, defaults]);
    /// assert_eq!(settings.get_string("log.level"), Some("debug"));
    /// assert_eq!(settings.get_bool("log.color"), Some(true));
    /// ```
    pub fn unions<I>(layers: I) -> Storage
    where
        I: IntoIterator<Item = Storage>,
    {
        layers
            .into_iter()
            .fold(Storage::empty(), |acc, layer| acc.union(&layer))
    }
}
