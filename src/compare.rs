use core::cmp::Ordering;

use num_traits::float::FloatCore;
use ordered_float::OrderedFloat;

/// Ordering strategy used by [`RbTree`](crate::RbTree) to place and find keys.
///
/// The tree never calls `Ord` on its keys directly; every comparison goes
/// through the strategy it was built with. Any `Fn(&K, &K) -> Ordering`
/// closure is a strategy.
pub trait Compare<K: ?Sized> {
    /// Compares `a` against `b`.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Orders keys by their `Ord` implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<K: Ord + ?Sized> Compare<K> for Natural {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Total order over floating point keys.
///
/// Wraps both operands in [`OrderedFloat`], so `NaN` sorts above every other
/// value and compares equal to itself. This lets `f32`/`f64` be stored
/// directly without a newtype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FloatOrder;

impl<T: FloatCore> Compare<T> for FloatOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        OrderedFloat(*a).cmp(&OrderedFloat(*b))
    }
}

/// Inverts another strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reverse<C>(pub C);

impl<K: ?Sized, C: Compare<K>> Compare<K> for Reverse<C> {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self.0.compare(b, a)
    }
}

impl<K: ?Sized, F> Compare<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_order() {
        assert_eq!(Natural.compare(&1, &2), Ordering::Less);
        assert_eq!(Natural.compare("b", "a"), Ordering::Greater);
        assert_eq!(Natural.compare(&7u8, &7u8), Ordering::Equal);
    }

    #[test]
    fn test_float_order_is_total() {
        assert_eq!(FloatOrder.compare(&1.0f64, &2.0), Ordering::Less);
        assert_eq!(FloatOrder.compare(&f64::NAN, &f64::INFINITY), Ordering::Greater);
        assert_eq!(FloatOrder.compare(&f64::NAN, &f64::NAN), Ordering::Equal);
        assert_eq!(FloatOrder.compare(&-0.0f32, &0.0f32), Ordering::Equal);
    }

    #[test]
    fn test_reverse_order() {
        assert_eq!(Reverse(Natural).compare(&1, &2), Ordering::Greater);
        assert_eq!(Reverse(FloatOrder).compare(&1.5f64, &0.5), Ordering::Less);
    }

    #[test]
    fn test_closure_order() {
        let by_magnitude = |a: &i32, b: &i32| a.abs().cmp(&b.abs());
        assert_eq!(by_magnitude.compare(&-3, &2), Ordering::Greater);
        assert_eq!(by_magnitude.compare(&-2, &2), Ordering::Equal);
    }
}
