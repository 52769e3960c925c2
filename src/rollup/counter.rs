// Window delta of a monotonic counter.

/// `last - first` as a signed value.
///
/// Not clamped: a counter that reset inside the window (container restart) yields a negative
/// delta, and the caller decides what to do with it.
pub fn delta(first: u64, last: u64) -> i64 {
    last.wrapping_sub(first) as i64
}
