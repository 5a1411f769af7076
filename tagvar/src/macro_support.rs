pub use alloc::boxed::Box;

#[inline(always)]
pub const fn max(x: usize, y: usize) -> usize {
    if x > y { x } else { y }
}

#[inline(always)]
pub const fn array_max(arr: &[usize]) -> usize {
    let mut i = 0;
    let mut r = usize::MIN;
    while i < arr.len() {
        r = max(r, arr[i]);
        i += 1;
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZES: usize = array_max(&[4, 8, 4, 1]);

    #[test]
    fn maximum_is_const_evaluated() {
        assert_eq!(SIZES, 8);
        assert_eq!(array_max(&[]), 0);
        assert_eq!(max(3, 2), 3);
    }
}
