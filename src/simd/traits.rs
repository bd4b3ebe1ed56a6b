//! Kernel descriptions consumed by the lane drivers.
//!
//! Implementors provide the scalar operation, which is the definition of the
//! kernel. `block` processes exactly `LANES` elements and defaults to the
//! scalar loop; instruction-set backends override it.

/// Elementwise operation over two equally long inputs.
pub trait BinaryKernel {
    type Input: Copy;
    type Output: Copy;

    /// Elements handled by one `block` call.
    const LANES: usize;

    fn scalar(&self, a: Self::Input, b: Self::Input) -> Self::Output;

    /// Processes one block. All three slices hold exactly `LANES` elements.
    #[inline(always)]
    fn block(&self, a: &[Self::Input], b: &[Self::Input], out: &mut [Self::Output]) {
        for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
            *o = self.scalar(x, y);
        }
    }
}

/// Elementwise operation over one input.
pub trait UnaryKernel {
    type Input: Copy;
    type Output: Copy;

    /// Elements handled by one `block` call.
    const LANES: usize;

    fn scalar(&self, a: Self::Input) -> Self::Output;

    /// Processes one block. Both slices hold exactly `LANES` elements.
    #[inline(always)]
    fn block(&self, a: &[Self::Input], out: &mut [Self::Output]) {
        for (o, &x) in out.iter_mut().zip(a) {
            *o = self.scalar(x);
        }
    }
}
