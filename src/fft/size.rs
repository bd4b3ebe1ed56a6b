//! The transform length catalog.

use std::fmt;

use crate::{
    error::{KernelError, Result},
    fft::transform::{Direction, Transform},
    types::Complex16,
};

macro_rules! transform_catalog {
    ($($variant:ident => $len:literal),+ $(,)?) => {
        /// Supported transform length.
        ///
        /// Every variant is backed by its own [`Transform`] instantiation;
        /// converting from `usize` fails for any length outside the catalog.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum TransformSize {
            $($variant),+
        }

        impl TransformSize {
            /// Every supported size, in declaration order.
            pub const ALL: &'static [TransformSize] = &[$(TransformSize::$variant),+];

            /// Number of points.
            pub const fn len(self) -> usize {
                match self {
                    $(TransformSize::$variant => $len),+
                }
            }

            /// Catalog entry for `len`, if there is one.
            pub const fn from_len(len: usize) -> Option<Self> {
                match len {
                    $($len => Some(TransformSize::$variant),)+
                    _ => None,
                }
            }

            pub(crate) fn run(self, direction: Direction, output: &mut [Complex16], input: &[Complex16]) -> Result<()> {
                match self {
                    $(TransformSize::$variant => Transform::<$len>::run_slices(direction, output, input)),+
                }
            }

            pub(crate) fn run_in_place(self, direction: Direction, buffer: &mut [Complex16]) -> Result<()> {
                match self {
                    $(TransformSize::$variant => Transform::<$len>::run_in_place(direction, buffer)),+
                }
            }
        }
    };
}

transform_catalog! {
    N12 => 12,
    N16 => 16,
    N24 => 24,
    N32 => 32,
    N36 => 36,
    N48 => 48,
    N60 => 60,
    N64 => 64,
    N72 => 72,
    N96 => 96,
    N108 => 108,
    N120 => 120,
    N128 => 128,
    N144 => 144,
    N180 => 180,
    N192 => 192,
    N216 => 216,
    N240 => 240,
    N256 => 256,
    N288 => 288,
    N300 => 300,
    N324 => 324,
    N360 => 360,
    N384 => 384,
    N432 => 432,
    N480 => 480,
    N512 => 512,
    N540 => 540,
    N576 => 576,
    N600 => 600,
    N648 => 648,
    N720 => 720,
    N768 => 768,
    N864 => 864,
    N900 => 900,
    N960 => 960,
    N972 => 972,
    N1024 => 1024,
    N1080 => 1080,
    N1152 => 1152,
    N1200 => 1200,
    N2048 => 2048,
}

impl TransformSize {
    /// Position in [`TransformSize::ALL`].
    #[inline(always)]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for TransformSize {
    type Error = KernelError;

    fn try_from(len: usize) -> Result<Self> {
        Self::from_len(len).ok_or(KernelError::UnsupportedTransformSize { size: len })
    }
}

impl From<TransformSize> for usize {
    fn from(size: TransformSize) -> usize {
        size.len()
    }
}

impl fmt::Display for TransformSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-point", self.len())
    }
}
