#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use planewarp_linalg as linalg;

#[doc(inline)]
pub use planewarp_image as image;

#[doc(inline)]
pub use planewarp_geometry as geometry;

#[doc(inline)]
pub use planewarp_imgproc as imgproc;

#[doc(inline)]
pub use planewarp_io as io;
