mod perspective;
mod split;

pub use perspective::{render_preview, warp_perspective_split, warp_rows_split};
pub use split::SplitRegion;
