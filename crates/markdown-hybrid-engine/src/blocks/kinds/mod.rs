pub mod code_fence;
pub mod frontmatter;
pub mod math;
pub mod table;

pub use code_fence::{CodeFence, FenceSig};
pub use frontmatter::Frontmatter;
pub use math::MathBlock;
pub use table::Table;
