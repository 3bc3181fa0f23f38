pub mod stage0_prepare;
pub mod stage1_parse;
pub mod stage2_annotate;
pub mod stage3_render;

pub use stage0_prepare::*;
pub use stage1_parse::*;
pub use stage2_annotate::*;
pub use stage3_render::*;
