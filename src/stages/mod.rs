pub mod stage0_normalize;
pub mod stage1_summarize;
pub mod stage2_reconcile;
pub mod stage3_score;
pub mod stage4_render;

pub use stage0_normalize::*;
pub use stage1_summarize::*;
pub use stage2_reconcile::*;
pub use stage3_score::*;
pub use stage4_render::*;
