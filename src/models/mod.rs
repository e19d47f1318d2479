pub mod meeting;
pub mod metrics;
pub mod names;

pub use meeting::*;
pub use metrics::*;
pub use names::*;
