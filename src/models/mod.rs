pub mod radiation;
pub mod seismic;

pub use radiation::*;
pub use seismic::*;
