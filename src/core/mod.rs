//

pub mod barrier;
pub mod cancel;
pub mod error;
pub mod state;
