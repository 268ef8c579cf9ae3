//

pub mod source;
pub mod trace;
