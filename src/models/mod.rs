pub mod catalog;
pub mod message;
pub mod reasoning;
pub mod result;
pub mod conversation;

pub use catalog::*;
pub use message::*;
pub use reasoning::*;
pub use result::*;
pub use conversation::*;
