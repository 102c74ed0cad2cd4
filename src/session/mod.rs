pub mod cart;
pub mod flow;
pub mod state;
pub mod store;

pub use cart::{Cart, CartEntry};
pub use flow::{FlowNotice, SubmitStatus, MAX_QUANTITY_PER_ADD};
pub use state::{Session, Step};
pub use store::SessionStore;
