pub mod session;

pub use session::{SessionExt, SessionMiddleware};
