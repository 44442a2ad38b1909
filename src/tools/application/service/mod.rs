pub mod dispatcher;

pub use dispatcher::{Args, Dispatcher};
