pub mod operation_result;

pub use operation_result::{OperationFailure, OperationResult};
