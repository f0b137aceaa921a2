pub mod batch;
pub mod project;

pub use self::batch::{as_rows, dot_rows};
pub use self::project::{remove_projection, remove_projection_vjp, Projection};
