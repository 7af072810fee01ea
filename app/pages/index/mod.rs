pub use self::{get::get, post::post};

mod get;
mod page;
mod post;
