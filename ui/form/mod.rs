mod form;
mod number_field;

pub use self::form::*;
pub use self::number_field::*;
