mod alert;
mod button;
mod dom;
mod form;
mod layout;

pub use self::alert::*;
pub use self::button::*;
pub use self::dom::*;
pub use self::form::*;
pub use self::layout::*;
