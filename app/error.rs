use derive_more::{Display, Error};

#[derive(Display, Debug, Error)]
pub enum Error {
	BadRequest,
	NotFound,
	/// The upstream model service could not be reached.
	#[display(fmt = "{}", message)]
	BadGateway { message: String },
}
