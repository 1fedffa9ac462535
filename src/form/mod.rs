pub mod passengers;
pub mod session;
pub mod submit;

pub use passengers::{PassengerEntry, PassengerList};
pub use session::FormSession;
pub use submit::{LogSubmitter, SubmitHandler};
