pub mod joined;
pub mod observation;
pub mod site;

pub use joined::{JoinedObservation, JoinedTable};
pub use observation::Observation;
pub use site::Site;
