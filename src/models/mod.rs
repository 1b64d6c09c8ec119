mod session;

pub use session::{BigMiss, LocationType, NewSession, SessionPatch, SessionRecord};
