// Smartmarks stateful components
// Managers own mutable dashboard state: the synchronized bookmark view
// and the session lifecycle around it.

pub mod session;
pub mod synchronizer;
