// Smartmarks stateless services
// Pure helpers with no view state: URL rules and the favicon source chain.

pub mod favicon;
pub mod urls;
