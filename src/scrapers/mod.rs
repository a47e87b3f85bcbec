//! Marketplace scraper implementations.

mod fiverr;
mod freelancer;
mod remoteok;
mod upwork;

pub use fiverr::Fiverr;
pub use freelancer::Freelancer;
pub use remoteok::RemoteOk;
pub use upwork::Upwork;
