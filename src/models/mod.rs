pub mod plan;
pub mod query;
pub mod ride;
pub mod trip;
pub mod user;
