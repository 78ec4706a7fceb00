pub mod db;
pub mod moderation;

mod env;
pub use env::{Env, env};

pub use db::{init_mongo, mongo};
