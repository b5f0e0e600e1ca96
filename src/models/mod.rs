pub mod home;
pub mod page;
pub mod user;

pub use home::{Home, Location};
pub use page::Page;
pub use user::User;
