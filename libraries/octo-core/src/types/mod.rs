mod navigation;
mod user;

pub use navigation::NavigationRoute;
pub use user::{GitHubUser, UserId};
